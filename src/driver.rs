//! Output drivers: the only place where a display becomes line writes.
//!
//! Every variant works from the same write plan (see [`crate::layout`]).
//! The hardware backed ones hand it to a [`LineBank`], the dry run only
//! logs it. Which one is used is decided once, at startup.

use std::collections::VecDeque;
use std::fmt::Debug;

use embedded_hal::digital::{OutputPin, PinState};
use tracing::{debug, info};

use crate::display::{DisplayString, POSITIONS};
use crate::error::{ClockError, DriveError};
use crate::layout::{self, ClockKind, LINE_COUNT, LineWrite, SAFE_LEVEL};

pub trait OutputDriver: Send {
    /// Push `display` to the output.
    fn render(&mut self, display: &DisplayString) -> Result<(), DriveError>;
    /// Return every line to its resting level.
    fn clear(&mut self) -> Result<(), DriveError>;
    fn describe(&self) -> &'static str;
}

/// The set of physical lines a clock is wired to.
pub trait LineBank: Send {
    fn set(&mut self, line: usize, level: PinState) -> Result<(), DriveError>;
}

/// A line bank over any `embedded-hal` output pins, line `n` being `pins[n]`.
pub struct PinBank<P> {
    pins: Vec<P>,
}

impl<P> PinBank<P>
where
    P: OutputPin + Send,
    P::Error: Debug,
{
    pub fn new(pins: Vec<P>) -> Result<Self, ClockError> {
        if pins.len() < LINE_COUNT {
            return Err(ClockError::Config(format!(
                "{} pins bound but the display needs {}",
                pins.len(),
                LINE_COUNT
            )));
        }
        Ok(Self { pins })
    }
}

impl<P> LineBank for PinBank<P>
where
    P: OutputPin + Send,
    P::Error: Debug,
{
    fn set(&mut self, line: usize, level: PinState) -> Result<(), DriveError> {
        let pin = self.pins.get_mut(line).ok_or_else(|| DriveError::Line {
            line,
            message: "no pin bound to line".into(),
        })?;
        pin.set_state(level).map_err(|e| DriveError::Line {
            line,
            message: format!("{e:?}"),
        })
    }
}

fn drive<B: LineBank>(bank: &mut B, plan: &[LineWrite]) -> Result<(), DriveError> {
    for write in plan {
        bank.set(write.line, write.level)?;
    }
    Ok(())
}

fn rest<B: LineBank>(bank: &mut B) -> Result<(), DriveError> {
    for line in 0..LINE_COUNT {
        bank.set(line, SAFE_LEVEL)?;
    }
    Ok(())
}

/// Inverted logic: a segment is lit while its line is held LOW.
/// Do not flip this without checking how the display is wired.
pub struct SevenSegmentDriver<B> {
    bank: B,
}

impl<B: LineBank> SevenSegmentDriver<B> {
    pub fn new(bank: B) -> Self {
        Self { bank }
    }
    pub fn into_inner(self) -> B {
        self.bank
    }
}

impl<B: LineBank> OutputDriver for SevenSegmentDriver<B> {
    fn render(&mut self, display: &DisplayString) -> Result<(), DriveError> {
        let plan = layout::segment_plan(display)?;
        drive(&mut self.bank, &plan)
    }
    fn clear(&mut self) -> Result<(), DriveError> {
        rest(&mut self.bank)
    }
    fn describe(&self) -> &'static str {
        "seven segment"
    }
}

/// At most one line per tube is active (LOW) at any time.
pub struct NixieTubeDriver<B> {
    bank: B,
}

impl<B: LineBank> NixieTubeDriver<B> {
    pub fn new(bank: B) -> Self {
        Self { bank }
    }
    pub fn into_inner(self) -> B {
        self.bank
    }
}

impl<B: LineBank> OutputDriver for NixieTubeDriver<B> {
    fn render(&mut self, display: &DisplayString) -> Result<(), DriveError> {
        let plan = layout::tube_plan(display)?;
        drive(&mut self.bank, &plan)
    }
    fn clear(&mut self) -> Result<(), DriveError> {
        rest(&mut self.bank)
    }
    fn describe(&self) -> &'static str {
        "nixie tube"
    }
}

/// Writes kept by a dry run: enough for the longest single render.
pub const TRACE_LIMIT: usize = LINE_COUNT + POSITIONS;

/// Logs what would be written instead of touching any hardware.
/// Only the most recent [`TRACE_LIMIT`] writes are kept.
#[derive(Debug)]
pub struct DryRunDriver {
    kind: ClockKind,
    trace: VecDeque<String>,
}

impl DryRunDriver {
    pub fn new(kind: ClockKind) -> Self {
        Self { kind, trace: VecDeque::with_capacity(TRACE_LIMIT) }
    }
    pub fn trace(&self) -> &VecDeque<String> {
        &self.trace
    }
    pub fn take_trace(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace).into()
    }
    fn record(&mut self, line: String) {
        debug!(target: "ledclock::dry_run", "{line}");
        if self.trace.len() == TRACE_LIMIT {
            self.trace.pop_front();
        }
        self.trace.push_back(line);
    }
}

impl OutputDriver for DryRunDriver {
    fn render(&mut self, shown: &DisplayString) -> Result<(), DriveError> {
        // DisplayString only holds encodable digits, so this cannot fail
        let plan = layout::plan(self.kind, shown)?;
        info!(kind = %self.kind, display = %shown, writes = plan.len(), "dry run render");
        for write in plan {
            self.record(write.to_string());
        }
        Ok(())
    }
    fn clear(&mut self) -> Result<(), DriveError> {
        for line in 0..LINE_COUNT {
            self.record(format!("line {line} -> HIGH (reset)"));
        }
        Ok(())
    }
    fn describe(&self) -> &'static str {
        match self.kind {
            ClockKind::Led => "seven segment (dry run)",
            ClockKind::Tube => "nixie tube (dry run)",
        }
    }
}

/// Picks the driver variant for `kind`, over `bank` when there is hardware.
pub fn select<B>(kind: ClockKind, bank: Option<B>) -> Box<dyn OutputDriver>
where
    B: LineBank + 'static,
{
    match (kind, bank) {
        (ClockKind::Led, Some(bank)) => Box::new(SevenSegmentDriver::new(bank)),
        (ClockKind::Tube, Some(bank)) => Box::new(NixieTubeDriver::new(bank)),
        (kind, None) => Box::new(DryRunDriver::new(kind)),
    }
}

#[cfg(feature = "rpi")]
pub mod rpi {
    //! Raspberry Pi binding: line `n` is BCM GPIO `n`, all driven HIGH at startup.

    use rppal::gpio::{Gpio, OutputPin};

    use super::PinBank;
    use crate::error::ClockError;
    use crate::layout::LINE_COUNT;

    pub fn gpio_bank() -> Result<PinBank<OutputPin>, ClockError> {
        let gpio = Gpio::new().map_err(|e| ClockError::Config(format!("GPIO unavailable: {e}")))?;
        let mut pins = Vec::with_capacity(LINE_COUNT);
        for bcm in 0..LINE_COUNT as u8 {
            let pin = gpio
                .get(bcm)
                .map_err(|e| ClockError::Config(format!("GPIO {bcm}: {e}")))?;
            pins.push(pin.into_output_high());
        }
        PinBank::new(pins)
    }
}
