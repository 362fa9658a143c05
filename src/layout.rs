//! Physical line layout of both clock types and the writes a display needs.
//!
//! Lines are numbered 0 to 27. How a line number maps onto an actual GPIO pin
//! is up to the [`crate::driver::LineBank`] in use.

use std::fmt;

use embedded_hal::digital::PinState;
use serde::Deserialize;

use crate::display::{DisplayString, POSITIONS};
use crate::error::EncodingError;
use crate::segment::{SEGMENT_COUNT, pattern_for};

pub const LINE_COUNT: usize = 28;

/// Line driving segment `s` of position `p`. A segment is lit while its line is LOW.
pub const SEGMENT_LINES: [[usize; SEGMENT_COUNT]; POSITIONS] = [
    [0, 1, 2, 3, 4, 5, 6],
    [7, 8, 9, 10, 11, 12, 13],
    [14, 15, 16, 17, 18, 19, 20],
    [21, 22, 23, 24, 25, 26, 27],
];

/// Line selecting digit `d` on tube `p`. The hour tens tube only has 1 and 2 wired,
/// the minute tens tube only 0 to 5.
pub const TUBE_LINES: [[Option<usize>; 10]; POSITIONS] = [
    [None, Some(0), Some(1), None, None, None, None, None, None, None],
    [Some(2), Some(3), Some(4), Some(5), Some(6), Some(7), Some(8), Some(9), Some(10), Some(11)],
    [Some(12), Some(13), Some(14), Some(15), Some(16), Some(17), None, None, None, None],
    [Some(18), Some(19), Some(20), Some(21), Some(22), Some(23), Some(24), Some(25), Some(26), Some(27)],
];

/// The resting level of every line: segments off, tubes deselected.
pub const SAFE_LEVEL: PinState = PinState::High;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Seven segment LED display.
    #[serde(alias = "segment")]
    Led,
    /// Nixie tubes, one line per digit value.
    #[serde(alias = "nixie")]
    Tube,
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClockKind::Led => write!(f, "led"),
            ClockKind::Tube => write!(f, "tube"),
        }
    }
}

/// What a single write is meant to do, kept for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Segment { position: usize, segment: usize, lit: bool },
    Tube { position: usize, digit: usize, active: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWrite {
    pub line: usize,
    pub level: PinState,
    pub target: Target,
}

impl fmt::Display for LineWrite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let level = match self.level {
            PinState::High => "HIGH",
            PinState::Low => "LOW",
        };
        match self.target {
            Target::Segment { position, segment, lit } => write!(
                f,
                "line {} -> {} (position {}, segment {} {})",
                self.line,
                level,
                position,
                segment,
                if lit { "on" } else { "off" }
            ),
            Target::Tube { position, digit, active } => write!(
                f,
                "line {} -> {} (position {}, digit {} {})",
                self.line,
                level,
                position,
                digit,
                if active { "selected" } else { "deselected" }
            ),
        }
    }
}

/// 28 writes, one per segment. A lit segment pulls its line LOW.
pub fn segment_plan(display: &DisplayString) -> Result<Vec<LineWrite>, EncodingError> {
    let mut plan = Vec::with_capacity(LINE_COUNT);
    for (position, &digit) in display.digits().iter().enumerate() {
        let pattern = pattern_for(digit)?;
        for (segment, &lit) in pattern.iter().enumerate() {
            plan.push(LineWrite {
                line: SEGMENT_LINES[position][segment],
                level: PinState::from(!lit),
                target: Target::Segment { position, segment, lit },
            });
        }
    }
    Ok(plan)
}

/// Per tube: deselect every wired line, then pull the wanted digit's line LOW.
/// A blank or unwired digit leaves the tube dark.
pub fn tube_plan(display: &DisplayString) -> Result<Vec<LineWrite>, EncodingError> {
    let mut plan = Vec::with_capacity(LINE_COUNT + POSITIONS);
    for (position, &digit) in display.digits().iter().enumerate() {
        // validates the digit even though tubes have no segments
        pattern_for(digit)?;
        let wanted = digit.to_digit(10).map(|d| d as usize);
        let wired = TUBE_LINES[position]
            .iter()
            .enumerate()
            .filter_map(|(d, line)| line.map(|line| (d, line)));
        for (d, line) in wired.clone() {
            plan.push(LineWrite {
                line,
                level: PinState::High,
                target: Target::Tube { position, digit: d, active: false },
            });
        }
        if let Some((d, line)) = wired.into_iter().find(|&(d, _)| Some(d) == wanted) {
            plan.push(LineWrite {
                line,
                level: PinState::Low,
                target: Target::Tube { position, digit: d, active: true },
            });
        }
    }
    Ok(plan)
}

pub fn plan(kind: ClockKind, display: &DisplayString) -> Result<Vec<LineWrite>, EncodingError> {
    match kind {
        ClockKind::Led => segment_plan(display),
        ClockKind::Tube => tube_plan(display),
    }
}
