//! The clock state machine.
//!
//! Once per tick the engine either adopts a submitted time or advances its
//! virtual clock by a second, then decides whether the output has to be
//! touched at all. Writes only happen when the shown digits change, or
//! exactly once when the display goes blank.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info, warn};

use crate::display::{DisplayState, DisplayString};
use crate::driver::OutputDriver;
use crate::error::DriveError;
use crate::input::TimeInput;
use crate::time::ClockTime;

pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    BlankRequested,
    Blanked,
}

/// What a tick did to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered(DisplayString),
    Blanked,
    Idle,
}

pub struct ClockEngine {
    time: ClockTime,
    state: EngineState,
    last_rendered: Option<DisplayString>,
    driver: Box<dyn OutputDriver>,
    input: TimeInput,
}

impl ClockEngine {
    pub fn new(start: ClockTime, driver: Box<dyn OutputDriver>, input: TimeInput) -> Self {
        info!(%start, driver = driver.describe(), "clock engine created");
        Self {
            time: start,
            state: EngineState::Running,
            last_rendered: None,
            driver,
            input,
        }
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }
    pub fn state(&self) -> EngineState {
        self.state
    }
    pub fn last_rendered(&self) -> Option<DisplayString> {
        self.last_rendered
    }
    /// What the output is showing, as far as the engine knows.
    pub fn display_state(&self) -> Option<DisplayState> {
        match (self.state, self.last_rendered) {
            (EngineState::Blanked, _) => Some(DisplayState::blanked()),
            (_, Some(display)) => Some(DisplayState::showing(display)),
            (_, None) => None,
        }
    }

    pub fn tick(&mut self) -> Result<TickOutcome, DriveError> {
        let pending = self.input.drain();
        match pending.time {
            Some(time) => {
                info!(%time, "adopting submitted time");
                self.time = time;
                self.state = EngineState::Running;
                // forces a refresh even if the digits are unchanged
                self.last_rendered = None;
            }
            None => self.time = self.time.tick(),
        }

        // an override always cancels blanking, even one requested after it
        let blank = pending.blank && pending.time.is_none();
        match (self.state, blank) {
            (EngineState::Running, true) => self.state = EngineState::BlankRequested,
            (EngineState::BlankRequested, false) => self.state = EngineState::Running,
            _ => {}
        }

        let candidate = DisplayString::from(self.time);
        match self.state {
            EngineState::BlankRequested => {
                info!("Blanking display and stopping updates until a new time is input");
                self.state = EngineState::Blanked;
                self.last_rendered = Some(DisplayString::BLANK);
                self.driver.render(&DisplayString::BLANK)?;
                Ok(TickOutcome::Blanked)
            }
            EngineState::Running if self.last_rendered != Some(candidate) => {
                info!(display = %candidate, "setting display");
                // recorded before writing so a failing line is not retried every second
                self.last_rendered = Some(candidate);
                self.driver.render(&candidate)?;
                Ok(TickOutcome::Rendered(candidate))
            }
            _ => Ok(TickOutcome::Idle),
        }
    }

    /// Leaves every line in its resting state.
    pub fn shutdown(&mut self) -> Result<(), DriveError> {
        info!(driver = self.driver.describe(), "returning display lines to rest");
        self.driver.clear()
    }
}

/// Ticks `engine` every second until `shutdown` flips to true.
pub async fn run(mut engine: ClockEngine, mut shutdown: watch::Receiver<bool>) -> ClockEngine {
    let mut ticker = interval(TICK);
    // a late tick must still count as a second of virtual time
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = engine.tick() {
                    error!(error = %e, "display write failed");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    if let Err(e) = engine.shutdown() {
        warn!(error = %e, "cleanup of display lines failed");
    }
    engine
}
