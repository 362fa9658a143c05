//! ledclock – drives a four digit seven segment or nixie tube clock.
//!
//! The clock shows `HHMM` from a virtual time that advances once per second.
//! Anyone holding a [`input::TimeInput`] may override that time or blank the
//! display; the [`engine::ClockEngine`] picks such requests up on its next
//! tick and only writes to the output when the shown digits actually change.
//!
//! ## Modules
//! * [`segment`] – digit to seven segment pattern table.
//! * [`display`] – the four digit [`display::DisplayString`] and latched state.
//! * [`layout`] – which physical line drives which segment or tube digit.
//! * [`driver`] – the [`driver::OutputDriver`] variants: seven segment,
//!   nixie tube and dry run.
//! * [`engine`] – the tick driven state machine.
//! * [`input`] – validation of `HHMM` input and the shared request slot.
//! * [`server`] – HTTP form and JSON endpoints feeding the request slot.
//! * [`config`] – layered startup settings.
//!
//! ## Quick Start
//! ```
//! use ledclock::driver::DryRunDriver;
//! use ledclock::engine::{ClockEngine, TickOutcome};
//! use ledclock::input::TimeInput;
//! use ledclock::layout::ClockKind;
//! use ledclock::time::ClockTime;
//!
//! let input = TimeInput::new();
//! let start = ClockTime::new(12, 30, 0).unwrap();
//! let mut engine = ClockEngine::new(start, Box::new(DryRunDriver::new(ClockKind::Led)), input.clone());
//! assert!(matches!(engine.tick().unwrap(), TickOutcome::Rendered(_)));
//! input.submit_time("0745").unwrap();
//! engine.tick().unwrap();
//! assert_eq!(engine.last_rendered().unwrap().to_string(), "0745");
//! ```

pub mod config;
pub mod display;
pub mod driver;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod segment;
pub mod server;
pub mod time;
