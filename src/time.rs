// used for the time of day the clock counts with
use chrono::{Local, NaiveTime, TimeDelta, Timelike};
// used to print out readable forms of a time
use std::fmt;

/// Time of day with second granularity. Dates are irrelevant to the clock,
/// so arithmetic simply wraps around midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Returns `None` unless hour < 24, minute < 60 and second < 60.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(ClockTime)
    }
    /// Local wall time, truncated to whole seconds.
    pub fn now() -> Self {
        let now = Local::now().time();
        // a leap second shows up as second 59
        let second = now.second().min(59);
        Self::new(now.hour(), now.minute(), second).unwrap_or_default()
    }
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
    pub fn second(&self) -> u32 {
        self.0.second()
    }
    /// The time one second later, wrapping 23:59:59 to 00:00:00.
    pub fn tick(&self) -> Self {
        let (next, _) = self.0.overflowing_add_signed(TimeDelta::seconds(1));
        ClockTime(next)
    }
    /// Zero padded `HHMM`.
    pub fn hhmm(&self) -> String {
        format!("{:02}{:02}", self.hour(), self.minute())
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        // drop sub-second precision so ticks land on whole seconds
        let time = time.with_nanosecond(0).unwrap_or(time);
        ClockTime(time)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}
