use std::fmt;

use crate::error::EncodingError;
use crate::segment::{BLANK, is_digit};
use crate::time::ClockTime;

pub const POSITIONS: usize = 4;

/// Four digits in display order: hour tens, hour units, minute tens, minute units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayString([char; POSITIONS]);

impl DisplayString {
    pub const BLANK: DisplayString = DisplayString([BLANK; POSITIONS]);

    pub fn new(digits: [char; POSITIONS]) -> Result<Self, EncodingError> {
        match digits.iter().find(|&&d| !is_digit(d)) {
            Some(&digit) => Err(EncodingError { digit }),
            None => Ok(DisplayString(digits)),
        }
    }
    pub fn digits(&self) -> &[char; POSITIONS] {
        &self.0
    }
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl From<ClockTime> for DisplayString {
    fn from(time: ClockTime) -> Self {
        let (h, m) = (time.hour(), time.minute());
        let digit = |n: u32| char::from_digit(n % 10, 10).unwrap_or(BLANK);
        DisplayString([digit(h / 10), digit(h), digit(m / 10), digit(m)])
    }
}

impl fmt::Display for DisplayString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// What is currently latched on the physical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub display: DisplayString,
    pub blanked: bool,
}

impl DisplayState {
    pub fn showing(display: DisplayString) -> Self {
        Self { display, blanked: false }
    }
    pub fn blanked() -> Self {
        Self { display: DisplayString::BLANK, blanked: true }
    }
}
