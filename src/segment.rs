//! Seven segment encoding of the clock digits.
//!
//! Segment order, as wired on the clock:
//! ```text
//!     000
//!    2   1
//!    2   1
//!     666
//!    4   3
//!    4   3
//!     555
//! ```
//! 0 top, 1 upper right, 2 upper left, 3 bottom right, 4 bottom left,
//! 5 bottom, 6 crossbar.

use crate::error::EncodingError;

pub const SEGMENT_COUNT: usize = 7;

/// One flag per segment, `true` meaning lit.
pub type SegmentPattern = [bool; SEGMENT_COUNT];

pub const BLANK: char = ' ';

const X: bool = true;
const O: bool = false;

// indexed by digit value, blank last
const PATTERNS: [SegmentPattern; 11] = [
    [X, X, X, X, X, X, O], // 0
    [O, X, X, O, O, O, O], // 1
    [X, X, O, X, X, O, X], // 2
    [X, X, X, X, O, O, X], // 3
    [O, X, X, O, O, X, X], // 4
    [X, O, X, X, O, X, X], // 5
    [X, O, X, X, X, X, X], // 6
    [X, X, X, O, O, O, O], // 7
    [X, X, X, X, X, X, X], // 8
    [X, X, X, X, O, X, X], // 9
    [O, O, O, O, O, O, O], // blank
];

/// True for the characters a display can show: `0-9` and blank.
pub fn is_digit(c: char) -> bool {
    c == BLANK || c.is_ascii_digit()
}

pub fn pattern_for(digit: char) -> Result<SegmentPattern, EncodingError> {
    match digit {
        BLANK => Ok(PATTERNS[10]),
        '0'..='9' => Ok(PATTERNS[digit as usize - '0' as usize]),
        _ => Err(EncodingError { digit }),
    }
}
