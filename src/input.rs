//! Inbound requests for the clock: manual time overrides and blanking.
//!
//! Producers (the HTTP handlers) only publish, the tick loop only drains.
//! Both sides meet in a single mutex guarded slot; a newer override simply
//! replaces one the engine has not picked up yet.

use std::sync::{Arc, Mutex, MutexGuard};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::error::ValidationError;
use crate::time::ClockTime;

lazy_static! {
    static ref HHMM: Regex = Regex::new(r"^([0-9]{2})([0-9]{2})$").unwrap();
}

/// Parses `HHMM` into a time at second zero.
pub fn parse_hhmm(raw: &str) -> Result<ClockTime, ValidationError> {
    let raw = raw.trim();
    let length = raw.chars().count();
    if length != 4 {
        return Err(ValidationError::WrongLength(length));
    }
    let captures = HHMM
        .captures(raw)
        .ok_or_else(|| ValidationError::NotNumeric(raw.to_string()))?;
    // two ASCII digits always parse
    let hour: u32 = captures[1].parse().unwrap_or(u32::MAX);
    let minute: u32 = captures[2].parse().unwrap_or(u32::MAX);
    if hour > 23 {
        return Err(ValidationError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ValidationError::MinuteOutOfRange(minute));
    }
    ClockTime::new(hour, minute, 0).ok_or(ValidationError::HourOutOfRange(hour))
}

/// Everything published since the last drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    pub time: Option<ClockTime>,
    pub blank: bool,
}

/// Cloneable handle on the shared request slot.
#[derive(Debug, Clone, Default)]
pub struct TimeInput {
    slot: Arc<Mutex<Pending>>,
}

impl TimeInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        // the slot is plain data, a panicking holder cannot leave it half written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Validates `raw` and, if good, queues it for the next tick.
    /// An accepted override also withdraws any blank request.
    pub fn submit_time(&self, raw: &str) -> Result<ClockTime, ValidationError> {
        let time = parse_hhmm(raw).inspect_err(|e| warn!(input = raw, error = %e, "rejected time"))?;
        let mut pending = self.lock();
        if pending.time.replace(time).is_some() {
            info!(%time, "replacing unconsumed time override");
        } else {
            info!(%time, "time override accepted");
        }
        pending.blank = false;
        Ok(time)
    }

    pub fn request_blank(&self) {
        info!("blank requested");
        self.lock().blank = true;
    }

    /// Withdraws a blank request. A display that is already blank stays so
    /// until a new time is submitted.
    pub fn cancel_blank(&self) {
        info!("blank request withdrawn");
        self.lock().blank = false;
    }

    /// Takes the pending override and reads the blank flag in one step.
    /// Taking an override also clears the flag: a new time always cancels blanking.
    pub fn drain(&self) -> Pending {
        let mut pending = self.lock();
        let time = pending.time.take();
        if time.is_some() {
            pending.blank = false;
            return Pending { time, blank: false };
        }
        Pending { time, blank: pending.blank }
    }

    /// Looks at the slot without consuming anything.
    pub fn peek(&self) -> Pending {
        *self.lock()
    }
}
