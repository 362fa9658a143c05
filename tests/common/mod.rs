#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use embedded_hal::digital::PinState;
use ledclock::display::DisplayString;
use ledclock::driver::{LineBank, OutputDriver};
use ledclock::error::DriveError;

/// Remembers every display it was asked to render.
#[derive(Clone, Default)]
pub struct Recorder {
    pub renders: Arc<Mutex<Vec<DisplayString>>>,
    pub failing: Arc<AtomicBool>,
    pub clears: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn rendered(&self) -> Vec<String> {
        self.renders.lock().unwrap().iter().map(|d| d.to_string()).collect()
    }
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl OutputDriver for Recorder {
    fn render(&mut self, display: &DisplayString) -> Result<(), DriveError> {
        self.renders.lock().unwrap().push(*display);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DriveError::Line { line: 3, message: "stuck".into() });
        }
        Ok(())
    }
    fn clear(&mut self) -> Result<(), DriveError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn describe(&self) -> &'static str {
        "recorder"
    }
}

/// Line bank keeping the last level of each line and every write in order.
#[derive(Default)]
pub struct MemoryBank {
    pub levels: [Option<PinState>; 28],
    pub writes: Vec<(usize, PinState)>,
}

impl LineBank for MemoryBank {
    fn set(&mut self, line: usize, level: PinState) -> Result<(), DriveError> {
        self.levels[line] = Some(level);
        self.writes.push((line, level));
        Ok(())
    }
}
