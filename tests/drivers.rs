mod common;

use common::MemoryBank;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, PinState};
use ledclock::display::DisplayString;
use ledclock::driver::{self, DryRunDriver, NixieTubeDriver, OutputDriver, PinBank, SevenSegmentDriver, TRACE_LIMIT};
use ledclock::time::ClockTime;
use ledclock::error::DriveError;
use ledclock::layout::{ClockKind, SEGMENT_LINES, TUBE_LINES};

fn display(s: &str) -> DisplayString {
    let c: Vec<char> = s.chars().collect();
    DisplayString::new([c[0], c[1], c[2], c[3]]).unwrap()
}

#[test]
fn seven_segment_writes_every_line_with_inverted_polarity() {
    let mut driver = SevenSegmentDriver::new(MemoryBank::default());
    driver.render(&display("1234")).unwrap();
    let bank = driver.into_inner();
    assert_eq!(bank.writes.len(), 28);
    // position 0 shows "1": only upper right and upper left lit
    let lit: Vec<bool> = SEGMENT_LINES[0]
        .iter()
        .map(|&line| bank.levels[line] == Some(PinState::Low))
        .collect();
    assert_eq!(lit, vec![false, true, true, false, false, false, false]);
    // position 3 shows "4"
    assert_eq!(bank.levels[SEGMENT_LINES[3][0]], Some(PinState::High));
    assert_eq!(bank.levels[SEGMENT_LINES[3][6]], Some(PinState::Low));
}

#[test]
fn seven_segment_blank_turns_everything_off() {
    let mut driver = SevenSegmentDriver::new(MemoryBank::default());
    driver.render(&DisplayString::BLANK).unwrap();
    let bank = driver.into_inner();
    assert!(bank.levels.iter().all(|l| *l == Some(PinState::High)));
}

#[test]
fn nixie_selects_exactly_one_line_per_tube() {
    let mut driver = NixieTubeDriver::new(MemoryBank::default());
    driver.render(&display("1359")).unwrap();
    let bank = driver.into_inner();
    for (position, digit) in [(0, 1), (1, 3), (2, 5), (3, 9)] {
        let active: Vec<usize> = TUBE_LINES[position]
            .iter()
            .flatten()
            .copied()
            .filter(|&line| bank.levels[line] == Some(PinState::Low))
            .collect();
        assert_eq!(active, vec![TUBE_LINES[position][digit].unwrap()], "tube {position}");
    }
}

#[test]
fn nixie_deselects_before_selecting() {
    let mut driver = NixieTubeDriver::new(MemoryBank::default());
    driver.render(&display("2000")).unwrap();
    let bank = driver.into_inner();
    // hour tens tube: lines 0 and 1 go high, then line 1 (digit 2) low
    assert_eq!(
        bank.writes[..3],
        [(0, PinState::High), (1, PinState::High), (1, PinState::Low)]
    );
}

#[test]
fn nixie_unwired_digit_leaves_tube_dark() {
    let mut driver = NixieTubeDriver::new(MemoryBank::default());
    // hour tens has no line for 0
    driver.render(&display("0930")).unwrap();
    let bank = driver.into_inner();
    assert_eq!(bank.levels[0], Some(PinState::High));
    assert_eq!(bank.levels[1], Some(PinState::High));
    assert_eq!(bank.levels[TUBE_LINES[1][9].unwrap()], Some(PinState::Low));
}

#[test]
fn clear_rests_all_lines_high() {
    let mut driver = NixieTubeDriver::new(MemoryBank::default());
    driver.render(&display("1234")).unwrap();
    driver.clear().unwrap();
    let bank = driver.into_inner();
    assert!(bank.levels.iter().all(|l| *l == Some(PinState::High)));
}

#[test]
fn dry_run_traces_instead_of_writing() {
    let mut driver = DryRunDriver::new(ClockKind::Led);
    driver.render(&display("0800")).unwrap();
    let trace = driver.take_trace();
    assert_eq!(trace.len(), 28);
    assert_eq!(trace[0], "line 0 -> LOW (position 0, segment 0 on)");
    assert_eq!(trace[6], "line 6 -> HIGH (position 0, segment 6 off)");
    assert!(driver.trace().is_empty());

    let mut tubes = DryRunDriver::new(ClockKind::Tube);
    tubes.render(&display("1000")).unwrap();
    assert!(tubes.trace().iter().any(|l| l == "line 0 -> LOW (position 0, digit 1 selected)"));
    assert!(tubes.describe().contains("dry run"));
}

#[test]
fn dry_run_trace_stays_bounded() {
    let mut driver = DryRunDriver::new(ClockKind::Tube);
    let mut time = ClockTime::new(0, 0, 0).unwrap();
    for _ in 0..24 * 60 {
        driver.render(&DisplayString::from(time)).unwrap();
        for _ in 0..60 {
            time = time.tick();
        }
    }
    assert_eq!(driver.trace().len(), TRACE_LIMIT);
    // the newest writes are the ones kept: 23:59 selects digit 9 last
    assert_eq!(
        driver.trace().back().map(String::as_str),
        Some("line 27 -> LOW (position 3, digit 9 selected)")
    );
    driver.clear().unwrap();
    assert_eq!(driver.trace().len(), TRACE_LIMIT);
}

struct FlakyPin {
    broken: bool,
    state: PinState,
}

impl ErrorType for FlakyPin {
    type Error = ErrorKind;
}

impl OutputPin for FlakyPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.state = PinState::Low;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.state = PinState::High;
        Ok(())
    }
}

fn pins(broken_line: Option<usize>) -> Vec<FlakyPin> {
    (0..28)
        .map(|line| FlakyPin { broken: Some(line) == broken_line, state: PinState::High })
        .collect()
}

#[test]
fn pin_bank_drives_embedded_hal_pins() {
    let bank = PinBank::new(pins(None)).unwrap();
    let mut driver = driver::select(ClockKind::Led, Some(bank));
    assert_eq!(driver.describe(), "seven segment");
    driver.render(&display("8888")).unwrap();
}

#[test]
fn pin_failure_surfaces_as_drive_error() {
    let bank = PinBank::new(pins(Some(9))).unwrap();
    let mut driver = SevenSegmentDriver::new(bank);
    match driver.render(&display("1200")) {
        Err(DriveError::Line { line, .. }) => assert_eq!(line, 9),
        other => panic!("expected a line error, got {other:?}"),
    }
}

#[test]
fn pin_bank_needs_all_lines() {
    let mut short = pins(None);
    short.truncate(20);
    assert!(PinBank::new(short).is_err());
}

#[test]
fn select_without_hardware_is_a_dry_run() {
    let driver = driver::select::<PinBank<FlakyPin>>(ClockKind::Tube, None);
    assert_eq!(driver.describe(), "nixie tube (dry run)");
}
