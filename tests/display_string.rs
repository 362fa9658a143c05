use ledclock::display::{DisplayState, DisplayString};
use ledclock::time::ClockTime;

#[test]
fn display_is_zero_padded_hhmm() {
    let t = ClockTime::new(3, 7, 45).unwrap();
    assert_eq!(DisplayString::from(t).to_string(), "0307");
    assert_eq!(t.hhmm(), "0307");
}

#[test]
fn every_minute_of_the_day_formats_as_hhmm() {
    for hour in 0..24 {
        for minute in 0..60 {
            let t = ClockTime::new(hour, minute, 59).unwrap();
            assert_eq!(DisplayString::from(t).to_string(), format!("{hour:02}{minute:02}"));
        }
    }
}

#[test]
fn blank_display() {
    assert_eq!(DisplayString::BLANK.to_string(), "    ");
    assert!(DisplayString::BLANK.is_blank());
    assert!(!DisplayString::new(['1', ' ', ' ', ' ']).unwrap().is_blank());
    let state = DisplayState::blanked();
    assert!(state.blanked);
    assert!(state.display.is_blank());
}

#[test]
fn rejects_characters_that_cannot_be_shown() {
    let err = DisplayString::new(['1', '2', ':', '3']).unwrap_err();
    assert_eq!(err.digit, ':');
}

#[test]
fn time_wraps_at_midnight() {
    let t = ClockTime::new(23, 59, 59).unwrap();
    assert_eq!(t.tick(), ClockTime::new(0, 0, 0).unwrap());
    let t = ClockTime::new(9, 59, 59).unwrap().tick();
    assert_eq!((t.hour(), t.minute(), t.second()), (10, 0, 0));
}
