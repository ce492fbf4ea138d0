//! Joystick classification and button edge cases

use morse_game_core::{GameConfig, InputReader, NavigationEvent};
use rstest::{fixture, rstest};

#[fixture]
fn reader() -> InputReader {
    let mut reader = InputReader::new(&GameConfig::default());
    reader.sample(0.0, 0.0, false);
    reader
}

#[rstest]
#[case(0.0, 0.0, NavigationEvent::None)]
#[case(0.5, 0.0, NavigationEvent::None)]
#[case(0.51, 0.0, NavigationEvent::Right)]
#[case(-0.9, 0.2, NavigationEvent::Left)]
#[case(0.1, 1.0, NavigationEvent::Up)]
#[case(0.0, -0.7, NavigationEvent::Down)]
#[case(0.7, 0.9, NavigationEvent::Up)]
#[case(-0.95, -0.6, NavigationEvent::Left)]
#[case(-0.4, 0.45, NavigationEvent::None)]
fn test_axis_classification(mut reader: InputReader, #[case] x: f32, #[case] y: f32, #[case] expected: NavigationEvent) {
    assert_eq!(reader.sample(x, y, false), expected);
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(19)]
fn test_held_direction_waits_for_repeat_delay(mut reader: InputReader, #[case] held_ticks: u32) {
    // Defaults: repeat after 400 ms at 20 ms per tick
    assert_eq!(reader.sample(1.0, 0.0, false), NavigationEvent::Right);
    for _ in 0..held_ticks {
        assert_eq!(reader.sample(1.0, 0.0, false), NavigationEvent::None);
    }
}

#[rstest]
fn test_repeat_fires_after_delay(mut reader: InputReader) {
    let events: Vec<_> = (0..30).map(|_| reader.sample(0.0, -1.0, false)).collect();
    let fired: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == NavigationEvent::Down)
        .map(|(i, _)| i)
        .collect();
    // First edge, then at 400 ms and every 150 ms (rounded down to whole ticks)
    assert_eq!(fired, [0, 20, 27]);
}

#[rstest]
fn test_button_beats_direction(mut reader: InputReader) {
    assert_eq!(reader.sample(1.0, 0.0, true), NavigationEvent::Select);
    assert!(reader.button_held());
}

#[rstest]
#[case(10)]
#[case(49)]
fn test_short_press_is_only_select(mut reader: InputReader, #[case] ticks: usize) {
    let events: Vec<_> = (0..ticks).map(|_| reader.sample(0.0, 0.0, true)).collect();
    assert_eq!(events[0], NavigationEvent::Select);
    assert!(events[1..].iter().all(|e| e.is_none()));
    assert_eq!(reader.sample(0.0, 0.0, false), NavigationEvent::None);
    assert!(!reader.button_held());
}

#[rstest]
fn test_long_press_reports_hold(mut reader: InputReader) {
    let events: Vec<_> = (0..60).map(|_| reader.sample(0.0, 0.0, true)).collect();
    assert_eq!(events.iter().filter(|e| **e == NavigationEvent::Select).count(), 1);
    assert_eq!(events.iter().filter(|e| **e == NavigationEvent::Hold).count(), 1);
    assert_eq!(events[50], NavigationEvent::Hold);
}
