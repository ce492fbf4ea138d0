//! embedded-hal pin adapters against mocked GPIO

use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use morse_game_core::{DigitalButton, Led, PinButton, PinLed};

#[test]
fn test_pin_led_drives_high_when_lit() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut led = PinLed::new(PinMock::new(&expectations), false);
    led.on().unwrap();
    led.off().unwrap();
    led.release().done();
}

#[test]
fn test_inverted_pin_led_sinks_current() {
    let expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let mut led = PinLed::new(PinMock::new(&expectations), true);
    led.on().unwrap();
    led.off().unwrap();
    led.release().done();
}

#[test]
fn test_active_low_button() {
    let expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ];
    let mut button = PinButton::new(PinMock::new(&expectations), true);
    assert!(!button.read().unwrap());
    assert!(button.read().unwrap());
    button.release().done();
}

#[test]
fn test_active_high_button() {
    let expectations = [
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
    ];
    let mut button = PinButton::new(PinMock::new(&expectations), false);
    assert!(!button.read().unwrap());
    assert!(button.read().unwrap());
    button.release().done();
}
