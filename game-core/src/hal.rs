//! Hardware Abstraction Layer: peripheral capabilities consumed by the game

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::Peripheral;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Sampling an input failed
    ReadError,
    /// Driving an output or bus transfer failed
    WriteError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::ReadError => write!(f, "Input read failed"),
            HalError::WriteError => write!(f, "Output write failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Horizontal text placement
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justify {
    Left,
    Center,
    Right,
}

/// Vertical text placement
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Top,
    Center,
    Bottom,
}

/// Text rendering hints passed through to the screen driver
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextLayout {
    pub font_size: u8,
    pub color: (u8, u8, u8),
    pub background: (u8, u8, u8),
    pub justify: Justify,
    pub align: Align,
    /// Clockwise rotation in degrees
    pub rotation: u16,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            font_size: 24,
            color: (255, 255, 255),
            background: (0, 0, 0),
            justify: Justify::Center,
            align: Align::Top,
            rotation: 90,
        }
    }
}

/// Text screen
pub trait DisplayText {
    fn show(&mut self, text: &str, layout: &TextLayout) -> Result<(), HalError>;
    fn clear(&mut self) -> Result<(), HalError>;
}

/// Seven-segment countdown display
pub trait SegmentDisplay {
    fn show_countdown(&mut self, remaining_ms: u32) -> Result<(), HalError>;
}

/// Buzzer; `emit` starts a tone that the driver ends after `duration_ms`
pub trait Buzzer {
    fn emit(&mut self, duration_ms: u32, tone_hz: Option<u32>) -> Result<(), HalError>;
    fn silence(&mut self) -> Result<(), HalError>;
}

/// Single status LED
pub trait Led {
    fn on(&mut self) -> Result<(), HalError>;
    fn off(&mut self) -> Result<(), HalError>;
}

/// Joystick axis normalized to [-1.0, 1.0]
pub trait AnalogAxis {
    fn read(&mut self) -> Result<f32, HalError>;
}

/// Digital button, `true` while pressed
pub trait DigitalButton {
    fn read(&mut self) -> Result<bool, HalError>;
}

/// Complete game HAL interface
pub trait GameHal {
    type Screen: DisplayText;
    type Segments: SegmentDisplay;
    type Buzzer: Buzzer;
    type RedLed: Led;
    type GreenLed: Led;
    type XAxis: AnalogAxis;
    type YAxis: AnalogAxis;
    type Button: DigitalButton;

    /// Initialize hardware; reports the first peripheral that failed
    fn initialize(&mut self) -> Result<(), Peripheral>;

    fn screen(&mut self) -> &mut Self::Screen;
    fn segments(&mut self) -> &mut Self::Segments;
    fn buzzer(&mut self) -> &mut Self::Buzzer;
    fn red_led(&mut self) -> &mut Self::RedLed;
    fn green_led(&mut self) -> &mut Self::GreenLed;
    fn x_axis(&mut self) -> &mut Self::XAxis;
    fn y_axis(&mut self) -> &mut Self::YAxis;
    fn button(&mut self) -> &mut Self::Button;

    /// Both axes and the button at once, for a single input poll
    fn joystick(&mut self) -> (&mut Self::XAxis, &mut Self::YAxis, &mut Self::Button);

    /// Power the peripherals down
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

/// LED driven by an embedded-hal output pin
pub struct PinLed<P> {
    pin: P,
    inverted: bool,
}

impl<P> PinLed<P>
where
    P: OutputPin,
{
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    pub fn release(self) -> P {
        self.pin
    }

    fn set(&mut self, lit: bool) -> Result<(), HalError> {
        let level = if self.inverted { !lit } else { lit };
        if level {
            self.pin.set_high().map_err(|_| HalError::GpioError)
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)
        }
    }
}

impl<P> Led for PinLed<P>
where
    P: OutputPin,
{
    fn on(&mut self) -> Result<(), HalError> {
        self.set(true)
    }

    fn off(&mut self) -> Result<(), HalError> {
        self.set(false)
    }
}

/// Button read from an embedded-hal input pin
pub struct PinButton<P> {
    pin: P,
    active_low: bool,
}

impl<P> PinButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> DigitalButton for PinButton<P>
where
    P: InputPin,
{
    fn read(&mut self) -> Result<bool, HalError> {
        if self.active_low {
            self.pin.is_low().map_err(|_| HalError::ReadError)
        } else {
            self.pin.is_high().map_err(|_| HalError::ReadError)
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::string::String;
    use std::vec::Vec;

    /// Everything a rig has been asked to do, in call order
    #[derive(Clone, Debug, PartialEq)]
    pub enum HalCall {
        Show(String),
        Clear,
        Countdown(u32),
        Emit(u32),
        Silence,
        LedOn(crate::types::LedColor),
        LedOff(crate::types::LedColor),
    }

    /// Shared call log so tests can inspect a rig moved into a controller
    #[derive(Clone, Default)]
    pub struct CallLog {
        calls: Rc<RefCell<Vec<HalCall>>>,
    }

    impl CallLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, call: HalCall) {
            self.calls.borrow_mut().push(call);
        }

        pub fn calls(&self) -> Vec<HalCall> {
            self.calls.borrow().clone()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }

        pub fn contains(&self, call: &HalCall) -> bool {
            self.calls.borrow().contains(call)
        }

        pub fn count(&self, call: &HalCall) -> usize {
            self.calls.borrow().iter().filter(|c| *c == call).count()
        }

        /// Most recent text shown on the screen
        pub fn last_text(&self) -> Option<String> {
            self.calls.borrow().iter().rev().find_map(|c| match c {
                HalCall::Show(text) => Some(text.clone()),
                _ => None,
            })
        }

        /// Most recent countdown value
        pub fn last_countdown(&self) -> Option<u32> {
            self.calls.borrow().iter().rev().find_map(|c| match c {
                HalCall::Countdown(ms) => Some(*ms),
                _ => None,
            })
        }
    }

    /// Switch that makes a mock peripheral fail on demand
    #[derive(Clone, Default)]
    pub struct FaultSwitch {
        fail: Rc<RefCell<bool>>,
    }

    impl FaultSwitch {
        pub fn set(&self, fail: bool) {
            *self.fail.borrow_mut() = fail;
        }

        fn check(&self, err: HalError) -> Result<(), HalError> {
            if *self.fail.borrow() {
                Err(err)
            } else {
                Ok(())
            }
        }
    }

    pub struct MockScreen {
        log: CallLog,
    }

    impl DisplayText for MockScreen {
        fn show(&mut self, text: &str, _layout: &TextLayout) -> Result<(), HalError> {
            self.log.push(HalCall::Show(String::from(text)));
            Ok(())
        }

        fn clear(&mut self) -> Result<(), HalError> {
            self.log.push(HalCall::Clear);
            Ok(())
        }
    }

    pub struct MockSegments {
        log: CallLog,
    }

    impl SegmentDisplay for MockSegments {
        fn show_countdown(&mut self, remaining_ms: u32) -> Result<(), HalError> {
            self.log.push(HalCall::Countdown(remaining_ms));
            Ok(())
        }
    }

    pub struct MockBuzzer {
        log: CallLog,
        fault: FaultSwitch,
    }

    impl Buzzer for MockBuzzer {
        fn emit(&mut self, duration_ms: u32, _tone_hz: Option<u32>) -> Result<(), HalError> {
            self.fault.check(HalError::WriteError)?;
            self.log.push(HalCall::Emit(duration_ms));
            Ok(())
        }

        fn silence(&mut self) -> Result<(), HalError> {
            self.log.push(HalCall::Silence);
            Ok(())
        }
    }

    pub struct MockLed {
        color: crate::types::LedColor,
        log: CallLog,
        lit: bool,
    }

    impl MockLed {
        pub fn is_lit(&self) -> bool {
            self.lit
        }
    }

    impl Led for MockLed {
        fn on(&mut self) -> Result<(), HalError> {
            self.lit = true;
            self.log.push(HalCall::LedOn(self.color));
            Ok(())
        }

        fn off(&mut self) -> Result<(), HalError> {
            self.lit = false;
            self.log.push(HalCall::LedOff(self.color));
            Ok(())
        }
    }

    /// Axis whose position is set by the test
    #[derive(Clone, Default)]
    pub struct MockAxis {
        value: Rc<RefCell<f32>>,
        fault: FaultSwitch,
    }

    impl MockAxis {
        pub fn set(&self, value: f32) {
            *self.value.borrow_mut() = value;
        }

        pub fn fault(&self) -> &FaultSwitch {
            &self.fault
        }
    }

    impl AnalogAxis for MockAxis {
        fn read(&mut self) -> Result<f32, HalError> {
            self.fault.check(HalError::ReadError)?;
            Ok(*self.value.borrow())
        }
    }

    /// Button whose level is set by the test
    #[derive(Clone, Default)]
    pub struct MockButton {
        pressed: Rc<RefCell<bool>>,
    }

    impl MockButton {
        pub fn set_pressed(&self, pressed: bool) {
            *self.pressed.borrow_mut() = pressed;
        }
    }

    impl DigitalButton for MockButton {
        fn read(&mut self) -> Result<bool, HalError> {
            Ok(*self.pressed.borrow())
        }
    }

    /// Handles a test keeps after moving a [`MockGameHal`] into a controller
    #[derive(Clone)]
    pub struct MockHandles {
        pub log: CallLog,
        pub x: MockAxis,
        pub y: MockAxis,
        pub button: MockButton,
        pub buzzer_fault: FaultSwitch,
    }

    /// Mock hardware collection
    pub struct MockGameHal {
        pub screen: MockScreen,
        pub segments: MockSegments,
        pub buzzer: MockBuzzer,
        pub red_led: MockLed,
        pub green_led: MockLed,
        pub x_axis: MockAxis,
        pub y_axis: MockAxis,
        pub button: MockButton,
        /// Peripheral reported as failing by `initialize`
        pub init_failure: Option<Peripheral>,
    }

    impl MockGameHal {
        pub fn new() -> (Self, MockHandles) {
            let log = CallLog::new();
            let buzzer_fault = FaultSwitch::default();
            let x = MockAxis::default();
            let y = MockAxis::default();
            let button = MockButton::default();
            let hal = Self {
                screen: MockScreen { log: log.clone() },
                segments: MockSegments { log: log.clone() },
                buzzer: MockBuzzer {
                    log: log.clone(),
                    fault: buzzer_fault.clone(),
                },
                red_led: MockLed {
                    color: crate::types::LedColor::Red,
                    log: log.clone(),
                    lit: false,
                },
                green_led: MockLed {
                    color: crate::types::LedColor::Green,
                    log: log.clone(),
                    lit: false,
                },
                x_axis: x.clone(),
                y_axis: y.clone(),
                button: button.clone(),
                init_failure: None,
            };
            let handles = MockHandles {
                log,
                x,
                y,
                button,
                buzzer_fault,
            };
            (hal, handles)
        }
    }

    impl GameHal for MockGameHal {
        type Screen = MockScreen;
        type Segments = MockSegments;
        type Buzzer = MockBuzzer;
        type RedLed = MockLed;
        type GreenLed = MockLed;
        type XAxis = MockAxis;
        type YAxis = MockAxis;
        type Button = MockButton;

        fn initialize(&mut self) -> Result<(), Peripheral> {
            match self.init_failure {
                Some(peripheral) => Err(peripheral),
                None => Ok(()),
            }
        }

        fn screen(&mut self) -> &mut MockScreen {
            &mut self.screen
        }

        fn segments(&mut self) -> &mut MockSegments {
            &mut self.segments
        }

        fn buzzer(&mut self) -> &mut MockBuzzer {
            &mut self.buzzer
        }

        fn red_led(&mut self) -> &mut MockLed {
            &mut self.red_led
        }

        fn green_led(&mut self) -> &mut MockLed {
            &mut self.green_led
        }

        fn x_axis(&mut self) -> &mut MockAxis {
            &mut self.x_axis
        }

        fn y_axis(&mut self) -> &mut MockAxis {
            &mut self.y_axis
        }

        fn button(&mut self) -> &mut MockButton {
            &mut self.button
        }

        fn joystick(&mut self) -> (&mut MockAxis, &mut MockAxis, &mut MockButton) {
            (&mut self.x_axis, &mut self.y_axis, &mut self.button)
        }
    }
}
