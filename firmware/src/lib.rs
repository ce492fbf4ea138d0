//! Console peripherals and a scripted joystick for running the game on a host

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use morse_game_core::*;

pub use crate::console_hardware::*;
pub use crate::scripted_joystick::*;

pub mod console_hardware {
    //! Peripherals that print what real hardware would do

    use morse_game_core::error::Peripheral;
    use morse_game_core::hal::{Buzzer, DisplayText, HalError, Led, SegmentDisplay, TextLayout};

    use crate::scripted_joystick::{ScriptedAxis, ScriptedButton};

    #[derive(Debug, Default)]
    pub struct ConsoleScreen;

    impl DisplayText for ConsoleScreen {
        fn show(&mut self, text: &str, _layout: &TextLayout) -> Result<(), HalError> {
            println!("+------------------------------");
            for line in text.lines() {
                println!("| {}", line);
            }
            println!("+------------------------------");
            Ok(())
        }

        fn clear(&mut self) -> Result<(), HalError> {
            println!("[screen cleared]");
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct ConsoleSegments;

    impl SegmentDisplay for ConsoleSegments {
        fn show_countdown(&mut self, remaining_ms: u32) -> Result<(), HalError> {
            println!("[{:>3}s]", (remaining_ms + 999) / 1000);
            Ok(())
        }
    }

    /// Buzzer that logs each tone
    #[derive(Debug, Default)]
    pub struct ConsoleBuzzer {
        sounding: bool,
    }

    impl ConsoleBuzzer {
        pub fn is_sounding(&self) -> bool {
            self.sounding
        }
    }

    impl Buzzer for ConsoleBuzzer {
        fn emit(&mut self, duration_ms: u32, tone_hz: Option<u32>) -> Result<(), HalError> {
            self.sounding = true;
            match tone_hz {
                Some(hz) => println!("♪ {} Hz {} ms", hz, duration_ms),
                None => println!("♪ {} ms", duration_ms),
            }
            Ok(())
        }

        fn silence(&mut self) -> Result<(), HalError> {
            self.sounding = false;
            Ok(())
        }
    }

    #[derive(Debug)]
    pub struct ConsoleLed {
        name: &'static str,
        lit: bool,
    }

    impl ConsoleLed {
        pub fn new(name: &'static str) -> Self {
            Self { name, lit: false }
        }

        pub fn is_lit(&self) -> bool {
            self.lit
        }
    }

    impl Led for ConsoleLed {
        fn on(&mut self) -> Result<(), HalError> {
            if !self.lit {
                println!("● {} LED on", self.name);
            }
            self.lit = true;
            Ok(())
        }

        fn off(&mut self) -> Result<(), HalError> {
            if self.lit {
                println!("○ {} LED off", self.name);
            }
            self.lit = false;
            Ok(())
        }
    }

    /// Console hardware collection
    pub struct ConsoleHal {
        pub screen: ConsoleScreen,
        pub segments: ConsoleSegments,
        pub buzzer: ConsoleBuzzer,
        pub red_led: ConsoleLed,
        pub green_led: ConsoleLed,
        pub x_axis: ScriptedAxis,
        pub y_axis: ScriptedAxis,
        pub button: ScriptedButton,
    }

    impl ConsoleHal {
        pub fn new(x_axis: ScriptedAxis, y_axis: ScriptedAxis, button: ScriptedButton) -> Self {
            Self {
                screen: ConsoleScreen,
                segments: ConsoleSegments,
                buzzer: ConsoleBuzzer::default(),
                red_led: ConsoleLed::new("red"),
                green_led: ConsoleLed::new("green"),
                x_axis,
                y_axis,
                button,
            }
        }
    }

    impl morse_game_core::hal::GameHal for ConsoleHal {
        type Screen = ConsoleScreen;
        type Segments = ConsoleSegments;
        type Buzzer = ConsoleBuzzer;
        type RedLed = ConsoleLed;
        type GreenLed = ConsoleLed;
        type XAxis = ScriptedAxis;
        type YAxis = ScriptedAxis;
        type Button = ScriptedButton;

        fn initialize(&mut self) -> Result<(), Peripheral> {
            println!("🔌 console peripherals ready");
            Ok(())
        }

        fn screen(&mut self) -> &mut ConsoleScreen {
            &mut self.screen
        }

        fn segments(&mut self) -> &mut ConsoleSegments {
            &mut self.segments
        }

        fn buzzer(&mut self) -> &mut ConsoleBuzzer {
            &mut self.buzzer
        }

        fn red_led(&mut self) -> &mut ConsoleLed {
            &mut self.red_led
        }

        fn green_led(&mut self) -> &mut ConsoleLed {
            &mut self.green_led
        }

        fn x_axis(&mut self) -> &mut ScriptedAxis {
            &mut self.x_axis
        }

        fn y_axis(&mut self) -> &mut ScriptedAxis {
            &mut self.y_axis
        }

        fn button(&mut self) -> &mut ScriptedButton {
            &mut self.button
        }

        fn joystick(&mut self) -> (&mut ScriptedAxis, &mut ScriptedAxis, &mut ScriptedButton) {
            (&mut self.x_axis, &mut self.y_axis, &mut self.button)
        }

        fn shutdown(&mut self) -> Result<(), HalError> {
            self.buzzer.silence()?;
            println!("💤 powered down");
            Ok(())
        }
    }

}

pub mod scripted_joystick {
    //! Joystick replaying a fixed list of gestures against the clock

    use embassy_time::Instant;
    use morse_game_core::hal::{AnalogAxis, DigitalButton, HalError};

    /// What the player is doing during a gesture
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub enum Motion {
        Tilt { x: f32, y: f32 },
        Press,
    }

    /// A motion held from `at_ms` for `for_ms`, relative to the script start
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct Gesture {
        pub at_ms: u64,
        pub for_ms: u64,
        pub motion: Motion,
    }

    impl Gesture {
        pub const fn tilt(at_ms: u64, x: f32, y: f32) -> Self {
            Self {
                at_ms,
                for_ms: 100,
                motion: Motion::Tilt { x, y },
            }
        }

        pub const fn press(at_ms: u64) -> Self {
            Self {
                at_ms,
                for_ms: 100,
                motion: Motion::Press,
            }
        }

        pub const fn hold(at_ms: u64, for_ms: u64) -> Self {
            Self {
                at_ms,
                for_ms,
                motion: Motion::Press,
            }
        }

        fn active_at(&self, t_ms: u64) -> bool {
            t_ms >= self.at_ms && t_ms < self.at_ms + self.for_ms
        }
    }

    /// Demo session: start a round on EASY, cut playback short, long-press to
    /// submit, then pick QUIT once the result has been shown.
    pub static DEMO_SCRIPT: [Gesture; 6] = [
        Gesture::press(500),
        Gesture::press(1_500),
        Gesture::tilt(4_000, 0.0, 1.0),
        Gesture::hold(5_000, 1_200),
        Gesture::tilt(8_000, 1.0, 0.0),
        Gesture::press(9_000),
    ];

    /// Joystick position at `t_ms` into `script`
    pub fn sample(script: &[Gesture], t_ms: u64) -> (f32, f32, bool) {
        script
            .iter()
            .find(|g| g.active_at(t_ms))
            .map_or((0.0, 0.0, false), |g| match g.motion {
                Motion::Tilt { x, y } => (x, y, false),
                Motion::Press => (0.0, 0.0, true),
            })
    }

    #[derive(Copy, Clone, Debug)]
    enum Axis {
        X,
        Y,
    }

    pub struct ScriptedAxis {
        script: &'static [Gesture],
        start: Instant,
        axis: Axis,
    }

    impl AnalogAxis for ScriptedAxis {
        fn read(&mut self) -> Result<f32, HalError> {
            let (x, y, _) = sample(self.script, self.start.elapsed().as_millis());
            Ok(match self.axis {
                Axis::X => x,
                Axis::Y => y,
            })
        }
    }

    pub struct ScriptedButton {
        script: &'static [Gesture],
        start: Instant,
    }

    impl DigitalButton for ScriptedButton {
        fn read(&mut self) -> Result<bool, HalError> {
            Ok(sample(self.script, self.start.elapsed().as_millis()).2)
        }
    }

    /// Both axes and the button, sharing one start instant
    pub fn scripted_joystick(script: &'static [Gesture]) -> (ScriptedAxis, ScriptedAxis, ScriptedButton) {
        let start = Instant::now();
        (
            ScriptedAxis {
                script,
                start,
                axis: Axis::X,
            },
            ScriptedAxis {
                script,
                start,
                axis: Axis::Y,
            },
            ScriptedButton { script, start },
        )
    }

}
