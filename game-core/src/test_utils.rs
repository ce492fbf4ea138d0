//! Test utilities for driving a game through mock peripherals

pub mod joystick_driver {
    //! Scripted joystick gestures against a mock-backed controller

    use rand::RngCore;

    use crate::controller::GameController;
    use crate::error::GameError;
    use crate::fsm::{GridCell, GRID_CELLS};
    use crate::hal::mock::{MockGameHal, MockHandles};
    use crate::types::{Difficulty, GameConfig, GameState, NavigationEvent};
    use crate::words::WordBank;

    /// Full deflection used for scripted directions
    pub const FULL_TILT: f32 = 1.0;

    /// Controller plus the handles needed to move its joystick and read its log
    pub struct Rig<'a, R: RngCore> {
        pub controller: GameController<'a, MockGameHal, R>,
        pub handles: MockHandles,
    }

    impl<'a, R: RngCore> Rig<'a, R> {
        pub fn new(config: GameConfig, words: WordBank<'a>, rng: R) -> Result<Self, GameError> {
            let (hal, handles) = MockGameHal::new();
            let controller = GameController::new(hal, config, words, rng)?;
            Ok(Self { controller, handles })
        }

        pub fn state(&self) -> GameState {
            self.controller.state()
        }

        /// One controller tick with the joystick as currently set
        pub fn tick(&mut self) -> GameState {
            self.controller.step().expect("controller tick failed")
        }

        /// Ticks with the joystick centred and the button up
        pub fn idle(&mut self, ticks: u32) -> GameState {
            self.center();
            for _ in 0..ticks {
                self.tick();
            }
            self.state()
        }

        /// Idle until `state` is reached or `max_ticks` pass
        pub fn idle_until(&mut self, state: GameState, max_ticks: u32) -> bool {
            self.center();
            for _ in 0..max_ticks {
                if self.tick() == state {
                    return true;
                }
            }
            self.state() == state
        }

        pub fn center(&mut self) {
            self.handles.x.set(0.0);
            self.handles.y.set(0.0);
            self.handles.button.set_pressed(false);
        }

        /// Press for one tick, release for one tick
        pub fn click(&mut self) -> GameState {
            self.handles.button.set_pressed(true);
            self.tick();
            self.handles.button.set_pressed(false);
            self.tick()
        }

        /// Keep the button down until the long-hold threshold fires, then release
        pub fn long_press(&mut self) -> GameState {
            let ticks = self.controller.config().ticks(self.controller.config().long_hold_ms);
            self.handles.button.set_pressed(true);
            for _ in 0..=ticks {
                self.tick();
            }
            self.handles.button.set_pressed(false);
            self.tick()
        }

        /// Deflect for one tick in `direction`, then recentre for one tick
        pub fn nudge(&mut self, direction: NavigationEvent) -> GameState {
            let (x, y) = match direction {
                NavigationEvent::Left => (-FULL_TILT, 0.0),
                NavigationEvent::Right => (FULL_TILT, 0.0),
                NavigationEvent::Up => (0.0, FULL_TILT),
                NavigationEvent::Down => (0.0, -FULL_TILT),
                _ => (0.0, 0.0),
            };
            self.handles.x.set(x);
            self.handles.y.set(y);
            self.tick();
            self.center();
            self.tick()
        }

        /// From the intro or the difficulty menu, start a round at `difficulty`
        pub fn start_round(&mut self, difficulty: Difficulty) -> GameState {
            if self.state() == GameState::Intro {
                self.click();
            }
            while self.controller.fsm().selected_difficulty() != difficulty {
                self.nudge(NavigationEvent::Down);
            }
            self.click()
        }

        /// Cut any playback short so the guess grid is live
        pub fn skip_playback(&mut self) -> GameState {
            if self.state() == GameState::RoundPlayback {
                self.nudge(NavigationEvent::Up);
            }
            self.state()
        }

        /// Walk the cursor right until it sits on `cell`
        pub fn move_to(&mut self, cell: GridCell) {
            for _ in 0..GRID_CELLS {
                if GridCell::at(self.controller.fsm().grid_cursor()) == cell {
                    return;
                }
                self.nudge(NavigationEvent::Right);
            }
        }

        /// Enter `text` on the guess grid
        pub fn type_guess(&mut self, text: &str) {
            self.skip_playback();
            for c in text.chars() {
                self.move_to(GridCell::Char(c.to_ascii_uppercase()));
                self.click();
            }
        }

        /// Select the OK cell
        pub fn submit(&mut self) -> GameState {
            self.move_to(GridCell::Submit);
            self.click()
        }
    }
}

pub mod output_capture {
    //! Views over the mock call log

    use std::vec::Vec;

    use crate::hal::mock::{CallLog, HalCall};

    /// Durations of every tone started, in order
    pub fn tone_durations(log: &CallLog) -> Vec<u32> {
        log.calls()
            .iter()
            .filter_map(|call| match call {
                HalCall::Emit(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Dots and dashes of the tones in the log, given the unit length
    pub fn marks(log: &CallLog, unit_ms: u32) -> std::string::String {
        tone_durations(log)
            .into_iter()
            .filter_map(|ms| match ms / unit_ms.max(1) {
                1 => Some('.'),
                3 => Some('-'),
                _ => None,
            })
            .collect()
    }

    /// Every countdown value pushed to the segment display
    pub fn countdowns(log: &CallLog) -> Vec<u32> {
        log.calls()
            .iter()
            .filter_map(|call| match call {
                HalCall::Countdown(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }
}
