//! Game controller: drives the state machine from peripherals, one tick at a time

use core::fmt::Write;

use heapless::String;
use rand::RngCore;

use crate::error::GameError;
use crate::fsm::{Effect, Effects, GameFsm, GridCell, RoundState, Screen, GRID_CELLS, GRID_COLUMNS};
use crate::hal::{Align, Buzzer, DisplayText, GameHal, Led, SegmentDisplay, TextLayout};
use crate::input::InputReader;
use crate::types::{ContinueChoice, Difficulty, GameConfig, GameState, LedColor, Outcome};
use crate::words::WordBank;

/// Rendered screen text
pub type ScreenText = String<256>;

/// Owns the peripherals, the random source and the state machine
pub struct GameController<'a, H, R> {
    hal: H,
    rng: R,
    fsm: GameFsm<'a>,
    input: InputReader,
}

impl<'a, H, R> GameController<'a, H, R>
where
    H: GameHal,
    R: RngCore,
{
    /// Validate configuration, bring up the peripherals and show the intro
    pub fn new(mut hal: H, config: GameConfig, words: WordBank<'a>, rng: R) -> Result<Self, GameError> {
        let fsm = GameFsm::new(config, words)?;
        hal.initialize().map_err(GameError::PeripheralUnavailable)?;

        #[cfg(feature = "defmt")]
        defmt::info!("peripherals ready, tick {} ms", config.tick_ms);

        let mut controller = Self {
            hal,
            rng,
            fsm,
            input: InputReader::new(&config),
        };
        let mut out = Effects::new();
        controller.fsm.begin(&mut out);
        controller.apply(&out)?;
        Ok(controller)
    }

    pub fn state(&self) -> GameState {
        self.fsm.state()
    }

    pub fn config(&self) -> &GameConfig {
        self.fsm.config()
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.fsm.round()
    }

    pub fn fsm(&self) -> &GameFsm<'a> {
        &self.fsm
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    pub fn into_hal(self) -> H {
        self.hal
    }

    /// Run one control-loop tick.
    ///
    /// Order within a tick is fixed: playback advance, timer advance, input
    /// poll. A peripheral failure during a round abandons the round; outside
    /// a round it is returned to the caller.
    pub fn step(&mut self) -> Result<GameState, GameError> {
        if self.fsm.state() == GameState::Shutdown {
            return Ok(GameState::Shutdown);
        }
        let tick_ms = self.fsm.config().tick_ms;
        let mut out = Effects::new();

        self.fsm.advance_playback(tick_ms, &mut out);
        if let Err(err) = self.apply(&out) {
            return self.recover(err);
        }

        out.clear();
        self.fsm.advance_timers(tick_ms, &mut out);
        if let Err(err) = self.apply(&out) {
            return self.recover(err);
        }

        let (x, y, button) = self.hal.joystick();
        let event = match self.input.poll(x, y, button) {
            Ok(event) => event,
            Err(err) => return self.recover(err.into()),
        };
        #[cfg(feature = "defmt")]
        if !event.is_none() {
            defmt::debug!("input {:?} in {:?}", event, self.fsm.state());
        }

        out.clear();
        self.fsm.handle_event(event, &mut self.rng, &mut out)?;
        if let Err(err) = self.apply(&out) {
            return self.recover(err);
        }
        Ok(self.fsm.state())
    }

    /// Step until SHUTDOWN or `max_ticks` ticks have run
    pub fn run_for(&mut self, max_ticks: u32) -> Result<GameState, GameError> {
        for _ in 0..max_ticks {
            if self.step()? == GameState::Shutdown {
                break;
            }
        }
        Ok(self.fsm.state())
    }

    fn recover(&mut self, err: GameError) -> Result<GameState, GameError> {
        match self.fsm.state() {
            GameState::RoundPlayback | GameState::RoundInput | GameState::RoundResult => {
                #[cfg(feature = "defmt")]
                defmt::warn!("peripheral fault {:?}, abandoning round", err);
                let mut out = Effects::new();
                self.fsm.abandon_round(&mut out);
                // Best effort: the faulty peripheral may fail again
                for effect in out.iter() {
                    self.apply_one(effect).ok();
                }
                Ok(self.fsm.state())
            }
            _ => Err(err),
        }
    }

    fn apply(&mut self, effects: &Effects) -> Result<(), GameError> {
        for effect in effects.iter() {
            self.apply_one(effect)?;
        }
        Ok(())
    }

    fn apply_one(&mut self, effect: &Effect) -> Result<(), GameError> {
        match effect {
            Effect::Show(screen) => {
                let text = render(screen);
                let layout = layout_for(screen);
                self.hal.screen().show(&text, &layout)?;
            }
            Effect::Countdown(remaining_ms) => self.hal.segments().show_countdown(*remaining_ms)?,
            Effect::Tone { duration_ms, tone_hz } => {
                let tone = tone_hz.unwrap_or(self.fsm.config().tone_hz);
                self.hal.buzzer().emit(*duration_ms, Some(tone))?;
            }
            Effect::Silence => self.hal.buzzer().silence()?,
            Effect::Led(LedColor::Red, true) => self.hal.red_led().on()?,
            Effect::Led(LedColor::Red, false) => self.hal.red_led().off()?,
            Effect::Led(LedColor::Green, true) => self.hal.green_led().on()?,
            Effect::Led(LedColor::Green, false) => self.hal.green_led().off()?,
            Effect::PowerDown => {
                self.hal.screen().clear()?;
                self.hal.shutdown()?;
            }
        }
        Ok(())
    }
}

/// Placement of each screen
pub fn layout_for(screen: &Screen) -> TextLayout {
    let align = match screen {
        Screen::Intro { .. } | Screen::Result { .. } | Screen::Goodbye => Align::Center,
        _ => Align::Top,
    };
    TextLayout {
        align,
        ..TextLayout::default()
    }
}

/// Render a screen to multi-line text
pub fn render(screen: &Screen) -> ScreenText {
    let mut text = ScreenText::new();
    // Overflow only truncates the text
    let _ = write_screen(&mut text, screen);
    text
}

fn write_screen(text: &mut ScreenText, screen: &Screen) -> core::fmt::Result {
    match screen {
        Screen::Intro { page: 0 } => text.push_str("WELCOME TO\nMORSE CODE DECODE").map_err(|_| core::fmt::Error),
        Screen::Intro { .. } => text
            .push_str("THIS DEVICE IS A BOMB\nYOUR JOB IS TO DEFUSE IT\nCHOOSE YOUR DIFFICULTY LEVEL")
            .map_err(|_| core::fmt::Error),
        Screen::DifficultyMenu { selected } => {
            write!(text, "CHOOSE DIFFICULTY")?;
            for difficulty in Difficulty::ALL {
                let marker = if difficulty == *selected { '>' } else { ' ' };
                write!(text, "\n{} {}", marker, difficulty.label())?;
            }
            Ok(())
        }
        Screen::Playback { difficulty } => write!(text, "{}\nLISTEN...", difficulty.label()),
        Screen::GuessEntry { guess, cursor } => {
            write!(text, "GUESS: {}_", guess)?;
            for index in 0..GRID_CELLS {
                if index % GRID_COLUMNS == 0 {
                    text.push('\n').map_err(|_| core::fmt::Error)?;
                }
                let (open, close) = if index == *cursor { ('[', ']') } else { (' ', ' ') };
                match GridCell::at(index) {
                    GridCell::Char(c) => write!(text, "{}{}{}", open, c, close)?,
                    GridCell::Delete => write!(text, "{}DEL{}", open, close)?,
                    GridCell::Submit => write!(text, "{}OK{}", open, close)?,
                }
            }
            Ok(())
        }
        Screen::Result { outcome, target } => {
            let verdict = match outcome {
                Outcome::Correct => "DEFUSED!",
                Outcome::Incorrect => "WRONG",
                Outcome::TimedOut => "TIME UP",
                Outcome::Pending => "",
            };
            write!(text, "{}\nWORD WAS {}", verdict, target.as_str())
        }
        Screen::ContinuePrompt { choice, played, won } => {
            let (cont, quit) = match choice {
                ContinueChoice::Continue => ('>', ' '),
                ContinueChoice::Quit => (' ', '>'),
            };
            write!(text, "SCORE {}/{}\n{} CONTINUE  {} QUIT", won, played, cont, quit)
        }
        Screen::Goodbye => write!(text, "GOODBYE"),
    }
}

/// Drive the controller from an embassy ticker until SHUTDOWN
#[cfg(feature = "embassy-time")]
pub async fn game_task<H, R>(controller: &mut GameController<'_, H, R>) -> Result<(), GameError>
where
    H: GameHal,
    R: RngCore,
{
    use embassy_time::{Duration, Ticker};

    let mut ticker = Ticker::every(Duration::from_millis(controller.config().tick_ms as u64));
    loop {
        if controller.step()? == GameState::Shutdown {
            #[cfg(feature = "defmt")]
            defmt::info!("game over, shutting down");
            return Ok(());
        }
        ticker.next().await;
    }
}
