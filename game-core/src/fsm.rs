//! Game state machine: menus, round sequencing and judging.
//!
//! [`GameFsm`] never touches hardware. Each call consumes one input (elapsed
//! tick time or a [`NavigationEvent`]) and appends the peripheral work it
//! wants done to an [`Effects`] buffer, which the controller then applies.

use heapless::{String, Vec};
use rand::Rng;

use crate::error::GameError;
use crate::hal::HalError;
use crate::morse::{self, Playback, PlaybackStatus, ToneSink};
use crate::timer::RoundTimer;
use crate::types::{
    ContinueChoice, Difficulty, GameConfig, GameState, LedColor, NavigationEvent, Outcome, TimerStatus,
};
use crate::words::{Word, WordBank, MAX_WORD_LEN};

/// Player guess buffer
pub type Guess = String<MAX_WORD_LEN>;

/// Number of intro pages shown before the difficulty menu
pub const INTRO_PAGES: u8 = 2;

/// Columns of the character grid
pub const GRID_COLUMNS: usize = 6;

/// A-Z, 0-9, delete, submit
pub const GRID_CELLS: usize = 38;

const GRID_ROWS: usize = (GRID_CELLS + GRID_COLUMNS - 1) / GRID_COLUMNS;

/// One cell of the guess-entry grid
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridCell {
    Char(char),
    Delete,
    Submit,
}

impl GridCell {
    pub fn at(index: usize) -> GridCell {
        match index {
            0..=25 => GridCell::Char((b'A' + index as u8) as char),
            26..=35 => GridCell::Char((b'0' + (index - 26) as u8) as char),
            36 => GridCell::Delete,
            _ => GridCell::Submit,
        }
    }
}

/// Move the grid cursor one step, wrapping at the edges
pub fn move_cursor(index: usize, event: NavigationEvent) -> usize {
    match event {
        NavigationEvent::Left => (index + GRID_CELLS - 1) % GRID_CELLS,
        NavigationEvent::Right => (index + 1) % GRID_CELLS,
        NavigationEvent::Up if index >= GRID_COLUMNS => index - GRID_COLUMNS,
        NavigationEvent::Up => {
            let mut target = index + GRID_COLUMNS * (GRID_ROWS - 1);
            while target >= GRID_CELLS {
                target -= GRID_COLUMNS;
            }
            target
        }
        NavigationEvent::Down if index + GRID_COLUMNS < GRID_CELLS => index + GRID_COLUMNS,
        NavigationEvent::Down => index % GRID_COLUMNS,
        _ => index,
    }
}

/// What the text screen should display
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Intro { page: u8 },
    DifficultyMenu { selected: Difficulty },
    Playback { difficulty: Difficulty },
    GuessEntry { guess: Guess, cursor: usize },
    Result { outcome: Outcome, target: Word },
    ContinuePrompt { choice: ContinueChoice, played: u16, won: u16 },
    Goodbye,
}

/// Peripheral work requested by the state machine
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    Show(Screen),
    Countdown(u32),
    /// Start a tone; `None` pitch means the configured Morse tone
    Tone { duration_ms: u32, tone_hz: Option<u32> },
    Silence,
    Led(LedColor, bool),
    PowerDown,
}

/// Effects produced by one call
pub type Effects = Vec<Effect, 16>;

fn push(out: &mut Effects, effect: Effect) {
    let pushed = out.push(effect);
    debug_assert!(pushed.is_ok(), "effect buffer overflow");
}

/// Collapses the tone changes of one playback call into the final one,
/// however many segment boundaries the call crossed
#[derive(Default)]
struct ToneLatch(Option<Effect>);

impl ToneLatch {
    fn flush(self, out: &mut Effects) {
        if let Some(effect) = self.0 {
            push(out, effect);
        }
    }
}

impl ToneSink for ToneLatch {
    fn tone_on(&mut self, duration_ms: u32) -> Result<(), HalError> {
        self.0 = Some(Effect::Tone { duration_ms, tone_hz: None });
        Ok(())
    }

    fn tone_off(&mut self) -> Result<(), HalError> {
        self.0 = Some(Effect::Silence);
        Ok(())
    }
}

/// Guess edit made by the most recent button press
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PressEdit {
    Pushed,
    Popped(char),
}

/// State of the round in progress
#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub difficulty: Difficulty,
    pub target_word: Word,
    pub elapsed_ms: u32,
    pub remaining_ms: u32,
    pub player_guess: Guess,
    pub outcome: Outcome,
}

/// Rounds played and won since power-on
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub played: u16,
    pub won: u16,
}

/// Hardware-free game state machine
pub struct GameFsm<'a> {
    config: GameConfig,
    words: WordBank<'a>,
    state: GameState,
    selected: Difficulty,
    choice: ContinueChoice,
    intro_page: u8,
    cursor: usize,
    /// Undone when the same press turns into a long hold
    press_edit: Option<PressEdit>,
    round: Option<RoundState>,
    round_timer: RoundTimer,
    /// Intro pages and the result LED pulse
    hold_timer: RoundTimer,
    playback: Option<Playback>,
    shown_second: Option<u32>,
    stats: Stats,
}

impl<'a> GameFsm<'a> {
    pub fn new(config: GameConfig, words: WordBank<'a>) -> Result<Self, GameError> {
        config.validate()?;
        words.validate()?;
        Ok(Self {
            config,
            words,
            state: GameState::Intro,
            selected: Difficulty::Easy,
            choice: ContinueChoice::Continue,
            intro_page: 0,
            cursor: 0,
            press_edit: None,
            round: None,
            round_timer: RoundTimer::new(),
            hold_timer: RoundTimer::new(),
            playback: None,
            shown_second: None,
            stats: Stats::default(),
        })
    }

    /// Show the first intro page and start its countdown
    pub fn begin(&mut self, out: &mut Effects) {
        self.state = GameState::Intro;
        self.intro_page = 0;
        self.hold_timer.start(self.config.intro_ms);
        push(out, Effect::Led(LedColor::Red, false));
        push(out, Effect::Led(LedColor::Green, false));
        push(out, Effect::Show(Screen::Intro { page: 0 }));
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    pub fn continue_choice(&self) -> ContinueChoice {
        self.choice
    }

    pub fn grid_cursor(&self) -> usize {
        self.cursor
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_playing_back(&self) -> bool {
        self.playback.as_ref().map_or(false, |p| !p.is_finished())
    }

    /// One full tick: playback, then timers, then the input event
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: u32,
        event: NavigationEvent,
        rng: &mut R,
        out: &mut Effects,
    ) -> Result<GameState, GameError> {
        self.advance_playback(elapsed_ms, out);
        self.advance_timers(elapsed_ms, out);
        self.handle_event(event, rng, out)?;
        Ok(self.state)
    }

    /// Move the pulse train forward; a finished train hands over to guess entry
    pub fn advance_playback(&mut self, elapsed_ms: u32, out: &mut Effects) {
        if self.state != GameState::RoundPlayback {
            return;
        }
        let mut latch = ToneLatch::default();
        let status = match self.playback.as_mut() {
            Some(playback) => playback
                .advance(elapsed_ms, &mut latch)
                .unwrap_or(PlaybackStatus::Finished),
            None => PlaybackStatus::Finished,
        };
        latch.flush(out);
        if status == PlaybackStatus::Finished {
            self.enter_input(out);
        }
    }

    /// Advance the round countdown and the screen/LED hold timer
    pub fn advance_timers(&mut self, elapsed_ms: u32, out: &mut Effects) {
        // Hold timer first so a hold started by this tick's expiry runs its full length
        if self.hold_timer.tick(elapsed_ms) == TimerStatus::Expired {
            match self.state {
                GameState::Intro => self.next_intro_page(out),
                GameState::RoundResult => self.leave_result(out),
                _ => {}
            }
        }

        let round_status = self.round_timer.tick(elapsed_ms);
        if let Some(round) = self.round.as_mut() {
            if matches!(round_status, TimerStatus::Running | TimerStatus::Expired) {
                round.elapsed_ms = self.round_timer.elapsed_ms();
                round.remaining_ms = self.round_timer.remaining_ms();
                let second = (round.remaining_ms + 999) / 1000;
                if self.shown_second != Some(second) {
                    self.shown_second = Some(second);
                    push(out, Effect::Countdown(round.remaining_ms));
                }
            }
        }
        if round_status == TimerStatus::Expired && self.state.in_round() {
            self.finish_round(Outcome::TimedOut, out);
        }
    }

    /// Apply one navigation event to the current state
    pub fn handle_event<R: Rng + ?Sized>(
        &mut self,
        event: NavigationEvent,
        rng: &mut R,
        out: &mut Effects,
    ) -> Result<(), GameError> {
        if event.is_none() {
            return Ok(());
        }
        match self.state {
            GameState::Intro => {
                if event == NavigationEvent::Select {
                    self.hold_timer.stop();
                    self.enter_menu(out);
                }
            }
            GameState::DifficultySelect => match event {
                NavigationEvent::Up => {
                    self.selected = self.selected.previous();
                    push(out, Effect::Show(Screen::DifficultyMenu { selected: self.selected }));
                }
                NavigationEvent::Down => {
                    self.selected = self.selected.next();
                    push(out, Effect::Show(Screen::DifficultyMenu { selected: self.selected }));
                }
                NavigationEvent::Select => self.start_round(rng, out)?,
                _ => {}
            },
            GameState::RoundPlayback => {
                // Early guess: any input cuts the playback short
                if let Some(playback) = self.playback.as_mut() {
                    let mut latch = ToneLatch::default();
                    let _ = playback.stop(&mut latch);
                    latch.flush(out);
                }
                self.enter_input(out);
            }
            GameState::RoundInput => self.handle_guess_input(event, out),
            GameState::RoundResult => {
                if event == NavigationEvent::Hold {
                    self.hold_timer.stop();
                    self.leave_result(out);
                }
            }
            GameState::ContinuePrompt => match event {
                NavigationEvent::Left | NavigationEvent::Right | NavigationEvent::Up | NavigationEvent::Down => {
                    self.choice = self.choice.toggled();
                    push(out, Effect::Show(self.continue_screen()));
                }
                NavigationEvent::Select => match self.choice {
                    ContinueChoice::Continue => self.enter_menu(out),
                    ContinueChoice::Quit => self.shutdown(out),
                },
                _ => {}
            },
            GameState::Shutdown => {}
        }
        Ok(())
    }

    /// Give up on the current round after a peripheral failure
    pub fn abandon_round(&mut self, out: &mut Effects) {
        match self.state {
            GameState::RoundPlayback | GameState::RoundInput => {
                self.round_timer.stop();
                if let Some(playback) = self.playback.as_mut() {
                    let mut latch = ToneLatch::default();
                    playback.stop(&mut latch).ok();
                    latch.flush(out);
                }
                self.playback = None;
                if let Some(round) = self.round.as_mut() {
                    round.outcome = Outcome::Incorrect;
                }
                self.stats.played = self.stats.played.saturating_add(1);
                push(out, Effect::Silence);
                self.enter_continue(out);
            }
            GameState::RoundResult => {
                self.hold_timer.stop();
                self.leave_result(out);
            }
            _ => {}
        }
    }

    fn transition(&mut self, next: GameState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "undefined transition {:?} -> {:?}",
            self.state,
            next
        );
        #[cfg(feature = "defmt")]
        defmt::info!("state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn next_intro_page(&mut self, out: &mut Effects) {
        if self.intro_page + 1 < INTRO_PAGES {
            self.intro_page += 1;
            self.hold_timer.start(self.config.intro_ms);
            push(out, Effect::Show(Screen::Intro { page: self.intro_page }));
        } else {
            self.enter_menu(out);
        }
    }

    fn enter_menu(&mut self, out: &mut Effects) {
        self.transition(GameState::DifficultySelect);
        push(out, Effect::Show(Screen::DifficultyMenu { selected: self.selected }));
    }

    fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R, out: &mut Effects) -> Result<(), GameError> {
        let difficulty = self.selected;
        let profile = self.config.profile(difficulty);
        let target_word = self.words.pick_word(difficulty, rng)?;
        let sequence = morse::encode(target_word.as_str(), profile.unit_ms)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("round {:?}: {} segments", difficulty, sequence.len());

        self.round = Some(RoundState {
            difficulty,
            target_word,
            elapsed_ms: 0,
            remaining_ms: profile.round_ms,
            player_guess: Guess::new(),
            outcome: Outcome::Pending,
        });
        self.cursor = 0;
        self.round_timer.start(profile.round_ms);
        self.shown_second = Some((profile.round_ms + 999) / 1000);

        self.transition(GameState::RoundPlayback);
        push(out, Effect::Led(LedColor::Red, false));
        push(out, Effect::Led(LedColor::Green, false));
        push(out, Effect::Show(Screen::Playback { difficulty }));
        push(out, Effect::Countdown(profile.round_ms));

        let mut playback = Playback::new(sequence);
        let mut latch = ToneLatch::default();
        let _ = playback.start(&mut latch);
        latch.flush(out);
        self.playback = Some(playback);
        Ok(())
    }

    fn enter_input(&mut self, out: &mut Effects) {
        self.playback = None;
        self.press_edit = None;
        self.transition(GameState::RoundInput);
        push(out, Effect::Show(self.guess_screen()));
    }

    fn handle_guess_input(&mut self, event: NavigationEvent, out: &mut Effects) {
        match event {
            NavigationEvent::Up | NavigationEvent::Down | NavigationEvent::Left | NavigationEvent::Right => {
                self.cursor = move_cursor(self.cursor, event);
                push(out, Effect::Show(self.guess_screen()));
            }
            NavigationEvent::Select => {
                self.press_edit = None;
                match GridCell::at(self.cursor) {
                    GridCell::Char(c) => {
                        if let Some(round) = self.round.as_mut() {
                            // Full buffer: further characters are ignored
                            if round.player_guess.push(c).is_ok() {
                                self.press_edit = Some(PressEdit::Pushed);
                            }
                        }
                        push(out, Effect::Show(self.guess_screen()));
                    }
                    GridCell::Delete => {
                        if let Some(round) = self.round.as_mut() {
                            self.press_edit = round.player_guess.pop().map(PressEdit::Popped);
                        }
                        push(out, Effect::Show(self.guess_screen()));
                    }
                    GridCell::Submit => self.submit_guess(out),
                }
            }
            NavigationEvent::Hold => {
                // Undo the edit this press made on its Select edge
                self.revert_press_edit();
                self.submit_guess(out);
            }
            NavigationEvent::None => {}
        }
    }

    fn revert_press_edit(&mut self) {
        let (Some(edit), Some(round)) = (self.press_edit.take(), self.round.as_mut()) else {
            return;
        };
        match edit {
            PressEdit::Pushed => {
                round.player_guess.pop();
            }
            PressEdit::Popped(c) => {
                let _ = round.player_guess.push(c);
            }
        }
    }

    fn submit_guess(&mut self, out: &mut Effects) {
        let outcome = match self.round.as_ref() {
            Some(round) if round.target_word.matches(&round.player_guess) => Outcome::Correct,
            _ => Outcome::Incorrect,
        };
        self.finish_round(outcome, out);
    }

    fn finish_round(&mut self, outcome: Outcome, out: &mut Effects) {
        self.round_timer.stop();
        if let Some(playback) = self.playback.as_mut() {
            let mut latch = ToneLatch::default();
            playback.stop(&mut latch).ok();
            latch.flush(out);
        }
        self.playback = None;

        let Some(round) = self.round.as_mut() else {
            debug_assert!(false, "round finished without a round in progress");
            return;
        };
        round.outcome = outcome;
        let target = round.target_word.clone();

        self.stats.played = self.stats.played.saturating_add(1);
        if outcome.is_win() {
            self.stats.won = self.stats.won.saturating_add(1);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("round over: {:?} ({})", outcome, target);

        self.transition(GameState::RoundResult);
        self.hold_timer.start(self.config.result_hold_ms);
        let led = if outcome.is_win() { LedColor::Green } else { LedColor::Red };
        push(out, Effect::Silence);
        push(out, Effect::Led(led, true));
        if !outcome.is_win() {
            // Low buzz alongside the red LED
            push(
                out,
                Effect::Tone {
                    duration_ms: self.config.result_hold_ms,
                    tone_hz: Some(self.config.tone_hz / 2),
                },
            );
        }
        push(out, Effect::Show(Screen::Result { outcome, target }));
    }

    fn leave_result(&mut self, out: &mut Effects) {
        let won = self.round.as_ref().map_or(false, |r| r.outcome.is_win());
        if !won {
            push(out, Effect::Silence);
        }
        push(out, Effect::Led(if won { LedColor::Green } else { LedColor::Red }, false));
        self.enter_continue(out);
    }

    fn enter_continue(&mut self, out: &mut Effects) {
        self.choice = ContinueChoice::Continue;
        self.transition(GameState::ContinuePrompt);
        push(out, Effect::Show(self.continue_screen()));
    }

    fn shutdown(&mut self, out: &mut Effects) {
        self.transition(GameState::Shutdown);
        push(out, Effect::Silence);
        push(out, Effect::Led(LedColor::Red, false));
        push(out, Effect::Led(LedColor::Green, false));
        push(out, Effect::Show(Screen::Goodbye));
        push(out, Effect::PowerDown);
    }

    fn guess_screen(&self) -> Screen {
        Screen::GuessEntry {
            guess: self.round.as_ref().map(|r| r.player_guess.clone()).unwrap_or_default(),
            cursor: self.cursor,
        }
    }

    fn continue_screen(&self) -> Screen {
        Screen::ContinuePrompt {
            choice: self.choice,
            played: self.stats.played,
            won: self.stats.won,
        }
    }
}
