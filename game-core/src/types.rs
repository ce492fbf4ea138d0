//! Core data types for the Morse decode game

use crate::error::GameError;

/// Difficulty tiers offered on the selection menu
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Position of this tier in [`Difficulty::ALL`]
    pub const fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Menu label
    pub const fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Next tier down the menu, wrapping to the top
    pub const fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous tier up the menu, wrapping to the bottom
    pub const fn previous(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// Kinds of pulse segment in an encoded word
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentKind {
    /// Dit (short tone)
    Dit,
    /// Dah (long tone)
    Dah,
    /// Silence between elements of one letter
    IntraGap,
    /// Silence between letters
    InterLetterGap,
    /// Silence between words
    InterWordGap,
}

impl SegmentKind {
    /// Returns the duration of this segment in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            SegmentKind::Dit => 1,
            SegmentKind::Dah => 3,
            SegmentKind::IntraGap => 1,
            SegmentKind::InterLetterGap => 3,
            SegmentKind::InterWordGap => 7,
        }
    }

    /// Returns true if this segment sounds the buzzer
    pub const fn is_keyed(&self) -> bool {
        match self {
            SegmentKind::Dit | SegmentKind::Dah => true,
            SegmentKind::IntraGap | SegmentKind::InterLetterGap | SegmentKind::InterWordGap => false,
        }
    }
}

/// One timed pulse or pause
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    pub kind: SegmentKind,
    pub duration_ms: u32,
}

impl Segment {
    /// Build a segment of `kind` scaled by the unit duration
    pub const fn new(kind: SegmentKind, unit_ms: u32) -> Self {
        Self {
            kind,
            duration_ms: kind.duration_units() * unit_ms,
        }
    }
}

/// Discrete joystick events produced once per sampling tick
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    Up,
    Down,
    Left,
    Right,
    /// Button pressed (rising edge only)
    Select,
    /// Button held past the long-hold threshold, reported once per press
    Hold,
    None,
}

impl NavigationEvent {
    /// Every event, used for exhaustive transition checks
    pub const ALL: [NavigationEvent; 7] = [
        NavigationEvent::Up,
        NavigationEvent::Down,
        NavigationEvent::Left,
        NavigationEvent::Right,
        NavigationEvent::Select,
        NavigationEvent::Hold,
        NavigationEvent::None,
    ];

    pub const fn is_none(&self) -> bool {
        matches!(self, NavigationEvent::None)
    }
}

/// Countdown clock status
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerStatus {
    Running,
    Paused,
    /// Reported exactly once, on the tick where the countdown reaches zero
    Expired,
    /// Terminal: stopped, never started, or already expired
    Stopped,
}

/// Result of a round
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Pending,
    Correct,
    Incorrect,
    TimedOut,
}

impl Outcome {
    pub const fn is_win(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Controller states
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    Intro,
    DifficultySelect,
    RoundPlayback,
    RoundInput,
    RoundResult,
    ContinuePrompt,
    Shutdown,
}

impl GameState {
    /// Every state, used for exhaustive transition checks
    pub const ALL: [GameState; 7] = [
        GameState::Intro,
        GameState::DifficultySelect,
        GameState::RoundPlayback,
        GameState::RoundInput,
        GameState::RoundResult,
        GameState::ContinuePrompt,
        GameState::Shutdown,
    ];

    /// Returns true while a round (and its countdown) is active
    pub const fn in_round(&self) -> bool {
        matches!(self, GameState::RoundPlayback | GameState::RoundInput)
    }

    /// States reachable from this one in a single step, self included
    pub const fn successors(&self) -> &'static [GameState] {
        match self {
            GameState::Intro => &[GameState::Intro, GameState::DifficultySelect],
            GameState::DifficultySelect => &[GameState::DifficultySelect, GameState::RoundPlayback],
            // ContinuePrompt directly when a peripheral fault abandons the round
            GameState::RoundPlayback => &[
                GameState::RoundPlayback,
                GameState::RoundInput,
                GameState::RoundResult,
                GameState::ContinuePrompt,
            ],
            GameState::RoundInput => &[
                GameState::RoundInput,
                GameState::RoundResult,
                GameState::ContinuePrompt,
            ],
            GameState::RoundResult => &[GameState::RoundResult, GameState::ContinuePrompt],
            GameState::ContinuePrompt => &[
                GameState::ContinuePrompt,
                GameState::DifficultySelect,
                GameState::Shutdown,
            ],
            GameState::Shutdown => &[GameState::Shutdown],
        }
    }

    pub fn can_transition_to(&self, next: GameState) -> bool {
        self.successors().contains(&next)
    }
}

/// Choice offered once a round is over
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContinueChoice {
    Continue,
    Quit,
}

impl ContinueChoice {
    pub const fn toggled(&self) -> ContinueChoice {
        match self {
            ContinueChoice::Continue => ContinueChoice::Quit,
            ContinueChoice::Quit => ContinueChoice::Continue,
        }
    }
}

/// Status LED selector
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Red,
    Green,
}

/// Timing parameters of one difficulty tier
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DifficultyProfile {
    /// Morse unit (dit length) in milliseconds
    pub unit_ms: u32,
    /// Countdown length in milliseconds
    pub round_ms: u32,
}

/// Game configuration parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    /// Control loop period
    pub tick_ms: u32,
    /// Time each intro page stays on screen
    pub intro_ms: u32,
    /// How long the result LED stays lit
    pub result_hold_ms: u32,
    /// Axis magnitude that must be exceeded to register a direction
    pub deadzone: f32,
    /// Button hold time that produces [`NavigationEvent::Hold`]
    pub long_hold_ms: u32,
    /// Hold time before a deflected axis starts repeating
    pub repeat_delay_ms: u32,
    /// Period between repeated direction events
    pub repeat_interval_ms: u32,
    /// Buzzer pitch
    pub tone_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile { unit_ms: 240, round_ms: 60_000 },
            medium: DifficultyProfile { unit_ms: 160, round_ms: 45_000 },
            hard: DifficultyProfile { unit_ms: 100, round_ms: 30_000 },
            tick_ms: 20, // 50 Hz
            intro_ms: 3_000,
            result_hold_ms: 1_500,
            deadzone: 0.5,
            long_hold_ms: 1_000,
            repeat_delay_ms: 400,
            repeat_interval_ms: 150,
            tone_hz: 700,
        }
    }
}

impl GameConfig {
    /// Timing profile for a difficulty tier
    pub const fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Check the configuration before it reaches the controller
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig("tick must be > 0 ms"));
        }
        for difficulty in Difficulty::ALL {
            let profile = self.profile(difficulty);
            if profile.unit_ms == 0 || profile.round_ms == 0 {
                return Err(GameError::InvalidConfig("difficulty durations must be > 0 ms"));
            }
            if profile.unit_ms < self.tick_ms {
                return Err(GameError::InvalidConfig("Morse unit must not be shorter than a tick"));
            }
        }
        if self.intro_ms == 0 || self.result_hold_ms == 0 {
            return Err(GameError::InvalidConfig("screen hold durations must be > 0 ms"));
        }
        if !(self.deadzone > 0.0 && self.deadzone < 1.0) {
            return Err(GameError::InvalidConfig("deadzone must be within (0, 1)"));
        }
        if self.long_hold_ms <= self.tick_ms {
            return Err(GameError::InvalidConfig("long hold must be longer than one tick"));
        }
        if self.repeat_interval_ms == 0 {
            return Err(GameError::InvalidConfig("repeat interval must be > 0 ms"));
        }
        Ok(())
    }

    /// Convert a duration to a whole number of ticks, at least one
    pub const fn ticks(&self, duration_ms: u32) -> u32 {
        let ticks = duration_ms / self.tick_ms;
        if ticks == 0 {
            1
        } else {
            ticks
        }
    }
}
