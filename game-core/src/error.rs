//! Error taxonomy for setup and round execution

use crate::hal::HalError;
use crate::types::Difficulty;

/// Peripheral identifiers used in setup failures
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    Screen,
    SegmentDisplay,
    Buzzer,
    RedLed,
    GreenLed,
    Joystick,
}

/// Errors raised by the game core
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// Text contains a character without a Morse mapping
    InvalidCharacter(char),
    /// A difficulty tier was configured without words
    EmptyWordList(Difficulty),
    /// Word or encoded sequence exceeds the fixed buffers
    WordTooLong,
    /// Configuration rejected by [`crate::GameConfig::validate`]
    InvalidConfig(&'static str),
    /// A peripheral failed to initialize
    PeripheralUnavailable(Peripheral),
    /// A peripheral failed while the game was running
    Peripheral(HalError),
}

impl From<HalError> for GameError {
    fn from(err: HalError) -> Self {
        GameError::Peripheral(err)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidCharacter(c) => write!(f, "no Morse mapping for {:?}", c),
            GameError::EmptyWordList(d) => write!(f, "word list for {} is empty", d.label()),
            GameError::WordTooLong => write!(f, "word exceeds the encoder buffer"),
            GameError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            GameError::PeripheralUnavailable(p) => write!(f, "peripheral unavailable: {:?}", p),
            GameError::Peripheral(err) => write!(f, "peripheral failure: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
