#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Morse Game Core
//!
//! Game logic for a "decode the Morse word" handheld: Morse encoding,
//! word selection, joystick input, round countdown and the game state
//! machine. Peripherals are reached only through the traits in [`hal`].

pub mod types;
pub mod error;
pub mod morse;
pub mod words;
pub mod input;
pub mod timer;
pub mod fsm;
pub mod controller;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use types::*;
pub use error::*;
pub use morse::{encode, MorseSequence, Playback, PlaybackStatus};
pub use words::{Word, WordBank, MAX_WORD_LEN};
pub use input::InputReader;
pub use timer::RoundTimer;
pub use fsm::{Effect, Effects, GameFsm, RoundState, Screen, Stats};
pub use controller::*;
pub use hal::*;

/// Game library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 50 Hz loop, built-in difficulty timings
pub fn default_config() -> GameConfig {
    GameConfig::default()
}
