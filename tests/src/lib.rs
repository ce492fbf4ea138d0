//! Host integration tests for the Morse decode game

use morse_game_core::test_utils::joystick_driver::Rig;
use morse_game_core::{GameConfig, WordBank};
use rand::rngs::mock::StepRng;

/// One word per difficulty so every round is predictable
pub const EASY: &[&str] = &["CAFE"];
pub const MEDIUM: &[&str] = &["HEART"];
pub const HARD: &[&str] = &["FABLED"];

pub fn fixed_words() -> WordBank<'static> {
    WordBank::new(EASY, MEDIUM, HARD).expect("fixed word lists are valid")
}

/// Rig on the fixed word lists, past its first (level-recording) tick
pub fn fixed_rig() -> Rig<'static, StepRng> {
    let mut rig = Rig::new(GameConfig::default(), fixed_words(), StepRng::new(0, 1)).expect("rig starts");
    rig.idle(1);
    rig
}

#[cfg(test)]
mod round_tests;
#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod input_tests;
#[cfg(test)]
mod pin_tests;
#[cfg(test)]
mod async_tests;
