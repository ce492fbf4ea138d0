//! Whole rounds played through the controller and mock peripherals

use morse_game_core::hal::mock::HalCall;
use morse_game_core::test_utils::joystick_driver::Rig;
use morse_game_core::test_utils::output_capture;
use morse_game_core::{
    ContinueChoice, Difficulty, GameConfig, GameState, LedColor, NavigationEvent, Outcome, Stats, WordBank,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::fixed_rig;

#[test]
fn test_correct_guess_lights_green() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    assert_eq!(rig.controller.round().unwrap().target_word.as_str(), "CAFE");

    rig.type_guess("CAFE");
    rig.handles.log.clear();
    assert_eq!(rig.submit(), GameState::RoundResult);

    let round = rig.controller.round().unwrap();
    assert_eq!(round.outcome, Outcome::Correct);
    assert_eq!(round.player_guess.as_str(), "CAFE");
    assert!(rig.handles.log.contains(&HalCall::Silence));
    assert!(rig.handles.log.contains(&HalCall::LedOn(LedColor::Green)));
    assert!(!rig.handles.log.contains(&HalCall::LedOn(LedColor::Red)));
    assert!(output_capture::tone_durations(&rig.handles.log).is_empty());
    assert!(rig.handles.log.last_text().unwrap().contains("DEFUSED"));
    assert!(rig.controller.hal().green_led.is_lit());
}

#[test]
fn test_wrong_guess_lights_red_and_buzzes() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    rig.type_guess("CAGE");
    rig.handles.log.clear();
    rig.submit();

    assert_eq!(rig.controller.round().unwrap().outcome, Outcome::Incorrect);
    assert!(rig.handles.log.contains(&HalCall::LedOn(LedColor::Red)));
    let result_hold = GameConfig::default().result_hold_ms;
    assert_eq!(output_capture::tone_durations(&rig.handles.log), [result_hold]);
    assert!(rig.handles.log.last_text().unwrap().contains("WORD WAS CAFE"));

    assert!(rig.idle_until(GameState::ContinuePrompt, result_hold / 20 + 1));
    assert!(rig.handles.log.contains(&HalCall::LedOff(LedColor::Red)));
    assert!(!rig.controller.hal().red_led.is_lit());
}

#[test]
fn test_lowercase_guess_matches() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Medium);
    rig.type_guess("heart");
    assert_eq!(rig.controller.round().unwrap().player_guess.as_str(), "HEART");
    rig.submit();
    assert_eq!(rig.controller.round().unwrap().outcome, Outcome::Correct);
}

#[test]
fn test_round_times_out() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    let round_ticks = GameConfig::default().easy.round_ms / 20;
    assert!(rig.idle_until(GameState::RoundResult, round_ticks + 1));

    let round = rig.controller.round().unwrap();
    assert_eq!(round.outcome, Outcome::TimedOut);
    assert_eq!(round.remaining_ms, 0);
    assert_eq!(rig.handles.log.last_countdown(), Some(0));
    assert!(rig.handles.log.contains(&HalCall::LedOn(LedColor::Red)));
}

#[test]
fn test_countdown_updates_once_per_second() {
    let mut rig = fixed_rig();
    rig.handles.log.clear();
    rig.start_round(Difficulty::Hard);
    rig.idle_until(GameState::RoundResult, 2_000);

    let countdowns = output_capture::countdowns(&rig.handles.log);
    assert_eq!(countdowns.first(), Some(&30_000));
    assert_eq!(countdowns.last(), Some(&0));
    // 30 s, one update per whole second down to 1, then 0
    assert_eq!(countdowns.len(), 31);
}

#[test]
fn test_continue_returns_to_menu_with_stats() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    rig.type_guess("CAFE");
    rig.submit();
    rig.long_press();
    assert_eq!(rig.state(), GameState::ContinuePrompt);
    assert!(rig.handles.log.last_text().unwrap().contains("SCORE 1/1"));

    rig.click();
    assert_eq!(rig.state(), GameState::DifficultySelect);
    assert_eq!(rig.controller.fsm().selected_difficulty(), Difficulty::Easy);

    rig.start_round(Difficulty::Easy);
    rig.skip_playback();
    rig.submit();
    rig.long_press();
    assert_eq!(rig.controller.fsm().stats(), Stats { played: 2, won: 1 });
}

#[test]
fn test_quit_shuts_down() {
    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    rig.skip_playback();
    rig.submit();
    rig.long_press();
    rig.nudge(NavigationEvent::Left);
    assert_eq!(rig.controller.fsm().continue_choice(), ContinueChoice::Quit);

    assert_eq!(rig.click(), GameState::Shutdown);
    assert!(rig.handles.log.contains(&HalCall::Clear));
    assert_eq!(rig.handles.log.last_text().as_deref(), Some("GOODBYE"));

    rig.handles.log.clear();
    assert_eq!(rig.idle(100), GameState::Shutdown);
    rig.click();
    assert!(rig.handles.log.calls().is_empty());
}

#[test]
fn test_buzzer_fault_abandons_round() {
    let mut rig = fixed_rig();
    rig.click();
    assert_eq!(rig.state(), GameState::DifficultySelect);

    rig.handles.buzzer_fault.set(true);
    assert_eq!(rig.click(), GameState::ContinuePrompt);
    assert_eq!(rig.controller.round().unwrap().outcome, Outcome::Incorrect);
    assert_eq!(rig.controller.fsm().stats(), Stats { played: 1, won: 0 });
}

#[test]
fn test_joystick_fault_outside_round_is_reported() {
    let mut rig = fixed_rig();
    rig.handles.x.fault().set(true);
    assert!(rig.controller.step().is_err());
    assert_eq!(rig.state(), GameState::Intro);
}

#[test]
fn test_seeded_rng_picks_from_list() {
    let words = WordBank::builtin();
    let mut rig = Rig::new(GameConfig::default(), words, SmallRng::seed_from_u64(7)).unwrap();
    rig.idle(1);
    for _ in 0..3 {
        rig.start_round(Difficulty::Easy);
        let target = rig.controller.round().unwrap().target_word.clone();
        assert!(words.contains(Difficulty::Easy, &target));
        rig.skip_playback();
        rig.submit();
        rig.long_press();
        rig.click();
    }
    assert_eq!(rig.controller.fsm().stats().played, 3);
}
