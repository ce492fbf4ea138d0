// Smoke run of a full game against mock peripherals

use morse_game_core::test_utils::output_capture;
use morse_game_core::{Difficulty, GameState, NavigationEvent};
use morse_game_tests::fixed_rig;

fn main() {
    println!("🧪 Morse game smoke run");

    let mut rig = fixed_rig();
    rig.start_round(Difficulty::Easy);
    let target = rig.controller.round().map(|r| r.target_word.clone());
    println!("  🎯 target: {:?}", target.as_ref().map(|w| w.as_str()));

    rig.idle_until(GameState::RoundInput, 1_000);
    println!("  📡 heard: {}", output_capture::marks(&rig.handles.log, 240));

    rig.type_guess("CAFE");
    rig.submit();
    println!("  ✅ outcome: {:?}", rig.controller.round().map(|r| r.outcome));

    rig.long_press();
    rig.nudge(NavigationEvent::Right);
    let state = rig.click();
    assert_eq!(state, GameState::Shutdown);
    println!("  💤 final state: {:?}", state);
    println!("✅ Smoke run passed");
}
