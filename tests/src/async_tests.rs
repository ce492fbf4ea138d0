//! Controller driven from an async interval under paused tokio time

use std::time::Duration;

use morse_game_core::test_utils::joystick_driver::Rig;
use morse_game_core::GameState;
use rand::rngs::mock::StepRng;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::fixed_rig;

/// Joystick level at `t_ms` since start: (x, y, pressed)
fn scripted(t_ms: u64) -> (f32, f32, bool) {
    match t_ms {
        // Intro -> menu, then start EASY
        100..=159 => (0.0, 0.0, true),
        500..=559 => (0.0, 0.0, true),
        // Press preempts playback, keep holding to submit
        1_000..=2_199 => (0.0, 0.0, true),
        // Result hold runs out, then choose QUIT and confirm
        4_000..=4_059 => (1.0, 0.0, false),
        4_500..=4_559 => (0.0, 0.0, true),
        _ => (0.0, 0.0, false),
    }
}

async fn run_scripted(rig: &mut Rig<'static, StepRng>, limit: Duration) -> Duration {
    let tick = Duration::from_millis(rig.controller.config().tick_ms as u64);
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let start = Instant::now();

    while start.elapsed() < limit {
        ticker.tick().await;
        let (x, y, pressed) = scripted(start.elapsed().as_millis() as u64);
        rig.handles.x.set(x);
        rig.handles.y.set(y);
        rig.handles.button.set_pressed(pressed);
        if tokio_test::assert_ok!(rig.controller.step()) == GameState::Shutdown {
            break;
        }
    }
    start.elapsed()
}

#[tokio::test(start_paused = true)]
async fn test_interval_loop_plays_to_shutdown() {
    let mut rig = fixed_rig();
    let elapsed = run_scripted(&mut rig, Duration::from_secs(30)).await;

    assert_eq!(rig.state(), GameState::Shutdown);
    assert!(elapsed >= Duration::from_millis(4_500), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(4_600), "{:?}", elapsed);

    let stats = rig.controller.fsm().stats();
    assert_eq!((stats.played, stats.won), (1, 0));
}

#[tokio::test(start_paused = true)]
async fn test_idle_loop_stays_on_menu() {
    let mut rig = fixed_rig();
    let tick = Duration::from_millis(20);
    let mut ticker = interval(tick);
    for _ in 0..500 {
        ticker.tick().await;
        rig.tick();
    }
    // Intro pages time out on their own, the menu waits for the player
    assert_eq!(rig.state(), GameState::DifficultySelect);
    assert!(rig.handles.log.last_text().unwrap().contains("> EASY"));
}
