//! Property tests for the encoder, the state machine and the round timer

use morse_game_core::fsm::{Effects, GameFsm};
use morse_game_core::morse::{self, total_duration_ms};
use morse_game_core::{GameConfig, GameState, NavigationEvent, RoundTimer, SegmentKind, TimerStatus};
use proptest::prelude::*;
use rand::rngs::mock::StepRng;

use crate::fixed_words;

/// Playback end, a timer expiry and an input can each move the game on within one step
fn reachable(from: GameState, to: GameState, hops: u32) -> bool {
    from == to || (hops > 0 && from.successors().iter().any(|next| reachable(*next, to, hops - 1)))
}

fn event() -> impl Strategy<Value = NavigationEvent> {
    (0..NavigationEvent::ALL.len()).prop_map(|i| NavigationEvent::ALL[i])
}

proptest! {
    #[test]
    fn encode_is_deterministic(word in "[A-Z0-9]{1,12}", unit in 1u32..400) {
        let first = morse::encode(&word, unit).unwrap();
        let second = morse::encode(&word, unit).unwrap();
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn encode_durations_follow_units(word in "[A-Z0-9]{1,12}", unit in 1u32..400) {
        let sequence = morse::encode(&word, unit).unwrap();

        let symbols: usize = word.chars().map(|c| morse::pattern(c).unwrap().len()).sum();
        let keyed = sequence.iter().filter(|s| s.kind.is_keyed()).count();
        prop_assert_eq!(keyed, symbols);

        prop_assert!(sequence.first().unwrap().kind.is_keyed());
        prop_assert!(sequence.last().unwrap().kind.is_keyed());
        for pair in sequence.windows(2) {
            prop_assert!(pair[0].kind.is_keyed() != pair[1].kind.is_keyed());
        }
        let letter_gaps = sequence.iter().filter(|s| s.kind == SegmentKind::InterLetterGap).count();
        prop_assert_eq!(letter_gaps, word.len() - 1);

        let units: u32 = sequence.iter().map(|s| s.kind.duration_units()).sum();
        prop_assert_eq!(total_duration_ms(&sequence), units * unit);
        for segment in &sequence {
            prop_assert_eq!(segment.duration_ms, segment.kind.duration_units() * unit);
        }
    }

    #[test]
    fn encode_rejects_punctuation(prefix in "[A-Z]{0,4}", bad in "[!?.,@#]", suffix in "[A-Z]{0,4}") {
        let text = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(morse::encode(&text, 100).is_err());
    }

    #[test]
    fn fsm_is_total(steps in prop::collection::vec((event(), 0u32..20_000), 1..400)) {
        let mut fsm = GameFsm::new(GameConfig::default(), fixed_words()).unwrap();
        let mut rng = StepRng::new(0, 1);
        let mut out = Effects::new();
        fsm.begin(&mut out);

        let mut state = fsm.state();
        for (event, elapsed) in steps {
            out.clear();
            let next = fsm.step(elapsed, event, &mut rng, &mut out).unwrap();
            prop_assert!(GameState::ALL.contains(&next));
            prop_assert!(reachable(state, next, 3), "{:?} -> {:?}", state, next);
            if state == GameState::Shutdown {
                prop_assert_eq!(next, GameState::Shutdown);
                prop_assert!(out.is_empty());
            }
            if let Some(round) = fsm.round() {
                prop_assert!(round.player_guess.len() <= 12);
            }
            state = next;
        }
    }

    #[test]
    fn timer_is_monotonic(duration in 1u32..10_000, ticks in prop::collection::vec(0u32..500, 1..200)) {
        let mut timer = RoundTimer::new();
        timer.start(duration);
        let mut previous = 0;
        let mut expiries = 0;
        for tick in ticks {
            if timer.tick(tick) == TimerStatus::Expired {
                expiries += 1;
            }
            prop_assert!(timer.elapsed_ms() >= previous);
            prop_assert!(timer.elapsed_ms() <= duration);
            prop_assert_eq!(timer.remaining_ms(), duration - timer.elapsed_ms());
            previous = timer.elapsed_ms();
        }
        prop_assert!(expiries <= 1);
        prop_assert_eq!(expiries == 1, timer.has_expired());
    }
}
