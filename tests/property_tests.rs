//! Property-based tests for the engine.
//!
//! These tests use proptest to drive the simulator with random event
//! sequences and check the invariants after every step.

use proptest::prelude::*;
use rev_engine::audio::{AudioBank, AudioHandle, Clip, HeadlessClip};
use rev_engine::builder::SimulatorBuilder;
use rev_engine::core::{Action, EngineState, Trigger};
use rev_engine::engine::{EngineSimulator, Event};
use std::time::Duration;

fn engine() -> EngineSimulator<HeadlessClip> {
    SimulatorBuilder::new()
        .audio(AudioBank::from_fn(|_| HeadlessClip::new()))
        .build()
        .unwrap()
}

prop_compose! {
    fn arbitrary_clip()(variant in 0..5usize) -> Clip {
        Clip::ALL[variant]
    }
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => Just(Event::Input(Action::Press)),
        3 => Just(Event::Input(Action::Release)),
        1 => Just(Event::Input(Action::Reset)),
        2 => arbitrary_clip().prop_map(Event::ClipFinished),
        4 => (0u64..5_000).prop_map(|ms| Event::Elapsed(Duration::from_millis(ms))),
    ]
}

fn arbitrary_state() -> impl Strategy<Value = EngineState> {
    prop_oneof![
        Just(EngineState::Idle),
        Just(EngineState::Revving),
        Just(EngineState::CoolingDown),
        Just(EngineState::Exploded),
    ]
}

fn arbitrary_trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        Just(Trigger::Press),
        Just(Trigger::Release),
        Just(Trigger::Overheat),
        Just(Trigger::CooldownFinished),
        Just(Trigger::Reset),
    ]
}

proptest! {
    #[test]
    fn temperature_stays_in_bounds(events in prop::collection::vec(arbitrary_event(), 1..80)) {
        let mut sim = engine();
        for event in events {
            sim.handle(event);
            let temp = sim.temperature();
            prop_assert!((0.0..=100.0).contains(&temp));
        }
    }

    #[test]
    fn exploded_means_exactly_max_and_no_timer(
        events in prop::collection::vec(arbitrary_event(), 1..80)
    ) {
        let mut sim = engine();
        for event in events {
            sim.handle(event);
            if sim.state() == EngineState::Exploded {
                prop_assert_eq!(sim.temperature(), 100.0);
                prop_assert!(!sim.timer().is_armed());
            } else {
                prop_assert!(sim.timer().is_armed());
                prop_assert!(sim.temperature() < 100.0);
            }
        }
    }

    #[test]
    fn at_most_one_loop_is_active(events in prop::collection::vec(arbitrary_event(), 1..80)) {
        let mut sim = engine();
        for event in events {
            if let Event::ClipFinished(clip) = event {
                sim.audio_mut().get_mut(clip).finish();
            }
            sim.handle(event);
            prop_assert!(sim.audio().active_loops().len() <= 1);
        }
    }

    #[test]
    fn exploded_ignores_press_and_release(
        actions in prop::collection::vec(prop_oneof![Just(Action::Press), Just(Action::Release)], 1..10)
    ) {
        let mut sim = engine();
        sim.press();
        sim.advance(Duration::from_secs(20));
        prop_assert_eq!(sim.state(), EngineState::Exploded);

        for action in actions {
            sim.act(action);
            prop_assert_eq!(sim.state(), EngineState::Exploded);
            prop_assert_eq!(sim.temperature(), 100.0);
        }
    }

    #[test]
    fn continuous_heating_is_strictly_increasing(ticks in 1usize..99) {
        let mut sim = engine();
        sim.press();
        let mut previous = sim.temperature();
        for _ in 0..ticks {
            sim.advance(Duration::from_millis(200));
            prop_assert!(sim.temperature() > previous);
            previous = sim.temperature();
        }
        prop_assert_eq!(sim.state(), EngineState::Revving);
    }

    #[test]
    fn splitting_elapsed_time_does_not_change_the_outcome(
        split in 0u64..3_000,
        total in 3_000u64..30_000,
    ) {
        let mut whole = engine();
        let mut parts = engine();
        whole.press();
        parts.press();

        whole.advance(Duration::from_millis(total));
        parts.advance(Duration::from_millis(split));
        parts.advance(Duration::from_millis(total - split));

        prop_assert_eq!(whole.state(), parts.state());
        prop_assert_eq!(whole.temperature(), parts.temperature());
    }

    #[test]
    fn transition_table_is_deterministic(state in arbitrary_state(), trigger in arbitrary_trigger()) {
        prop_assert_eq!(state.apply(trigger), state.apply(trigger));
    }

    #[test]
    fn only_reset_leaves_exploded(trigger in arbitrary_trigger()) {
        let result = EngineState::Exploded.apply(trigger);
        if trigger == Trigger::Reset {
            prop_assert_eq!(result, Ok(EngineState::Idle));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn history_path_follows_state(events in prop::collection::vec(arbitrary_event(), 1..40)) {
        let mut sim = engine();
        for event in events {
            sim.handle(event);
        }
        if let Some(last) = sim.history().get_path().last() {
            prop_assert_eq!(*last, sim.state());
        }
    }
}
