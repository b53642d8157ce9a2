// Property tests for the reducer and its helpers.
//
// Random event streams are folded through `reduce` and the state
// invariants are checked after every step.

use proptest::prelude::*;
use river_crossing::compute::{init_state, reduce, tick};
use river_crossing::entities::{Event, GameState};
use river_crossing::level::{generate_level, GOAL_COUNT};
use river_crossing::vector::{wrap, CANVAS_SIZE};

/// Inputs the front end can produce, with the clock always moving forward.
#[derive(Debug, Clone)]
enum Input {
    Up,
    Down,
    Left,
    Right,
    Ticks(u8),
    Reset,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => Just(Input::Up),
        1 => Just(Input::Down),
        2 => Just(Input::Left),
        2 => Just(Input::Right),
        6 => (1u8..40).prop_map(Input::Ticks),
        1 => Just(Input::Reset),
    ]
}

/// Expand inputs into engine events, numbering ticks consecutively.
fn events(inputs: &[Input]) -> Vec<Event> {
    let mut elapsed = 0;
    let mut out = Vec::new();
    for i in inputs {
        match i {
            Input::Up => out.push(Event::Move { dx: 0.0, dy: -100.0 }),
            Input::Down => out.push(Event::Move { dx: 0.0, dy: 100.0 }),
            Input::Left => out.push(Event::Move { dx: -20.0, dy: 0.0 }),
            Input::Right => out.push(Event::Move { dx: 20.0, dy: 0.0 }),
            Input::Ticks(n) => {
                for _ in 0..*n {
                    elapsed += 1;
                    out.push(Event::Tick { elapsed });
                }
            }
            Input::Reset => out.push(Event::Reset),
        }
    }
    out
}

fn check_invariants(s: &GameState) -> Result<(), TestCaseError> {
    prop_assert!(s.banked_score() >= 0, "banked score {}", s.banked_score());
    prop_assert!(s.goals_reached as usize <= GOAL_COUNT);
    prop_assert_eq!(s.goals_reached as usize, s.goal_markers.len());
    prop_assert!(s.high_score >= 0);
    prop_assert!(s.actor.position.x >= 0.0 && s.actor.position.x < CANVAS_SIZE);
    prop_assert!(s.actor.position.y > 0.0 && s.actor.position.y < CANVAS_SIZE);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn wrap_is_idempotent_and_in_range(x in -1.0e6f64..1.0e6) {
        let w = wrap(x);
        prop_assert!((0.0..CANVAS_SIZE).contains(&w));
        prop_assert_eq!(wrap(w), w);
    }

    #[test]
    fn level_generation_is_deterministic(seed in 1u64..1_000_000, level in 1u32..30) {
        prop_assert_eq!(generate_level(seed, level), generate_level(seed, level));
    }

    #[test]
    fn invariants_hold_along_any_stream(inputs in prop::collection::vec(input(), 1..120)) {
        let mut state = init_state(None);
        let mut lives = state.lives;
        for event in events(&inputs) {
            let next = reduce(&state, &event);
            check_invariants(&next)?;
            if event != Event::Reset {
                prop_assert!(next.lives <= lives, "lives went up without a reset");
                prop_assert!(next.high_score >= state.high_score);
            }
            lives = next.lives;
            state = next;
        }
    }

    #[test]
    fn terminal_state_stays_terminal(inputs in prop::collection::vec(input(), 1..60)) {
        let mut state = init_state(None);
        state.lives = 0;
        state.is_over = true;
        state = tick(&state, 1);
        prop_assert!(state.is_terminal());

        let stream: Vec<Event> = events(&inputs)
            .into_iter()
            .filter(|e| *e != Event::Reset)
            .map(|e| match e {
                Event::Tick { elapsed } => Event::Tick { elapsed: elapsed + 1 },
                other => other,
            })
            .collect();
        for event in stream {
            let next = reduce(&state, &event);
            prop_assert!(next.is_over);
            prop_assert!(next.lives <= state.lives);
            prop_assert_eq!(next.actor.position, state.actor.position);
            prop_assert_eq!(next.score, state.score);
            state = next;
        }
    }
}
