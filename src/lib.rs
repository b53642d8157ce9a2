//! River crossing: a lane-hopping arcade game engine.
//!
//! - `vector`: plane geometry, toroidal wrap, row grid
//! - `rng`: seeded linear-congruential generator
//! - `entities`: obstacles, actor, game state, input events
//! - `level`: deterministic level generation
//! - `rules`: collision predicates and hazard rules
//! - `compute`: the pure state reducer
//! - `settings`: front-end configuration

pub mod compute;
pub mod entities;
pub mod level;
pub mod rng;
pub mod rules;
pub mod settings;
pub mod vector;

pub use compute::{init_state, reduce};
pub use entities::{Event, GameState};
pub use settings::Settings;
