/// All game entity types, their factories, and the input events that drive
/// the reducer.

use serde::{Deserialize, Serialize};

use crate::vector::{row_center, Vector, CANVAS_SIZE, ROW_COUNT};

// ── Kinds & statuses ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObstacleKind {
    GroundBlock,
    RiverBlock,
    Crocodile,
    Goal,
    Fly,
    RiverBackground,
    GroundBackground,
}

impl ObstacleKind {
    /// Prefix used when building obstacle ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::GroundBlock => "ground-block",
            ObstacleKind::RiverBlock => "river-block",
            ObstacleKind::Crocodile => "crocodile",
            ObstacleKind::Goal => "goal",
            ObstacleKind::Fly => "fly",
            ObstacleKind::RiverBackground => "river-background",
            ObstacleKind::GroundBackground => "ground-background",
        }
    }

    pub fn is_river(&self) -> bool {
        matches!(
            self,
            ObstacleKind::RiverBlock | ObstacleKind::Crocodile | ObstacleKind::RiverBackground
        )
    }
}

/// Auxiliary sub-state.  Only crocodiles and the fly ever leave `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    None,
    Danger,
    Clear,
    Hidden,
    NonHidden,
}

// ── Obstacle & actor ─────────────────────────────────────────────────────────

/// A moving or static hazard, goal, or background tile.
/// `position` is the top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub position: Vector,
    /// Per-tick displacement; the obstacle travels opposite to it.
    pub velocity: Vector,
    pub kind: ObstacleKind,
    pub width: f64,
    pub height: f64,
    pub status: Status,
}

impl Obstacle {
    pub fn center(&self) -> Vector {
        self.position + Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player, or a goal marker (markers share the actor's shape).
/// `position` is the centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub position: Vector,
    pub velocity: Vector,
    pub radius: f64,
}

pub const ACTOR_ID: &str = "actor";
pub const ACTOR_RADIUS: f64 = 30.0;

/// Row the actor spawns on.
pub const START_ROW: i64 = ROW_COUNT - 1;

pub fn start_position() -> Vector {
    Vector::new(CANVAS_SIZE / 2.0, row_center(START_ROW))
}

// ── Factories ────────────────────────────────────────────────────────────────

pub fn create_obstacle(
    id: impl Into<String>,
    kind: ObstacleKind,
    position: Vector,
    velocity: Vector,
    width: f64,
    height: f64,
    status: Status,
) -> Obstacle {
    Obstacle {
        id: id.into(),
        position,
        velocity,
        kind,
        width,
        height,
        status,
    }
}

pub fn create_actor(id: impl Into<String>, position: Vector) -> Actor {
    Actor {
        id: id.into(),
        position,
        velocity: Vector::ZERO,
        radius: ACTOR_RADIUS,
    }
}

/// A fresh player at the start position.
pub fn spawn_actor() -> Actor {
    create_actor(ACTOR_ID, start_position())
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Everything the presentation layer can feed into the reducer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Displace the actor by `(dx, dy)`.
    Move { dx: f64, dy: f64 },
    /// Periodic clock pulse carrying the tick source's elapsed count.
    Tick { elapsed: u64 },
    /// Start a fresh game, keeping only the high score.
    Reset,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Conceptual phase, derived from the state flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Hit; the next tick either respawns the actor or ends the game.
    GameOverTransient,
    /// Lives exhausted; only `Reset` leaves this phase.
    GameOverTerminal,
    /// All goals claimed; the level regenerates shortly.
    LevelClearPending,
}

/// The entire game state.  Never mutated in place by the reducer: every
/// transition returns a new value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub elapsed_time: u64,
    pub is_over: bool,
    /// Goals first, then the moving rows top to bottom.
    pub obstacles: Vec<Obstacle>,
    /// Static river/ground strips.
    pub background: Vec<Obstacle>,
    pub actor: Actor,
    pub score: i64,
    /// Points earned since the last checkpoint (level start, goal, or
    /// respawn).  A life loss takes exactly these back.
    pub unbanked_score: i64,
    pub high_score: i64,
    pub goals_reached: u32,
    pub goal_markers: Vec<Actor>,
    pub level: u32,
    pub rng_seed: u64,
    /// Seed the game started from; `Reset` replays from it.
    pub base_seed: u64,
    /// Extra lives left; negative once the game is truly over.
    pub lives: i32,
    pub pending_reset: bool,
    /// The fly, while it is still collectable this level.
    pub bonus_entity: Option<Obstacle>,
    pub bonus_consumed: bool,
    /// Elapsed time at which the current level was generated.
    pub level_started_at: u64,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        if self.is_over {
            if self.lives < 0 {
                Phase::GameOverTerminal
            } else {
                Phase::GameOverTransient
            }
        } else if self.pending_reset {
            Phase::LevelClearPending
        } else {
            Phase::Playing
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == Phase::GameOverTerminal
    }

    /// Score that a life loss can no longer take away.
    pub fn banked_score(&self) -> i64 {
        self.score - self.unbanked_score
    }
}
