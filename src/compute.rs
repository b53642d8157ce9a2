/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  The only side effect is
/// logging through the `log` facade.

use log::{debug, info, trace};

use crate::entities::{
    create_actor, spawn_actor, Event, GameState, Obstacle, ObstacleKind, ACTOR_ID, START_ROW,
};
use crate::level::{generate_level, GOAL_COUNT};
use crate::rng::Lcg;
use crate::rules::{
    crocodile_status, fly_collected, fly_expired, fly_status, is_at_goal_line, row_hazard,
    won_square, Hazard,
};
use crate::vector::{row_center, row_of, wrap, wrap_move, ROW_COUNT};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Seed of a cold start.
pub const DEFAULT_SEED: u64 = 1234;
pub const STARTING_LIVES: i32 = 5;
/// Added to both `level` and `rng_seed` on every level clear.
pub const LEVEL_INCREMENT: u32 = 1;

/// Awarded for claiming a goal tile.
pub const WIN_POINTS: i64 = 900;
/// Awarded for claiming a goal tile while collecting the fly.
pub const WIN_WITH_FLY_POINTS: i64 = 1900;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a level's state.  With no previous state this is a cold start;
/// with one it is the next level, carrying lives, banked score and high
/// score over.
pub fn init_state(previous: Option<&GameState>) -> GameState {
    match previous {
        None => new_game(DEFAULT_SEED),
        Some(prev) => next_level(prev),
    }
}

/// A cold start from `seed`.  A seed of 0 picks a random one.
pub fn new_game(seed: u64) -> GameState {
    let seed = if seed == 0 { Lcg::new(0).state() } else { seed };
    let level = 1;
    let generated = generate_level(seed, level);
    info!("new game: seed {}", seed);

    GameState {
        elapsed_time: 0,
        is_over: false,
        obstacles: generated.obstacles,
        background: generated.background,
        actor: spawn_actor(),
        score: 0,
        unbanked_score: 0,
        high_score: 0,
        goals_reached: 0,
        goal_markers: Vec::new(),
        level,
        rng_seed: seed,
        base_seed: seed,
        lives: STARTING_LIVES,
        pending_reset: false,
        bonus_entity: Some(generated.fly),
        bonus_consumed: false,
        level_started_at: 0,
    }
}

fn next_level(prev: &GameState) -> GameState {
    let level = prev.level + LEVEL_INCREMENT;
    let rng_seed = prev.rng_seed.wrapping_add(LEVEL_INCREMENT as u64);
    let generated = generate_level(rng_seed, level);
    info!("level {} cleared, starting level {}", prev.level, level);

    GameState {
        is_over: false,
        obstacles: generated.obstacles,
        background: generated.background,
        actor: spawn_actor(),
        score: prev.banked_score(),
        unbanked_score: 0,
        goals_reached: 0,
        goal_markers: Vec::new(),
        level,
        rng_seed,
        pending_reset: false,
        bonus_entity: Some(generated.fly),
        bonus_consumed: false,
        level_started_at: prev.elapsed_time,
        ..prev.clone()
    }
}

// ── Event dispatch ───────────────────────────────────────────────────────────

/// Fold one event into the state.
pub fn reduce(state: &GameState, event: &Event) -> GameState {
    match *event {
        Event::Move { dx, dy } => move_actor(state, dx, dy),
        Event::Tick { elapsed } => tick(state, elapsed),
        Event::Reset => reset(state),
    }
}

/// Replay a whole event stream from `initial`, returning every snapshot.
pub fn run_events<'a>(
    initial: &GameState,
    events: impl IntoIterator<Item = &'a Event>,
) -> Vec<GameState> {
    events
        .into_iter()
        .scan(initial.clone(), |state, event| {
            *state = reduce(state, event);
            Some(state.clone())
        })
        .collect()
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Displace the actor.  Horizontal travel wraps; falling off the bottom
/// lands on the start row; a move that would leave the top keeps the
/// current row.  The vertical displacement is added to the score, so
/// advancing costs points.  Non-finite displacements are ignored.
pub fn move_actor(state: &GameState, dx: f64, dy: f64) -> GameState {
    if state.is_over {
        return state.clone();
    }
    if !dx.is_finite() || !dy.is_finite() {
        debug!("ignoring non-finite move ({}, {})", dx, dy);
        return state.clone();
    }

    let old = state.actor.position;
    let target_row = row_of(old.y + dy);
    let row = if target_row >= ROW_COUNT {
        START_ROW
    } else if target_row < 0 {
        row_of(old.y)
    } else {
        target_row
    };
    let x = wrap(old.x + dx);
    let y = row_center(row);

    let delta = (y - old.y).round() as i64;
    trace!("move ({}, {}) -> ({}, {}), score {:+}", dx, dy, x, y, delta);

    let mut actor = state.actor.clone();
    actor.position.x = x;
    actor.position.y = y;

    GameState {
        actor,
        score: state.score + delta,
        unbanked_score: state.unbanked_score + delta,
        ..state.clone()
    }
}

/// Start over from the game's first seed, keeping only the high score.
pub fn reset(state: &GameState) -> GameState {
    info!("reset requested at level {}", state.level);
    let fresh = new_game(state.base_seed);
    GameState {
        high_score: state.high_score.max(state.score),
        elapsed_time: state.elapsed_time,
        level_started_at: state.elapsed_time,
        ..fresh
    }
}

// ── Per-tick transitions ─────────────────────────────────────────────────────

/// Advance the simulation by one clock pulse.  Rules are tried in priority
/// order; the first that applies decides the new state.
pub fn tick(state: &GameState, elapsed: u64) -> GameState {
    let state = GameState {
        elapsed_time: elapsed,
        ..state.clone()
    };

    if state.goals_reached as usize >= GOAL_COUNT && !state.pending_reset {
        debug!("all goals claimed, level clears next tick");
        return GameState {
            pending_reset: true,
            ..state
        };
    }

    if state.is_over {
        return lose_life(&state);
    }

    if state.pending_reset {
        return init_state(Some(&state));
    }

    if is_at_goal_line(&state.actor) {
        if let Some(goal) = won_square(&state).cloned() {
            return reach_goal(&state, &goal);
        }
    }

    advance(&state)
}

/// Resolve a hit.  With lives left the actor respawns; otherwise the game
/// stays over and `lives` goes negative.  Either way the points earned since
/// the last checkpoint are taken back.
fn lose_life(state: &GameState) -> GameState {
    let score = state.banked_score();

    if state.lives > 0 {
        debug!("life lost, {} remaining", state.lives - 1);
        return GameState {
            lives: state.lives - 1,
            actor: spawn_actor(),
            is_over: false,
            score,
            unbanked_score: 0,
            ..state.clone()
        };
    }

    if state.lives == 0 {
        info!("game over: score {}, high score {}", score, state.high_score);
    }
    GameState {
        lives: state.lives.min(-1),
        is_over: true,
        score,
        unbanked_score: 0,
        ..state.clone()
    }
}

/// The actor landed on `goal`.  A fresh tile is marked and scored; a tile
/// already marked only sends the actor home.
fn reach_goal(state: &GameState, goal: &Obstacle) -> GameState {
    let marker_id = format!("marker-{}", goal.id);
    if state.goal_markers.iter().any(|m| m.id == marker_id) {
        debug!("{} already claimed", goal.id);
        return GameState {
            actor: spawn_actor(),
            ..state.clone()
        };
    }

    let fly_taken = !state.bonus_consumed
        && state
            .bonus_entity
            .as_ref()
            .is_some_and(|fly| fly_collected(&state.actor, fly));
    let points = if fly_taken {
        WIN_WITH_FLY_POINTS
    } else {
        WIN_POINTS
    };
    debug!("{} claimed for {} points (fly: {})", goal.id, points, fly_taken);

    let mut goal_markers = state.goal_markers.clone();
    goal_markers.push(create_actor(marker_id, goal.center()));

    GameState {
        goal_markers,
        goals_reached: state.goals_reached + 1,
        score: state.score + points,
        unbanked_score: 0,
        actor: spawn_actor(),
        bonus_entity: if fly_taken {
            None
        } else {
            state.bonus_entity.clone()
        },
        bonus_consumed: state.bonus_consumed || fly_taken,
        ..state.clone()
    }
}

/// Ordinary tick: move obstacles, cycle statuses, carry or kill the actor.
fn advance(state: &GameState) -> GameState {
    let elapsed = state.elapsed_time;

    let obstacles: Vec<Obstacle> = state
        .obstacles
        .iter()
        .map(|o| advance_obstacle(o, elapsed, state.level))
        .collect();

    let (bonus_entity, bonus_consumed) = match &state.bonus_entity {
        Some(_) if fly_expired(state, elapsed) => {
            debug!("fly timed out");
            (None, true)
        }
        Some(fly) => {
            let mut fly = fly.clone();
            fly.status = fly_status(elapsed, state.level);
            (Some(fly), state.bonus_consumed)
        }
        None => (None, state.bonus_consumed),
    };

    let hazard = row_hazard(&state.actor, &obstacles);
    let mut actor = state.actor.clone();
    if let Hazard::Riding { velocity } = hazard {
        actor.position = wrap_move(actor.position, velocity);
    }
    if hazard.is_fatal() {
        debug!("{} {:?} on row {}", ACTOR_ID, hazard, row_of(actor.position.y));
    }

    GameState {
        obstacles,
        bonus_entity,
        bonus_consumed,
        actor,
        is_over: hazard.is_fatal(),
        high_score: state.high_score.max(state.score),
        ..state.clone()
    }
}

fn advance_obstacle(obstacle: &Obstacle, elapsed: u64, level: u32) -> Obstacle {
    let mut next = obstacle.clone();
    next.position = wrap_move(obstacle.position, obstacle.velocity);
    if obstacle.kind == ObstacleKind::Crocodile {
        next.status = crocodile_status(elapsed, level);
    }
    next
}
