/// Collision predicates and the per-tick hazard rules.
///
/// Everything here is a pure function of its arguments.

use crate::entities::{Actor, GameState, Obstacle, ObstacleKind, Status};
use crate::level::is_river_row;
use crate::vector::{row_of, wrapped_distance, Vector, ROW_HEIGHT};

// ── Cycle tables ─────────────────────────────────────────────────────────────

pub const CROCODILE_PERIOD: u64 = 800;
pub const FLY_PERIOD: u64 = 600;

/// Ticks after level start before an uncollected fly flies off.
pub const FLY_LIFETIME: u64 = 1800;

/// Actors above this y-coordinate have reached the goal row.
pub const GOAL_LINE: f64 = ROW_HEIGHT;

fn crocodile_clear_window(level: u32) -> u64 {
    500u64.saturating_sub(50 * level.saturating_sub(1) as u64).max(200)
}

fn fly_visible_window(level: u32) -> u64 {
    300u64.saturating_sub(30 * level.saturating_sub(1) as u64).max(120)
}

// ── Predicates ───────────────────────────────────────────────────────────────

/// Circle-vs-box approximation used for hazards, goals and the fly.
/// Distances are taken across the horizontal seam.
pub fn overlaps(actor: &Actor, obstacle: &Obstacle) -> bool {
    wrapped_distance(actor.position, obstacle.center()) < actor.radius + obstacle.width / 2.0
}

/// Looser test for standing on a river tile: the actor centre must lie
/// within the tile's half-width, its own radius does not count.
pub fn overlaps_water(actor: &Actor, obstacle: &Obstacle) -> bool {
    wrapped_distance(actor.position, obstacle.center()) < obstacle.width / 2.0
}

/// Same row on the grid.
pub fn on_row(actor: &Actor, obstacle: &Obstacle) -> bool {
    row_of(obstacle.center().y) == row_of(actor.position.y)
}

pub fn is_at_goal_line(actor: &Actor) -> bool {
    actor.position.y < GOAL_LINE
}

/// The goal tile the actor has landed on, if any.  When the actor straddles
/// two tiles the nearer one wins.
pub fn won_square(state: &GameState) -> Option<&Obstacle> {
    let actor = &state.actor;
    state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Goal && o.position.y == 0.0)
        .filter(|o| overlaps(actor, o))
        .min_by(|a, b| {
            let da = wrapped_distance(actor.position, a.center());
            let db = wrapped_distance(actor.position, b.center());
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

// ── Hazards ──────────────────────────────────────────────────────────────────

/// Outcome of checking the actor against its current row.
#[derive(Clone, Debug, PartialEq)]
pub enum Hazard {
    Safe,
    /// Standing on something in the river; carries its velocity.
    Riding { velocity: Vector },
    /// Struck by a ground obstacle.
    Hit,
    /// Fell into the water.
    Drowned,
}

impl Hazard {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Hazard::Hit | Hazard::Drowned)
    }
}

/// Classify the actor's row.  Only obstacles aligned with the actor count
/// and the goal row is never a hazard.
pub fn row_hazard(actor: &Actor, obstacles: &[Obstacle]) -> Hazard {
    let row = row_of(actor.position.y);
    if row == 0 {
        return Hazard::Safe;
    }

    let mut aligned = obstacles
        .iter()
        .filter(|o| o.kind != ObstacleKind::Goal && on_row(actor, o));

    if is_river_row(row) {
        let support = aligned.find(|o| match o.kind {
            ObstacleKind::RiverBlock => overlaps_water(actor, o),
            ObstacleKind::Crocodile => o.status == Status::Clear && overlaps_water(actor, o),
            _ => false,
        });
        match support {
            Some(o) => Hazard::Riding { velocity: o.velocity },
            None => Hazard::Drowned,
        }
    } else if aligned.any(|o| o.kind == ObstacleKind::GroundBlock && overlaps(actor, o)) {
        Hazard::Hit
    } else {
        Hazard::Safe
    }
}

/// Crocodiles are safe early in each cycle; the safe window shrinks with
/// the level.
pub fn crocodile_status(elapsed: u64, level: u32) -> Status {
    if elapsed % CROCODILE_PERIOD < crocodile_clear_window(level) {
        Status::Clear
    } else {
        Status::Danger
    }
}

pub fn fly_status(elapsed: u64, level: u32) -> Status {
    if elapsed % FLY_PERIOD < fly_visible_window(level) {
        Status::NonHidden
    } else {
        Status::Hidden
    }
}

pub fn fly_expired(state: &GameState, elapsed: u64) -> bool {
    elapsed.saturating_sub(state.level_started_at) >= FLY_LIFETIME
}

/// The fly counts only while it is visible and under the actor.
pub fn fly_collected(actor: &Actor, fly: &Obstacle) -> bool {
    fly.status == Status::NonHidden && overlaps(actor, fly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_shrink_but_bottom_out() {
        assert_eq!(crocodile_clear_window(1), 500);
        assert_eq!(crocodile_clear_window(3), 400);
        assert_eq!(crocodile_clear_window(40), 200);
        assert_eq!(fly_visible_window(1), 300);
        assert_eq!(fly_visible_window(100), 120);
    }
}
