/// Deterministic level generation.
///
/// `(seed, level)` fully determines the output: the background strips, the
/// moving rows, the goal tiles and the fly.  All randomness comes from one
/// `Lcg` stream consumed in a fixed order.

use crate::entities::{create_obstacle, Obstacle, ObstacleKind, Status};
use crate::rng::Lcg;
use crate::vector::{row_center, Vector, CANVAS_SIZE, ROW_HEIGHT};

// ── Layout tables ────────────────────────────────────────────────────────────

/// Number of background strips (rows 0..=7; the start row has none).
pub const BACKGROUND_STRIPS: i64 = 8;

/// Strips above this row index are river, the rest ground.
pub const RIVER_ROWS_END: i64 = 4;

/// Rows hosting moving obstacles.
pub const FIRST_OBSTACLE_ROW: i64 = 1;
pub const LAST_OBSTACLE_ROW: i64 = 7;

pub const OBSTACLES_PER_ROW: usize = 3;
pub const OBSTACLE_HEIGHT: f64 = 80.0;

pub const GOAL_COUNT: usize = 5;
pub const GOAL_WIDTH: f64 = CANVAS_SIZE / GOAL_COUNT as f64;

pub const FLY_SIZE: f64 = 60.0;

const SLOT_SPACING: f64 = CANVAS_SIZE / OBSTACLES_PER_ROW as f64;
const SLOT_JITTER: f64 = 60.0;
const CROCODILE_CHANCE: f64 = 0.3;

/// Everything a fresh level needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub background: Vec<Obstacle>,
    /// Goal tiles first, then rows in ascending order.
    pub obstacles: Vec<Obstacle>,
    pub fly: Obstacle,
}

/// True when the background strip of `row` is water.
pub fn is_river_row(row: i64) -> bool {
    (0..RIVER_ROWS_END).contains(&row)
}

/// Width multiplier: obstacles narrow as the level rises.
fn width_scale(level: u32) -> f64 {
    (1.0 - 0.08 * level.saturating_sub(1) as f64).max(0.5)
}

/// Speed multiplier: obstacles speed up as the level rises.
fn speed_scale(level: u32) -> f64 {
    1.0 + 0.25 * level.saturating_sub(1) as f64
}

// ── Generators ───────────────────────────────────────────────────────────────

pub fn generate_level(seed: u64, level: u32) -> Level {
    let mut rng = Lcg::new(seed.wrapping_add(level as u64).max(1));

    let mut obstacles = goals();
    for row in FIRST_OBSTACLE_ROW..=LAST_OBSTACLE_ROW {
        obstacles.extend(obstacle_row(row, level, &mut rng));
    }

    Level {
        background: background(),
        obstacles,
        fly: fly(level),
    }
}

/// Static strips, river on top, ground below.
pub fn background() -> Vec<Obstacle> {
    (0..BACKGROUND_STRIPS)
        .map(|row| {
            let kind = if is_river_row(row) {
                ObstacleKind::RiverBackground
            } else {
                ObstacleKind::GroundBackground
            };
            create_obstacle(
                format!("{}-{}", kind.as_str(), row),
                kind,
                Vector::new(0.0, row as f64 * ROW_HEIGHT),
                Vector::ZERO,
                CANVAS_SIZE,
                ROW_HEIGHT,
                Status::None,
            )
        })
        .collect()
}

/// The five goal tiles spanning the top row.
pub fn goals() -> Vec<Obstacle> {
    (0..GOAL_COUNT)
        .map(|i| {
            create_obstacle(
                format!("goal-{}", i),
                ObstacleKind::Goal,
                Vector::new(i as f64 * GOAL_WIDTH, 0.0),
                Vector::ZERO,
                GOAL_WIDTH,
                ROW_HEIGHT,
                Status::None,
            )
        })
        .collect()
}

/// One row of moving obstacles.  Draws, per obstacle: jitter, width,
/// speed, and on river rows a crocodile roll.
pub fn obstacle_row(row: i64, level: u32, rng: &mut Lcg) -> Vec<Obstacle> {
    let river = is_river_row(row);
    let direction = if row % 2 == 0 { 1.0 } else { -1.0 };
    let y = row_center(row) - OBSTACLE_HEIGHT / 2.0;

    (0..OBSTACLES_PER_ROW)
        .map(|slot| {
            let x = slot as f64 * SLOT_SPACING + rng.next_float() * SLOT_JITTER;
            let w = rng.next_float();
            let base_width = if river { 160.0 + 100.0 * w } else { 60.0 + 60.0 * w };
            let speed = (0.4 + 0.6 * rng.next_float()) * speed_scale(level);

            let (kind, status) = if river {
                if rng.next_float() < CROCODILE_CHANCE {
                    (ObstacleKind::Crocodile, Status::Danger)
                } else {
                    (ObstacleKind::RiverBlock, Status::None)
                }
            } else {
                (ObstacleKind::GroundBlock, Status::None)
            };

            create_obstacle(
                format!("{}-{}-{}", kind.as_str(), row, slot),
                kind,
                Vector::new(x, y),
                Vector::new(direction * speed, 0.0),
                base_width * width_scale(level),
                OBSTACLE_HEIGHT,
                status,
            )
        })
        .collect()
}

/// The bonus fly, parked on a goal tile that shifts with the level.
pub fn fly(level: u32) -> Obstacle {
    let tile = level.saturating_sub(1) as usize % GOAL_COUNT;
    let center_x = tile as f64 * GOAL_WIDTH + GOAL_WIDTH / 2.0;
    create_obstacle(
        "fly",
        ObstacleKind::Fly,
        Vector::new(center_x - FLY_SIZE / 2.0, row_center(0) - FLY_SIZE / 2.0),
        Vector::ZERO,
        FLY_SIZE,
        FLY_SIZE,
        Status::Hidden,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_and_speed_scale_with_level() {
        assert_eq!(width_scale(1), 1.0);
        assert!(width_scale(3) < width_scale(2));
        assert_eq!(width_scale(50), 0.5);
        assert_eq!(speed_scale(1), 1.0);
        assert!(speed_scale(4) > speed_scale(3));
    }

    #[test]
    fn river_rows_are_the_top_four() {
        assert!(is_river_row(0));
        assert!(is_river_row(3));
        assert!(!is_river_row(4));
        assert!(!is_river_row(8));
    }
}
