/// Plane geometry shared by the engine: the `Vector` type, toroidal wrap
/// and the row grid every actor position is snapped to.

pub use glam::DVec2 as Vector;

// ── Canvas & grid ────────────────────────────────────────────────────────────

/// Width and height of the square play field.
pub const CANVAS_SIZE: f64 = 900.0;

/// Height of one row.  Vertical moves are whole rows.
pub const ROW_HEIGHT: f64 = 100.0;

/// Number of rows on the canvas (goal row 0 through start row 8).
pub const ROW_COUNT: i64 = 9;

/// Row index containing the given y-coordinate.
pub fn row_of(y: f64) -> i64 {
    (y / ROW_HEIGHT).floor() as i64
}

/// Vertical centre of a row.
pub fn row_center(row: i64) -> f64 {
    row as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0
}

// ── Toroidal wrap ────────────────────────────────────────────────────────────

/// Wrap a coordinate into `[0, CANVAS_SIZE)`.
pub fn wrap(x: f64) -> f64 {
    let r = x.rem_euclid(CANVAS_SIZE);
    // rem_euclid rounds tiny negatives up to the modulus itself
    if r >= CANVAS_SIZE {
        0.0
    } else {
        r
    }
}

/// Horizontal wrap of a point.  The vertical axis is left untouched.
pub fn wrap_horizontal(v: Vector) -> Vector {
    Vector::new(wrap(v.x), v.y)
}

/// Distance between two points measured the short way round the
/// horizontal seam.
pub fn wrapped_distance(a: Vector, b: Vector) -> f64 {
    let dx = (a.x - b.x).abs() % CANVAS_SIZE;
    Vector::new(dx.min(CANVAS_SIZE - dx), a.y - b.y).length()
}

/// One tick of obstacle travel: the obstacle moves opposite to its
/// velocity and re-enters from the other edge.
pub fn wrap_move(position: Vector, velocity: Vector) -> Vector {
    wrap_horizontal(position - velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_in_range_values() {
        assert_eq!(wrap(0.0), 0.0);
        assert_eq!(wrap(450.0), 450.0);
        assert_eq!(wrap(899.5), 899.5);
    }

    #[test]
    fn wrap_folds_both_edges() {
        assert_eq!(wrap(900.0), 0.0);
        assert_eq!(wrap(910.0), 10.0);
        assert_eq!(wrap(-10.0), 890.0);
        assert_eq!(wrap(-1e-18), 0.0);
    }

    #[test]
    fn wrap_move_subtracts_velocity() {
        let p = wrap_move(Vector::new(5.0, 110.0), Vector::new(10.0, 0.0));
        assert_eq!(p, Vector::new(895.0, 110.0));
    }

    #[test]
    fn wrapped_distance_takes_the_short_way() {
        let a = Vector::new(10.0, 250.0);
        assert_eq!(wrapped_distance(a, Vector::new(890.0, 250.0)), 20.0);
        assert_eq!(wrapped_distance(a, Vector::new(910.0, 250.0)), 0.0);
        assert_eq!(wrapped_distance(a, Vector::new(40.0, 290.0)), 50.0);
    }

    #[test]
    fn rows_snap_to_centres() {
        assert_eq!(row_of(850.0), 8);
        assert_eq!(row_of(0.0), 0);
        assert_eq!(row_center(8), 850.0);
        assert_eq!(row_center(row_of(812.0)), 850.0);
        assert_eq!(row_of(-50.0), -1);
    }
}
