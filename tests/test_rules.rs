use river_crossing::compute::init_state;
use river_crossing::entities::*;
use river_crossing::rules::*;
use river_crossing::vector::Vector;

fn actor_at(x: f64, y: f64) -> Actor {
    create_actor(ACTOR_ID, Vector::new(x, y))
}

fn block(kind: ObstacleKind, x: f64, row: i64, width: f64, status: Status) -> Obstacle {
    create_obstacle(
        format!("{}-{}-0", kind.as_str(), row),
        kind,
        Vector::new(x, row as f64 * 100.0 + 10.0),
        Vector::ZERO,
        width,
        80.0,
        status,
    )
}

// ── overlap predicates ────────────────────────────────────────────────────────

#[test]
fn overlaps_counts_actor_radius() {
    // centre at (150, 650), half-width 50, actor radius 30 → reach 80
    let o = block(ObstacleKind::GroundBlock, 100.0, 6, 100.0, Status::None);
    assert!(overlaps(&actor_at(150.0, 650.0), &o));
    assert!(overlaps(&actor_at(229.0, 650.0), &o));
    assert!(!overlaps(&actor_at(230.0, 650.0), &o));
}

#[test]
fn water_overlap_ignores_actor_radius() {
    let o = block(ObstacleKind::RiverBlock, 100.0, 2, 100.0, Status::None);
    assert!(overlaps_water(&actor_at(199.0, 250.0), &o));
    assert!(!overlaps_water(&actor_at(200.0, 250.0), &o));
    // the radius-inclusive test still reaches it
    assert!(overlaps(&actor_at(200.0, 250.0), &o));
}

#[test]
fn row_alignment_uses_the_grid() {
    let o = block(ObstacleKind::GroundBlock, 0.0, 5, 80.0, Status::None);
    assert!(on_row(&actor_at(0.0, 550.0), &o));
    assert!(!on_row(&actor_at(0.0, 650.0), &o));
    assert!(!on_row(&actor_at(0.0, 450.0), &o));
}

#[test]
fn goal_line_is_the_top_row() {
    assert!(is_at_goal_line(&actor_at(450.0, 50.0)));
    assert!(!is_at_goal_line(&actor_at(450.0, 150.0)));
}

#[test]
fn won_square_picks_the_nearest_tile() {
    let mut s = init_state(None);
    s.actor = actor_at(200.0, 50.0);
    assert_eq!(won_square(&s).map(|g| g.id.as_str()), Some("goal-1"));
    s.actor = actor_at(170.0, 50.0);
    assert_eq!(won_square(&s).map(|g| g.id.as_str()), Some("goal-0"));
    s.actor = actor_at(450.0, 850.0);
    assert!(won_square(&s).is_none());
}

// ── hazards ──────────────────────────────────────────────────────────────────

#[test]
fn ground_overlap_is_a_hit() {
    let obstacles = vec![block(ObstacleKind::GroundBlock, 400.0, 5, 80.0, Status::None)];
    assert_eq!(row_hazard(&actor_at(440.0, 550.0), &obstacles), Hazard::Hit);
    assert_eq!(row_hazard(&actor_at(700.0, 550.0), &obstacles), Hazard::Safe);
    // different row
    assert_eq!(row_hazard(&actor_at(440.0, 650.0), &obstacles), Hazard::Safe);
}

#[test]
fn river_needs_support() {
    let mut raft = block(ObstacleKind::RiverBlock, 300.0, 2, 200.0, Status::None);
    raft.velocity = Vector::new(-1.5, 0.0);
    let obstacles = vec![raft];
    assert_eq!(
        row_hazard(&actor_at(400.0, 250.0), &obstacles),
        Hazard::Riding { velocity: Vector::new(-1.5, 0.0) }
    );
    assert_eq!(row_hazard(&actor_at(700.0, 250.0), &obstacles), Hazard::Drowned);
    assert!(Hazard::Drowned.is_fatal());
    assert!(!Hazard::Safe.is_fatal());
}

#[test]
fn dangerous_crocodile_does_not_hold_you_up() {
    let danger = vec![block(ObstacleKind::Crocodile, 300.0, 1, 200.0, Status::Danger)];
    let clear = vec![block(ObstacleKind::Crocodile, 300.0, 1, 200.0, Status::Clear)];
    let a = actor_at(400.0, 150.0);
    assert_eq!(row_hazard(&a, &danger), Hazard::Drowned);
    assert!(matches!(row_hazard(&a, &clear), Hazard::Riding { .. }));
}

#[test]
fn goal_row_is_never_a_hazard() {
    let s = init_state(None);
    assert_eq!(row_hazard(&actor_at(450.0, 50.0), &s.obstacles), Hazard::Safe);
}

// ── cycles ────────────────────────────────────────────────────────────────────

#[test]
fn crocodile_cycle() {
    assert_eq!(crocodile_status(0, 1), Status::Clear);
    assert_eq!(crocodile_status(499, 1), Status::Clear);
    assert_eq!(crocodile_status(500, 1), Status::Danger);
    assert_eq!(crocodile_status(799, 1), Status::Danger);
    assert_eq!(crocodile_status(800, 1), Status::Clear);
    // safe window shrinks at higher levels
    assert_eq!(crocodile_status(450, 3), Status::Danger);
}

#[test]
fn fly_cycle() {
    assert_eq!(fly_status(0, 1), Status::NonHidden);
    assert_eq!(fly_status(299, 1), Status::NonHidden);
    assert_eq!(fly_status(300, 1), Status::Hidden);
    assert_eq!(fly_status(600, 1), Status::NonHidden);
    assert_eq!(fly_status(280, 2), Status::Hidden);
}

#[test]
fn fly_only_counts_when_visible() {
    let mut fly = river_crossing::level::fly(1);
    let a = actor_at(90.0, 50.0);
    assert!(!fly_collected(&a, &fly));
    fly.status = Status::NonHidden;
    assert!(fly_collected(&a, &fly));
    assert!(!fly_collected(&actor_at(270.0, 50.0), &fly));
}

#[test]
fn fly_expires_after_its_lifetime() {
    let mut s = init_state(None);
    s.level_started_at = 100;
    assert!(!fly_expired(&s, 100 + FLY_LIFETIME - 1));
    assert!(fly_expired(&s, 100 + FLY_LIFETIME));
}
