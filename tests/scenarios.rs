//! End-to-end scenarios for the collision engine and a full session

use calendar_breakout::GameConfig;
use calendar_breakout::sim::{
    Ball, Brick, Collider, Corner, CornerRadii, Edge, Game, GameEvent, GamePhase, Rect,
    detect_closest_collision, generate_calendar_layout,
};
use glam::Vec2;

fn vertical_wall(x: f32, normal_x: f32) -> Edge {
    Edge::new(Vec2::new(x, -1000.0), Vec2::new(x, 1000.0), Vec2::new(normal_x, 0.0))
}

#[test]
fn wall_reflects_horizontal_component() {
    let wall = Edge::new(
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 100.0),
        Vec2::new(-1.0, 0.0),
    );
    let collision = wall
        .detect_collision(Vec2::new(0.0, 50.0), Vec2::new(10.0, 0.0))
        .unwrap()
        .expect("should reach the wall");
    assert_eq!(collision.intersection_point, Vec2::new(10.0, 50.0));

    let response = collision.collide(Vec2::new(5.0, 5.0)).unwrap();
    assert_eq!(response.velocity, Vec2::new(-5.0, 5.0));
    assert_eq!(response.displacement.length(), 0.0);
}

#[test]
fn rounded_corner_deflects_away_from_center() {
    let center = Vec2::new(100.0, 100.0);
    let corner = Corner::new(center, 9.0);
    let position = Vec2::new(80.0, 80.0);
    let displacement = Vec2::new(30.0, 30.0);

    let collision = corner
        .detect_collision(position, displacement)
        .unwrap()
        .expect("should touch the corner");

    let point = collision.intersection_point;
    assert!((point.distance(center) - 9.0).abs() < 1e-3);
    let t = (point.x - position.x) / displacement.x;
    assert!(t > 0.0 && t < 1.0, "t = {t}");

    let response = collision.collide(displacement).unwrap();
    let outward = point - center;
    assert!(response.velocity.dot(outward) > 0.0);
    assert!((response.velocity - Vec2::new(-30.0, -30.0)).length() < 1e-3);
}

#[test]
fn heavy_brick_needs_three_separate_hits() {
    let mut wall = vertical_wall(0.0, 1.0);
    let mut brick = Brick::new(
        42,
        Rect::new(100.0, 40.0, 140.0, 60.0),
        CornerRadii::default(),
        3,
        30,
        5.0,
    );
    let mut ball = Ball::new(Vec2::new(50.0, 50.0), 5.0).with_velocity(Vec2::new(100.0, 0.0));
    let mut events = Vec::new();
    let mut score = 0;
    let mut ticks_with_hits = 0;

    for _ in 0..8 {
        let before = events.len();
        let mut colliders: [&mut dyn Collider; 2] = [&mut wall, &mut brick];
        ball.update(&mut colliders, 1.0, &mut events).unwrap();

        let new_events = &events[before..];
        let hits = new_events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickHit { .. }))
            .count();
        assert!(hits <= 1, "one contact per tick here, got {hits}");
        ticks_with_hits += hits;
        score += new_events
            .iter()
            .map(|e| match e {
                GameEvent::BrickDestroyed { value, .. } => *value,
                _ => 0,
            })
            .sum::<u32>();
    }

    assert!(brick.is_destroyed());
    assert_eq!(ticks_with_hits, 3);
    assert_eq!(score, 30);
    assert_eq!(
        events,
        vec![
            GameEvent::BrickHit { id: 42, hp_left: 2 },
            GameEvent::BrickHit { id: 42, hp_left: 1 },
            GameEvent::BrickHit { id: 42, hp_left: 0 },
            GameEvent::BrickDestroyed { id: 42, value: 30 },
        ]
    );
    // Destroyed: the ball now flies straight through where it stood
    assert!(ball.velocity.x > 0.0);
    assert!(ball.center.x > 140.0);
}

#[test]
fn brick_can_be_struck_twice_in_one_tick() {
    let mut wall = Edge::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 100.0),
        Vec2::new(1.0, 0.0),
    );
    let mut brick = Brick::new(
        7,
        Rect::new(20.0, 40.0, 60.0, 60.0),
        CornerRadii::default(),
        3,
        30,
        5.0,
    );
    // Brick face at 15, wall at 0: brick, wall, brick within one displacement
    let mut ball = Ball::new(Vec2::new(5.0, 50.0), 5.0).with_velocity(Vec2::new(40.0, 0.0));
    let mut events = Vec::new();

    let mut colliders: [&mut dyn Collider; 2] = [&mut wall, &mut brick];
    let report = ball.update(&mut colliders, 1.0, &mut events).unwrap();

    assert_eq!(report.bounces, 3);
    assert!(!report.truncated);
    assert_eq!(
        events,
        vec![
            GameEvent::BrickHit { id: 7, hp_left: 2 },
            GameEvent::BrickHit { id: 7, hp_left: 1 },
        ]
    );
    assert_eq!(brick.hp(), 1);
    assert!(!brick.is_destroyed());
    assert_eq!(ball.center, Vec2::new(15.0, 50.0));
    assert_eq!(ball.velocity, Vec2::new(-40.0, 0.0));
}

#[test]
fn zero_displacement_never_collides() {
    let start = Vec2::new(10.0, 50.0);
    let wall = vertical_wall(10.0, -1.0);
    let corner = Corner::new(Vec2::new(14.0, 50.0), 4.0);
    let brick = Brick::new(
        1,
        Rect::new(5.0, 40.0, 20.0, 60.0),
        CornerRadii::uniform(2.0),
        1,
        10,
        5.0,
    );

    assert!(wall.detect_collision(start, Vec2::ZERO).unwrap().is_none());
    assert!(corner.detect_collision(start, Vec2::ZERO).unwrap().is_none());
    assert!(brick.detect_collision(start, Vec2::ZERO).unwrap().is_none());
}

#[test]
fn closest_collider_wins_and_ties_keep_the_first() {
    let far = vertical_wall(20.0, -1.0);
    let near = vertical_wall(10.0, -1.0);
    let position = Vec2::new(0.0, 0.0);
    let displacement = Vec2::new(30.0, 0.0);

    let hit = detect_closest_collision([&far, &near], position, displacement)
        .unwrap()
        .expect("both walls are in reach");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.collision.intersection_point, Vec2::new(10.0, 0.0));

    let twin = vertical_wall(10.0, -1.0);
    let hit = detect_closest_collision([&near, &twin], position, displacement)
        .unwrap()
        .expect("both walls are in reach");
    assert_eq!(hit.index, 0);
}

#[test]
fn destroyed_brick_leaves_the_resolver() {
    let mut brick = Brick::new(
        5,
        Rect::new(100.0, 40.0, 140.0, 60.0),
        CornerRadii::uniform(4.0),
        1,
        10,
        5.0,
    );
    let mut events = Vec::new();
    brick.take_hit(&mut events);
    assert!(brick.is_destroyed());
    assert_eq!(brick.value(), 10);

    let colliders: [&dyn Collider; 1] = [&brick];
    let hit =
        detect_closest_collision(colliders, Vec2::new(50.0, 50.0), Vec2::new(100.0, 0.0)).unwrap();
    assert!(hit.is_none());

    // No second destruction event
    brick.take_hit(&mut events);
    let destroyed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
}

#[test]
fn autopilot_session_plays_cleanly() {
    let viewport = Rect::new(0.0, 0.0, 1200.0, 800.0);
    let layout = generate_calendar_layout(99, viewport);
    let mut game = Game::new(GameConfig::default(), layout);
    game.set_autopilot(true);
    game.start();

    let mut banked = 0u64;
    for _ in 0..(60 * 90) {
        game.frame(1.0 / 60.0);
        for event in game.drain_events() {
            if let GameEvent::BrickDestroyed { value, .. } = event {
                banked += u64::from(value);
            }
        }

        let state = game.state();
        assert_ne!(state.phase, GamePhase::Halted);
        let c = state.ball.center;
        assert!(c.x <= viewport.right + 1e-2, "escaped right: {c:?}");
        assert!(c.y >= viewport.top - 1e-2 && c.y <= viewport.bottom + 1e-2, "escaped: {c:?}");
    }

    let state = game.state();
    assert!(state.score > 0);
    assert_eq!(state.score, banked);
    assert_eq!(state.lives, GameConfig::default().lives);
}
