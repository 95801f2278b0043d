use glam::Vec2;
use pantaneiro::config::BehaviorKind;
use pantaneiro::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pantaneiro::entity::{Anchor, AnimatedEntity};
use pantaneiro::scene::{Actor, Behavior, BehaviorContext};
use pantaneiro::texture::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

const HOPPER_GROUND_Y: f32 = SCREEN_HEIGHT - 25.0;

fn spawn_actor(kind: BehaviorKind, ctx: &BehaviorContext, seed: u64) -> Actor {
    let mut rng = StdRng::seed_from_u64(seed);
    let (behavior, position, anchor) = Behavior::spawn(kind, ctx, &mut rng);
    let entity = AnimatedEntity::placeholder(position, (40, 30), Color::RED).anchored(anchor);
    Actor::new(entity, behavior)
}

fn context(player: Vec2) -> BehaviorContext {
    BehaviorContext {
        player,
        scroll_speed: 200.0,
    }
}

#[test]
fn test_every_kind_spawns_as_itself() {
    let ctx = context(Vec2::new(150.0, 300.0));
    for kind in BehaviorKind::iter() {
        assert_that(&spawn_actor(kind, &ctx, 11).kind()).is_equal_to(kind);
    }
}

#[test]
fn test_moving_kinds_spawn_off_the_right_edge() {
    let ctx = context(Vec2::new(150.0, 300.0));
    for kind in [BehaviorKind::Drift, BehaviorKind::ZigZag, BehaviorKind::Hopper, BehaviorKind::Homing, BehaviorKind::Grounded] {
        let actor = spawn_actor(kind, &ctx, 12);
        assert_that(&actor.entity.position().x).is_greater_than(SCREEN_WIDTH);
    }
}

#[test]
fn test_drift_leaves_the_screen() {
    let ctx = context(Vec2::new(150.0, 300.0));
    let mut actor = spawn_actor(BehaviorKind::Drift, &ctx, 1);
    let start = actor.entity.position();

    assert_that(&actor.advance(1.0, &ctx)).is_true();
    assert_that(&actor.entity.position()).is_equal_to(Vec2::new(start.x - 180.0, start.y));

    let mut alive = true;
    for _ in 0..10 {
        alive = actor.advance(1.0, &ctx);
    }
    assert_that(&alive).is_false();
}

#[test]
fn test_zigzag_stays_within_amplitude() {
    let ctx = context(Vec2::new(150.0, 300.0));
    let mut actor = spawn_actor(BehaviorKind::ZigZag, &ctx, 2);
    let base_y = actor.entity.position().y;

    for _ in 0..60 {
        actor.advance(1.0 / 60.0, &ctx);
        assert_that(&(actor.entity.position().y - base_y).abs()).is_less_than_or_equal_to(120.0);
    }
}

#[test]
fn test_dive_heads_for_the_player() {
    let player = Vec2::new(150.0, 400.0);
    let ctx = context(player);
    let mut actor = spawn_actor(BehaviorKind::Dive, &ctx, 3);
    let before = actor.entity.position().distance(player);

    actor.advance(0.5, &ctx);

    let after = actor.entity.position().distance(player);
    assert!((before - after - 75.0).abs() < 1.0);
}

#[test]
fn test_hopper_jumps_once_near_the_player() {
    let ctx = context(Vec2::new(SCREEN_WIDTH - 100.0, 300.0));
    let mut actor = spawn_actor(BehaviorKind::Hopper, &ctx, 4);
    assert_that(&actor.entity.anchor()).is_equal_to(Anchor::MidBottom);

    for _ in 0..3 {
        actor.advance(0.25, &ctx);
        assert_that(&actor.entity.position().y).is_equal_to(HOPPER_GROUND_Y);
    }

    actor.advance(0.25, &ctx);
    assert_that(&actor.entity.position().y).is_less_than(HOPPER_GROUND_Y);

    for _ in 0..12 {
        actor.advance(0.25, &ctx);
    }
    assert_that(&actor.entity.position().y).is_equal_to(HOPPER_GROUND_Y);
    assert!(matches!(
        actor.behavior,
        Behavior::Hopper {
            has_jumped: true,
            jumping: false,
            ..
        }
    ));
}

#[test]
fn test_homing_commits_when_close() {
    let player = Vec2::new(300.0, 300.0);
    let ctx = context(player);
    let entity = AnimatedEntity::placeholder(Vec2::new(500.0, 300.0), (40, 30), Color::RED);
    let mut actor = Actor::new(
        entity,
        Behavior::Homing {
            speed: 250.0,
            direction: Vec2::NEG_X,
            retarget_timer: 0.0,
            engaged: true,
        },
    );

    actor.advance(0.1, &ctx);

    let Behavior::Homing { speed, engaged, .. } = actor.behavior else {
        panic!("behavior changed kind");
    };
    assert_that(&engaged).is_false();
    assert_that(&speed).is_equal_to(312.5);
}

#[test]
fn test_homing_retargets_after_reaction_time() {
    let ctx = context(Vec2::new(150.0, 100.0));
    let mut actor = spawn_actor(BehaviorKind::Homing, &ctx, 5);

    actor.advance(0.1, &ctx);
    let Behavior::Homing { direction, .. } = actor.behavior else {
        panic!("behavior changed kind");
    };
    assert_that(&direction).is_equal_to(Vec2::NEG_X);

    actor.advance(0.25, &ctx);
    let Behavior::Homing { direction, .. } = actor.behavior else {
        panic!("behavior changed kind");
    };
    assert_that(&direction.x).is_less_than(0.0);
    assert_that(&direction.y).is_not_equal_to(0.0);
}

#[test]
fn test_grounded_sits_on_the_floor() {
    let ctx = context(Vec2::new(150.0, 300.0));
    let mut actor = spawn_actor(BehaviorKind::Grounded, &ctx, 6);

    actor.advance(0.5, &ctx);

    assert_that(&actor.entity.rect().bottom()).is_equal_to(SCREEN_HEIGHT as i32);
}

#[test]
fn test_static_never_expires() {
    let ctx = context(Vec2::new(150.0, 300.0));
    let entity = AnimatedEntity::placeholder(Vec2::new(-500.0, 300.0), (10, 10), Color::RED);
    let mut actor = Actor::new(entity, Behavior::Static);

    assert_that(&actor.advance(100.0, &ctx)).is_true();
    assert_that(&actor.entity.position()).is_equal_to(Vec2::new(-500.0, 300.0));
}
