//! Movement rules for spawned actors.
//!
//! Every rule is a variant of [`Behavior`] holding its own state, so a rule
//! can be exercised on its own with nothing but an entity and a context.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::collision::Collidable;
use crate::config::BehaviorKind;
use crate::constants::{OFFSCREEN_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entity::{Anchor, AnimatedEntity};
use crate::texture::{Mask, Rect};

/// Spawn line just past the right edge of the screen.
const SPAWN_X: f32 = SCREEN_WIDTH + 50.0;

const DRIFT_SPEED: f32 = 180.0;

const ZIGZAG_SPEED: f32 = 150.0;

const DIVE_SPEED: f32 = 150.0;

const HOPPER_SPEED: f32 = 150.0;
const HOPPER_GRAVITY: f32 = 750.0;
const HOPPER_JUMP_VELOCITY: f32 = -450.0;
const HOPPER_GROUND_Y: f32 = SCREEN_HEIGHT - 25.0;
/// Minimum running time before a hopper may jump.
const HOPPER_JUMP_DELAY: f32 = 1.0;
/// Horizontal distance to the player that triggers the jump.
const HOPPER_JUMP_RANGE: f32 = 200.0;

const HOMING_SPEED: f32 = 250.0;
const HOMING_DISENGAGE_DISTANCE: f32 = 250.0;
const HOMING_VERTICAL_STRENGTH: f32 = 0.8;
const HOMING_REACTION_TIME: f32 = 0.3;
const HOMING_BOOST: f32 = 1.25;

const GROUNDED_SPEED: f32 = 200.0;

const FLOAT_SPEED: f32 = 200.0;
/// Peak vertical speed of the bob, in pixels per second.
const FLOAT_BOB_SPEED: f32 = 10.0;
/// Bob phase advance, in radians per second.
const FLOAT_BOB_RATE: f32 = 5.0;

/// Upper bound on how long an effect stays up, whatever its animation does.
pub const EFFECT_LIFETIME: f32 = 0.6;

/// What a movement rule may know about the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorContext {
    /// Center of the player.
    pub player: Vec2,
    pub scroll_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Constant velocity.
    Drift { velocity: Vec2 },
    /// Moves left while oscillating around a horizontal base line.
    ZigZag {
        speed: f32,
        base_y: f32,
        amplitude: f32,
        frequency: f32,
        phase: f32,
    },
    /// Straight line aimed at where the player was at spawn time.
    Dive { velocity: Vec2 },
    /// Runs left on the ground and jumps once when the player is close.
    Hopper {
        speed: f32,
        velocity_y: f32,
        run_time: f32,
        jumping: bool,
        has_jumped: bool,
    },
    /// Re-aims at the player every reaction interval until it gets close, then commits.
    Homing {
        speed: f32,
        direction: Vec2,
        retarget_timer: f32,
        engaged: bool,
    },
    /// Stands on the floor and drifts left.
    Grounded { speed: f32 },
    /// Floats left with a gentle vertical bob. Used by pickups.
    Float { speed: f32, phase: f32 },
    /// Stays put and plays once, then goes away.
    Effect { remaining: f32 },
    /// Only animates.
    Static,
}

impl Behavior {
    /// Picks randomized parameters for `kind`, along with where it starts and how it is anchored.
    pub fn spawn<R: Rng + ?Sized>(kind: BehaviorKind, ctx: &BehaviorContext, rng: &mut R) -> (Self, Vec2, Anchor) {
        match kind {
            BehaviorKind::Drift => {
                let y = rng.random_range(50.0..SCREEN_HEIGHT - 50.0);
                (
                    Behavior::Drift {
                        velocity: Vec2::new(-DRIFT_SPEED, 0.0),
                    },
                    Vec2::new(SPAWN_X, y),
                    Anchor::Center,
                )
            }
            BehaviorKind::ZigZag => {
                let y = rng.random_range(50.0..SCREEN_HEIGHT - 100.0);
                (
                    Behavior::ZigZag {
                        speed: ZIGZAG_SPEED,
                        base_y: y,
                        amplitude: rng.random_range(80.0..=120.0),
                        frequency: rng.random_range(3.0..5.0),
                        phase: 0.0,
                    },
                    Vec2::new(SCREEN_WIDTH + 80.0, y),
                    Anchor::Center,
                )
            }
            BehaviorKind::Dive => {
                let start = Vec2::new(
                    rng.random_range(350.0..SCREEN_WIDTH - 50.0),
                    rng.random_range(0.0..=50.0),
                );
                let velocity = (ctx.player - start).normalize_or_zero() * DIVE_SPEED;
                (Behavior::Dive { velocity }, start, Anchor::Center)
            }
            BehaviorKind::Hopper => (
                Behavior::Hopper {
                    speed: HOPPER_SPEED,
                    velocity_y: 0.0,
                    run_time: 0.0,
                    jumping: false,
                    has_jumped: false,
                },
                Vec2::new(SPAWN_X, HOPPER_GROUND_Y),
                Anchor::MidBottom,
            ),
            BehaviorKind::Homing => {
                let y = rng.random_range(50.0..SCREEN_HEIGHT - 50.0);
                (
                    Behavior::Homing {
                        speed: HOMING_SPEED,
                        direction: Vec2::NEG_X,
                        retarget_timer: 0.0,
                        engaged: true,
                    },
                    Vec2::new(SPAWN_X, y),
                    Anchor::Center,
                )
            }
            BehaviorKind::Grounded => (
                Behavior::Grounded { speed: GROUNDED_SPEED },
                Vec2::new(SCREEN_WIDTH + 100.0, SCREEN_HEIGHT),
                Anchor::MidBottom,
            ),
            BehaviorKind::Float => {
                let y = rng.random_range(50.0..SCREEN_HEIGHT - 150.0);
                (
                    Behavior::Float {
                        speed: FLOAT_SPEED,
                        phase: 0.0,
                    },
                    Vec2::new(SPAWN_X, y),
                    Anchor::Center,
                )
            }
            BehaviorKind::Effect => {
                let (x, y) = (rng.random_range(0.0..SCREEN_WIDTH), rng.random_range(0.0..SCREEN_HEIGHT));
                (Behavior::effect(), Vec2::new(x, y), Anchor::Center)
            }
            BehaviorKind::Static => (Behavior::Static, Vec2::new(SPAWN_X, SCREEN_HEIGHT / 2.0), Anchor::Center),
        }
    }

    /// A one-shot effect with the default lifetime.
    pub fn effect() -> Self {
        Behavior::Effect {
            remaining: EFFECT_LIFETIME,
        }
    }

    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Drift { .. } => BehaviorKind::Drift,
            Behavior::ZigZag { .. } => BehaviorKind::ZigZag,
            Behavior::Dive { .. } => BehaviorKind::Dive,
            Behavior::Hopper { .. } => BehaviorKind::Hopper,
            Behavior::Homing { .. } => BehaviorKind::Homing,
            Behavior::Grounded { .. } => BehaviorKind::Grounded,
            Behavior::Float { .. } => BehaviorKind::Float,
            Behavior::Effect { .. } => BehaviorKind::Effect,
            Behavior::Static => BehaviorKind::Static,
        }
    }

    /// Plays the entity's animation, then applies the movement rule.
    ///
    /// Returns false once the entity has left the play area for good.
    pub fn advance(&mut self, entity: &mut AnimatedEntity, dt: f32, ctx: &BehaviorContext) -> bool {
        entity.update(dt);

        match self {
            Behavior::Drift { velocity } | Behavior::Dive { velocity } => {
                entity.translate(*velocity * dt);
            }
            Behavior::ZigZag {
                speed,
                base_y,
                amplitude,
                frequency,
                phase,
            } => {
                *phase = (*phase + dt * *frequency) % TAU;
                let position = entity.position();
                let y = *base_y + phase.sin() * *amplitude;
                entity.apply_override_position(Vec2::new(position.x - *speed * dt, y));
            }
            Behavior::Hopper {
                speed,
                velocity_y,
                run_time,
                jumping,
                has_jumped,
            } => {
                *run_time += dt;
                let mut position = entity.position();

                if !*has_jumped
                    && *run_time >= HOPPER_JUMP_DELAY
                    && (position.x - ctx.player.x).abs() < HOPPER_JUMP_RANGE
                {
                    *velocity_y = HOPPER_JUMP_VELOCITY;
                    *jumping = true;
                    *has_jumped = true;
                    entity.set_animation("jump");
                }

                if *jumping || *velocity_y != 0.0 {
                    *velocity_y += HOPPER_GRAVITY * dt;
                }

                position.x -= *speed * dt;
                position.y += *velocity_y * dt;

                if position.y >= HOPPER_GROUND_Y {
                    position.y = HOPPER_GROUND_Y;
                    *velocity_y = 0.0;
                    if *jumping {
                        *jumping = false;
                        entity.set_animation("run");
                    }
                }
                entity.apply_override_position(position);
            }
            Behavior::Homing {
                speed,
                direction,
                retarget_timer,
                engaged,
            } => {
                let position = entity.position();
                if *engaged {
                    if position.distance(ctx.player) < HOMING_DISENGAGE_DISTANCE {
                        *engaged = false;
                        *speed *= HOMING_BOOST;
                    }

                    *retarget_timer += dt;
                    if *retarget_timer >= HOMING_REACTION_TIME {
                        *retarget_timer = 0.0;
                        let mut aim = ctx.player - position;
                        aim.y *= HOMING_VERTICAL_STRENGTH;
                        if aim.length_squared() > 0.0 {
                            *direction = aim.normalize();
                        }
                    }
                }
                entity.translate(*direction * *speed * dt);
            }
            Behavior::Grounded { speed } => {
                let position = entity.position();
                entity.apply_override_position(Vec2::new(position.x - *speed * dt, SCREEN_HEIGHT));
            }
            Behavior::Float { speed, phase } => {
                *phase = (*phase + dt * FLOAT_BOB_RATE) % TAU;
                entity.translate(Vec2::new(-*speed, FLOAT_BOB_SPEED * phase.sin()) * dt);
            }
            Behavior::Effect { remaining } => {
                *remaining -= dt;
                return *remaining > 0.0 && !entity.is_finished();
            }
            Behavior::Static => return true,
        }

        on_screen(entity)
    }
}

/// Gone past the left edge, or fallen below the floor.
fn on_screen(entity: &AnimatedEntity) -> bool {
    let rect = entity.rect();
    let position = entity.position();
    rect.right() >= 0 && position.x >= -OFFSCREEN_MARGIN && position.y <= SCREEN_HEIGHT + OFFSCREEN_MARGIN
}

/// A spawned, non-player actor: what it looks like and how it moves.
#[derive(Debug, Clone)]
pub struct Actor {
    pub entity: AnimatedEntity,
    pub behavior: Behavior,
}

impl Actor {
    pub fn new(entity: AnimatedEntity, behavior: Behavior) -> Self {
        Self { entity, behavior }
    }

    pub fn kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }

    /// See [`Behavior::advance`].
    pub fn advance(&mut self, dt: f32, ctx: &BehaviorContext) -> bool {
        self.behavior.advance(&mut self.entity, dt, ctx)
    }
}

impl Collidable for Actor {
    fn rect(&self) -> Rect {
        self.entity.rect()
    }

    fn mask(&self) -> &Mask {
        self.entity.mask()
    }
}
