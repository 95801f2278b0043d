use glam::Vec2;

use crate::collision::Collidable;
use crate::config::PlayerPhysics;
use crate::constants::SCREEN_HEIGHT;
use crate::entity::AnimatedEntity;
use crate::texture::{Mask, Rect, Surface};

/// The player-controlled flyer.
///
/// Only moves vertically; the world scrolls past it.
#[derive(Debug, Clone)]
pub struct Player {
    entity: AnimatedEntity,
    physics: PlayerPhysics,
    velocity_y: f32,
    thrusting: bool,
    diving: bool,
    alive: bool,
    invincible: bool,
}

impl Player {
    pub fn new(entity: AnimatedEntity, physics: PlayerPhysics, invincible: bool) -> Self {
        Self {
            entity,
            physics,
            velocity_y: 0.0,
            thrusting: false,
            diving: false,
            alive: true,
            invincible,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.update_animation_state();
        self.entity.update(dt);
        if self.alive {
            self.process_physics(dt);
        }
    }

    fn update_animation_state(&mut self) {
        let name = if self.diving {
            "down"
        } else if self.thrusting {
            "up"
        } else {
            "keep"
        };
        self.entity.set_animation(name);
    }

    fn process_physics(&mut self, dt: f32) {
        let p = &self.physics;
        let mut accel = p.gravity;
        if self.thrusting {
            accel -= p.thrust;
        }
        if self.diving {
            accel += p.dive;
        }

        self.velocity_y = (self.velocity_y + accel * dt).clamp(p.max_rise, p.max_fall);

        let mut position = self.entity.position();
        position.y += self.velocity_y * dt;

        let half = self.entity.rect().h as f32 / 2.0;
        let (top, bottom) = (half, (SCREEN_HEIGHT - half).max(half));
        if position.y < top {
            position.y = top;
            self.velocity_y = 0.0;
        } else if position.y > bottom {
            position.y = bottom;
            self.velocity_y = 0.0;
        }
        self.entity.apply_override_position(position);
    }

    /// Starts climbing, with an immediate upward kick.
    pub fn start_thrust(&mut self) {
        if !self.alive {
            return;
        }
        self.thrusting = true;
        self.diving = false;
        self.velocity_y = (self.velocity_y - self.physics.tap_impulse).max(self.physics.max_rise);
    }

    pub fn stop_thrust(&mut self) {
        self.thrusting = false;
    }

    pub fn start_dive(&mut self) {
        if !self.alive {
            return;
        }
        self.diving = true;
        self.thrusting = false;
    }

    pub fn stop_dive(&mut self) {
        self.diving = false;
    }

    pub fn die(&mut self) {
        self.thrusting = false;
        self.diving = false;
        self.velocity_y = 0.0;
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn is_diving(&self) -> bool {
        self.diving
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position()
    }

    pub fn entity(&self) -> &AnimatedEntity {
        &self.entity
    }

    pub fn draw(&self, target: &mut Surface) {
        self.entity.draw(target);
    }
}

impl Collidable for Player {
    fn rect(&self) -> Rect {
        self.entity.rect()
    }

    fn mask(&self) -> &Mask {
        self.entity.mask()
    }
}
