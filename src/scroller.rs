use tracing::debug;

use crate::config::ScrollerConfig;

/// Drives the scene's horizontal scroll and its time-based difficulty ramp.
///
/// The speed multiplier grows linearly with active (unstopped) time, capped at
/// `max_multiplier`. Stopping freezes both the offset and the timer.
#[derive(Debug, Clone)]
pub struct DifficultyScroller {
    base_speed: f32,
    max_multiplier: f32,
    rate: f32,
    timer: f32,
    offset: f32,
    current_speed: f32,
    stopped: bool,
}

impl DifficultyScroller {
    pub fn new(config: &ScrollerConfig) -> Self {
        Self {
            base_speed: config.initial_speed,
            max_multiplier: config.max_difficulty_multiplier,
            rate: config.difficulty_increase_rate,
            timer: 0.0,
            offset: 0.0,
            current_speed: config.initial_speed,
            stopped: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.stopped {
            return;
        }
        self.offset += self.current_speed * dt;
        self.timer += dt;
        self.current_speed = self.base_speed * self.multiplier();
    }

    /// `min(1 + timer × rate, max_multiplier)`.
    pub fn multiplier(&self) -> f32 {
        (1.0 + self.timer * self.rate).min(self.max_multiplier)
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.offset = 0.0;
        self.current_speed = self.base_speed;
        self.stopped = false;
        debug!(speed = self.current_speed, "Scroller reset");
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn max_multiplier(&self) -> f32 {
        self.max_multiplier
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
