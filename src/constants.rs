//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

use crate::texture::Color;

/// The target frame rate of the main loop.
pub const TARGET_FPS: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TARGET_FPS as f64) as u64);

/// The size of the play area, in pixels.
pub const SCREEN_SIZE: UVec2 = UVec2::new(1024, 576);
/// Shorthand for the play area width, as used by movement rules.
pub const SCREEN_WIDTH: f32 = SCREEN_SIZE.x as f32;
/// Shorthand for the play area height, as used by movement rules.
pub const SCREEN_HEIGHT: f32 = SCREEN_SIZE.y as f32;

/// Frame duration used by animations whose descriptor does not set one.
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// Size of the placeholder image used when an entity has no animation data.
pub const FALLBACK_SIZE: (u32, u32) = (50, 50);
/// Magenta: the universal "this asset failed to load" color.
pub const FALLBACK_COLOR: Color = Color::rgb(255, 0, 255);

/// Largest width or height of any surface, mask or sprite sheet frame.
pub const MAX_SURFACE_SIZE: u32 = 4096;

/// Alpha values strictly above this are considered opaque for collision masks.
pub const MASK_ALPHA_THRESHOLD: u8 = 127;

/// Number of scores kept per scene.
pub const MAX_HIGH_SCORES: usize = 5;
/// Default location of the persisted high-score table.
pub const HIGH_SCORE_PATH: &str = "data/high_scores.json";
/// Outline font for all text, relative to the assets directory.
pub const FONT_PATH: &str = "fonts/TerminalVector.ttf";

/// Scroll distance that counts as one metre of progress.
pub const PIXELS_PER_METER: f32 = 100.0;
/// Score awarded per metre travelled.
pub const SCORE_PER_METER: f32 = 1.0;

/// Actors this far past the left edge are gone for good.
pub const OFFSCREEN_MARGIN: f32 = 50.0;
