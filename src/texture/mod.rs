//! Software pixel surfaces, opacity masks, and animation frame data.
//!
//! Everything visible in the game is an RGBA [`Surface`]. Collision uses the
//! [`Mask`] derived from whatever surface an actor is currently showing.

use glam::Vec2;
use image::Rgba;
use serde::{Deserialize, Serialize};

pub mod animated;
pub mod mask;
pub mod surface;
pub mod text;

pub use animated::{Animation, AnimationSet, Frame};
pub use mask::Mask;
pub use surface::Surface;
pub use text::{FontFace, TextRenderer};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIGHT_GREY: Color = Color::rgb(192, 192, 192);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// Config files write colors as `[r, g, b]` or `[r, g, b, a]`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl From<ColorRepr> for Color {
    fn from(value: ColorRepr) -> Self {
        match value {
            ColorRepr::Rgb([r, g, b]) => Color::rgb(r, g, b),
            ColorRepr::Rgba([r, g, b, a]) => Color::rgba(r, g, b, a),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(value: Color) -> Self {
        if value.a == 255 {
            ColorRepr::Rgb([value.r, value.g, value.b])
        } else {
            ColorRepr::Rgba([value.r, value.g, value.b, value.a])
        }
    }
}

/// An integer, axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle of the given size whose center lands on `center` (rounded like pygame's int cast).
    pub fn from_center(center: Vec2, w: u32, h: u32) -> Self {
        let mut rect = Self::new(0, 0, w, h);
        rect.set_center(center);
        rect
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + self.w as f32 / 2.0, self.y as f32 + self.h as f32 / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x as i32 - (self.w / 2) as i32;
        self.y = center.y as i32 - (self.h / 2) as i32;
    }

    /// Anchors the rectangle by the middle of its bottom edge.
    pub fn set_midbottom(&mut self, point: Vec2) {
        self.x = point.x as i32 - (self.w / 2) as i32;
        self.y = point.y as i32 - self.h as i32;
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
