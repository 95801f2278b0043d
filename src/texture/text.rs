//! Text rendering, through an outline [`FontFace`] when the platform has one
//! and a built-in 3x5 pixel font otherwise.
//!
//! The pixel font covers A-Z, 0-9, space and `: . - ! >`. Lowercase is drawn
//! as uppercase, common Portuguese accents are folded to their base letter,
//! anything else renders as a blank cell.

use std::fmt;
use std::rc::Rc;

use crate::texture::{Color, Rect, Surface};

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;
/// Blank columns between characters, in font pixels.
const SPACING: u32 = 1;

/// Each row is 3 bits, most significant bit on the left.
fn glyph(c: char) -> [u8; 5] {
    match fold(c) {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        _ => [0; 5],
    }
}

fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'A',
        'é' | 'ê' | 'É' | 'Ê' => 'E',
        'í' | 'Í' => 'I',
        'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'O',
        'ú' | 'Ú' => 'U',
        'ç' | 'Ç' => 'C',
        c => c.to_ascii_uppercase(),
    }
}

/// A font that rasterizes whole lines, supplied by the platform layer.
pub trait FontFace: fmt::Debug {
    /// Renders `text` about `height` pixels tall. `None` when it cannot be rendered.
    fn render(&self, text: &str, height: u32, color: Color) -> Option<Surface>;

    /// Size `render` would produce for the same arguments.
    fn measure(&self, text: &str, height: u32) -> Option<(u32, u32)>;
}

/// Draws strings onto a [`Surface`] at an integer scale.
///
/// With a face, the scale picks a line height of `5 * scale` pixels and the
/// face draws the text; lines the face refuses fall back to the pixel font.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    scale: u32,
    face: Option<Rc<dyn FontFace>>,
}

impl TextRenderer {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            face: None,
        }
    }

    pub fn with_face(mut self, face: Rc<dyn FontFace>) -> Self {
        self.face = Some(face);
        self
    }

    /// The same face at another scale.
    pub fn scaled(&self, scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            face: self.face.clone(),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn text_width(&self, text: &str) -> u32 {
        if let Some((w, _)) = self.face.as_ref().and_then(|face| face.measure(text, self.text_height())) {
            return w;
        }
        let count = text.chars().count() as u32;
        if count == 0 {
            return 0;
        }
        (count * (GLYPH_W + SPACING) - SPACING) * self.scale
    }

    pub fn text_height(&self) -> u32 {
        GLYPH_H * self.scale
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn render(&self, target: &mut Surface, text: &str, x: i32, y: i32, color: Color) {
        if let Some(line) = self.face.as_ref().and_then(|face| face.render(text, self.text_height(), color)) {
            target.blit(&line, x, y);
            return;
        }
        self.render_pixels(target, text, x, y, color);
    }

    fn render_pixels(&self, target: &mut Surface, text: &str, x: i32, y: i32, color: Color) {
        let s = self.scale as i32;
        let advance = ((GLYPH_W + SPACING) * self.scale) as i32;
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i32 * advance;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0b100 >> col) != 0 {
                        let px = Rect::new(origin + col as i32 * s, y + row as i32 * s, self.scale, self.scale);
                        target.fill_rect(px, color);
                    }
                }
            }
        }
    }

    /// Draws `text` horizontally centered on `center_x`.
    pub fn render_centered(&self, target: &mut Surface, text: &str, center_x: i32, y: i32, color: Color) {
        let x = center_x - self.text_width(text) as i32 / 2;
        self.render(target, text, x, y, color);
    }
}
