//! Tiled, horizontally scrolling scenery.

use std::rc::Rc;

use crate::texture::{Color, Surface};

/// One background image that repeats horizontally and scrolls at a fraction of the global speed.
#[derive(Debug, Clone)]
pub struct ParallaxLayer {
    image: Rc<Surface>,
    parallax_scale: f32,
    scroll_x: f32,
}

impl ParallaxLayer {
    /// Smaller `parallax_scale` values look further away.
    pub fn new(image: Surface, parallax_scale: f32) -> Self {
        Self {
            image: Rc::new(image),
            parallax_scale,
            scroll_x: 0.0,
        }
    }

    pub fn update(&mut self, global_scroll_x: f32) {
        self.scroll_x = global_scroll_x * self.parallax_scale;
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn parallax_scale(&self) -> f32 {
        self.parallax_scale
    }

    /// Left edge of the first visible tile, in `(-width, 0]`.
    pub fn tile_origin(&self) -> i32 {
        let width = self.image.width();
        if width == 0 {
            return 0;
        }
        -(self.scroll_x.rem_euclid(width as f32) as i32)
    }

    pub fn render(&self, target: &mut Surface) {
        let width = self.image.width();
        if width == 0 {
            return;
        }
        let copies = target.width() / width + 2;
        let origin = self.tile_origin();
        for i in 0..copies as i32 {
            target.blit(&self.image, origin + i * width as i32, 0);
        }
    }
}

/// The scene's stack of parallax layers, or a flat color when none could be loaded.
#[derive(Debug, Clone)]
pub struct Background {
    layers: Vec<ParallaxLayer>,
    fallback_color: Color,
}

impl Background {
    pub fn new(layers: Vec<ParallaxLayer>, fallback_color: Color) -> Self {
        Self { layers, fallback_color }
    }

    pub fn update(&mut self, global_scroll_x: f32) {
        for layer in &mut self.layers {
            layer.update(global_scroll_x);
        }
    }

    pub fn render(&self, target: &mut Surface) {
        if self.layers.is_empty() {
            target.fill(self.fallback_color);
            return;
        }
        for layer in &self.layers {
            layer.render(target);
        }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn is_fallback(&self) -> bool {
        self.layers.is_empty()
    }
}
