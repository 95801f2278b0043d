use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::constants::MAX_SURFACE_SIZE;
use crate::texture::{Color, Rect};

/// An owned RGBA8 pixel buffer.
///
/// The whole renderer is a handful of blits onto one of these; whatever ends
/// up on screen is the platform layer's business. Both sides are capped at
/// [`MAX_SURFACE_SIZE`]; larger requests are clamped.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    image: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.min(MAX_SURFACE_SIZE), height.min(MAX_SURFACE_SIZE)),
        }
    }

    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.min(MAX_SURFACE_SIZE), height.min(MAX_SURFACE_SIZE), color.into()),
        }
    }

    /// Wraps a decoded image. Anything past [`MAX_SURFACE_SIZE`] is cut off.
    pub fn from_image(image: RgbaImage) -> Self {
        if image.width() <= MAX_SURFACE_SIZE && image.height() <= MAX_SURFACE_SIZE {
            return Self { image };
        }
        Self {
            image: imageops::crop_imm(&image, 0, 0, MAX_SURFACE_SIZE, MAX_SURFACE_SIZE).to_image(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw pixel bytes, row-major, four bytes per pixel in RGBA order.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.image.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = color.into();
        }
    }

    pub fn fill(&mut self, color: Color) {
        let color = color.into();
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Fills `rect`, clipped to the surface. Replaces pixels outright.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let color = color.into();
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Draws a `thickness`-pixel outline just inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        let t = thickness.min(rect.w / 2 + 1).min(rect.h / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t as i32, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t as i32, rect.y, t, rect.h), color);
    }

    /// Composites `src` over this surface with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        imageops::overlay(&mut self.image, &src.image, x.into(), y.into());
    }

    /// Copies the pixels under `rect` into a new surface. Pixels outside this surface come out transparent.
    pub fn crop(&self, rect: Rect) -> Surface {
        let inside = rect.x >= 0
            && rect.y >= 0
            && rect.right() <= self.width() as i32
            && rect.bottom() <= self.height() as i32;
        if inside {
            return Self::from_image(imageops::crop_imm(&self.image, rect.x as u32, rect.y as u32, rect.w, rect.h).to_image());
        }

        let mut out = Surface::new(rect.w, rect.h);
        imageops::replace(&mut out.image, &self.image, -i64::from(rect.x), -i64::from(rect.y));
        out
    }

    /// Nearest-neighbour resize.
    pub fn scaled(&self, width: u32, height: u32) -> Surface {
        let (width, height) = (width.min(MAX_SURFACE_SIZE), height.min(MAX_SURFACE_SIZE));
        if (width, height) == self.size() {
            return self.clone();
        }
        Self {
            image: imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width() as i32);
        let y1 = rect.bottom().min(self.height() as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_clips_at_edges() {
        let mut dst = Surface::new(4, 4);
        let src = Surface::solid(3, 3, Color::RED);
        dst.blit(&src, 2, -1);

        assert_eq!(dst.pixel(2, 0), Some(Color::RED));
        assert_eq!(dst.pixel(3, 1), Some(Color::RED));
        assert_eq!(dst.pixel(1, 0), Some(Color::TRANSPARENT));
        assert_eq!(dst.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_transparent_pixels_do_not_overwrite() {
        let mut dst = Surface::solid(2, 2, Color::WHITE);
        dst.blit(&Surface::new(2, 2), 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_crop_outside_is_transparent() {
        let src = Surface::solid(2, 2, Color::BLACK);
        let out = src.crop(Rect::new(1, 1, 2, 2));
        assert_eq!(out.size(), (2, 2));
        assert_eq!(out.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(out.pixel(1, 1), Some(Color::TRANSPARENT));

        let left = src.crop(Rect::new(-1, 0, 2, 1));
        assert_eq!(left.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(left.pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_scaled_repeats_source_pixels() {
        let mut src = Surface::new(2, 1);
        src.set_pixel(0, 0, Color::RED);
        src.set_pixel(1, 0, Color::WHITE);
        let out = src.scaled(4, 2);

        assert_eq!(out.size(), (4, 2));
        assert_eq!(out.pixel(0, 1), Some(Color::RED));
        assert_eq!(out.pixel(3, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_oversized_requests_are_clamped() {
        let surface = Surface::solid(65536, 65537, Color::WHITE);
        assert_eq!(surface.size(), (MAX_SURFACE_SIZE, MAX_SURFACE_SIZE));
        assert_eq!(Surface::new(1, 1).scaled(u32::MAX, 2).size(), (MAX_SURFACE_SIZE, 2));
    }
}
