use crate::constants::{MASK_ALPHA_THRESHOLD, MAX_SURFACE_SIZE};
use crate::texture::{Rect, Surface};

/// A per-pixel opacity bitmap, one bit per pixel, row-major.
///
/// Always derived from a [`Surface`]; an actor's mask must be rebuilt whenever
/// the surface it displays changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<u64>,
}

impl Mask {
    pub fn from_surface(surface: &Surface) -> Self {
        let (width, height) = surface.size();
        let mut mask = Self::empty(width, height);
        for (i, pixel) in surface.image().pixels().enumerate() {
            if pixel.0[3] > MASK_ALPHA_THRESHOLD {
                mask.bits[i / 64] |= 1 << (i % 64);
            }
        }
        mask
    }

    /// An all-clear mask. Sides are clamped to [`MAX_SURFACE_SIZE`] like surfaces are.
    pub fn empty(width: u32, height: u32) -> Self {
        let (width, height) = (width.min(MAX_SURFACE_SIZE), height.min(MAX_SURFACE_SIZE));
        let len = pixel_count(width, height).div_ceil(64);
        Self {
            width,
            height,
            bits: vec![0; len],
        }
    }

    /// A mask with every pixel set.
    pub fn full(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        let count = pixel_count(mask.width, mask.height);
        for i in 0..count {
            mask.bits[i / 64] |= 1 << (i % 64);
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|word| word.count_ones()).sum()
    }

    /// Whether this mask, placed at `at`, shares at least one opaque pixel with `other` placed at `other_at`.
    ///
    /// Only the x/y of the rectangles are used; sizes come from the masks themselves.
    pub fn overlaps(&self, at: Rect, other: &Mask, other_at: Rect) -> bool {
        let a = Rect::new(at.x, at.y, self.width, self.height);
        let b = Rect::new(other_at.x, other_at.y, other.width, other.height);
        if !a.intersects(&b) {
            return false;
        }

        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = a.right().min(b.right());
        let y1 = a.bottom().min(b.bottom());

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x - a.x, y - a.y) && other.get(x - b.x, y - b.y) {
                    return true;
                }
            }
        }
        false
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize).checked_mul(height as usize).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Color;

    #[test]
    fn test_threshold_is_exclusive() {
        let mut surface = Surface::new(2, 1);
        surface.set_pixel(0, 0, Color::rgba(0, 0, 0, MASK_ALPHA_THRESHOLD));
        surface.set_pixel(1, 0, Color::rgba(0, 0, 0, MASK_ALPHA_THRESHOLD + 1));
        let mask = Mask::from_surface(&surface);

        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_full_mask_count() {
        assert_eq!(Mask::full(10, 13).count(), 130);
    }

    #[test]
    fn test_full_mask_of_huge_size_is_clamped() {
        let mask = Mask::full(65536, 65537);
        assert_eq!((mask.width(), mask.height()), (MAX_SURFACE_SIZE, MAX_SURFACE_SIZE));
        assert!(mask.get(MAX_SURFACE_SIZE as i32 - 1, MAX_SURFACE_SIZE as i32 - 1));
    }
}
