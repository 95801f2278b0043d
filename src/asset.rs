//! Sprite sheet loading: an image plus a JSON descriptor naming the rectangles to cut out of it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::background::ParallaxLayer;
use crate::constants::{DEFAULT_FRAME_DURATION, MAX_SURFACE_SIZE};
use crate::error::AssetError;
use crate::texture::{Animation, AnimationSet, Frame, Rect, Surface};

/// Descriptor of an animated entity's sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetDescriptor {
    /// Every extracted frame is resized to this, when set.
    #[serde(default)]
    pub target_size: Option<(u32, u32)>,
    #[serde(default)]
    pub animations: Vec<AnimationDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDescriptor {
    pub name: String,
    /// `[x, y, w, h]` per frame, in sheet pixels.
    pub frames_rect: Vec<[i32; 4]>,
    #[serde(rename = "loop", default = "default_loop")]
    pub looping: bool,
    /// Seconds per frame.
    #[serde(default = "default_speed")]
    pub speed: f32,
}

/// Descriptor of a background sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDescriptor {
    #[serde(default)]
    pub target_size: Option<(u32, u32)>,
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerEntry {
    pub frame_rect: [i32; 4],
    #[serde(default = "default_parallax")]
    pub parallax_scale: f32,
}

fn default_loop() -> bool {
    true
}

fn default_speed() -> f32 {
    DEFAULT_FRAME_DURATION
}

fn default_parallax() -> f32 {
    1.0
}

/// Decodes an image file into a [`Surface`].
pub fn load_surface(path: &Path) -> Result<Surface, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Surface::from_image(image.to_rgba8()))
}

fn load_descriptor<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AssetError::Descriptor {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads an entity's animations from a sheet image and its descriptor.
pub fn load_animation_set(image: &Path, data: &Path) -> Result<AnimationSet, AssetError> {
    let sheet = load_surface(image)?;
    let descriptor: SheetDescriptor = load_descriptor(data)?;
    let set = build_animation_set(&sheet, &descriptor)?;
    debug!(image = %image.display(), animations = set.len(), "Loaded animation set");
    Ok(set)
}

/// Cuts the frames named by `descriptor` out of `sheet`, preserving animation order.
///
/// Animations without frames are skipped; the rest of the sheet still loads.
pub fn build_animation_set(sheet: &Surface, descriptor: &SheetDescriptor) -> Result<AnimationSet, AssetError> {
    let mut set = AnimationSet::new();
    for animation in &descriptor.animations {
        if animation.frames_rect.is_empty() {
            warn!(animation = %animation.name, "Animation has no frames, skipping");
            continue;
        }
        let frames = animation
            .frames_rect
            .iter()
            .map(|&rect| cut(sheet, rect, descriptor.target_size, &animation.name).map(Frame::new))
            .collect::<Result<Vec<_>, _>>()?;
        set.insert(
            animation.name.clone(),
            Animation::new(frames, animation.looping, animation.speed),
        );
    }
    Ok(set)
}

/// Loads the parallax layers of a background sheet, back to front.
pub fn load_background_layers(image: &Path, data: &Path) -> Result<Vec<ParallaxLayer>, AssetError> {
    let sheet = load_surface(image)?;
    let descriptor: LayerDescriptor = load_descriptor(data)?;
    let layers = build_background_layers(&sheet, &descriptor)?;
    debug!(image = %image.display(), layers = layers.len(), "Loaded background layers");
    Ok(layers)
}

pub fn build_background_layers(sheet: &Surface, descriptor: &LayerDescriptor) -> Result<Vec<ParallaxLayer>, AssetError> {
    descriptor
        .layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let image = cut(sheet, layer.frame_rect, descriptor.target_size, &format!("layer {i}"))?;
            Ok(ParallaxLayer::new(image, layer.parallax_scale))
        })
        .collect()
}

/// Frame rectangles must be positive, and they and target sizes at most [`MAX_SURFACE_SIZE`] on each side.
fn cut(sheet: &Surface, [x, y, w, h]: [i32; 4], target_size: Option<(u32, u32)>, owner: &str) -> Result<Surface, AssetError> {
    let invalid = |x, y, w, h| AssetError::InvalidFrame {
        animation: owner.to_owned(),
        x,
        y,
        w,
        h,
    };
    let fits = |side: i32| side > 0 && side as u32 <= MAX_SURFACE_SIZE;

    if !fits(w) || !fits(h) {
        return Err(invalid(x, y, w, h));
    }
    if let Some((tw, th)) = target_size.filter(|&(tw, th)| tw > MAX_SURFACE_SIZE || th > MAX_SURFACE_SIZE) {
        let clamp = |side: u32| i32::try_from(side).unwrap_or(i32::MAX);
        return Err(invalid(0, 0, clamp(tw), clamp(th)));
    }

    let frame = sheet.crop(Rect::new(x, y, w as u32, h as u32));
    Ok(match target_size {
        Some((tw, th)) if tw > 0 && th > 0 => frame.scaled(tw, th),
        _ => frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Color;

    #[test]
    fn test_descriptor_defaults() {
        let descriptor: SheetDescriptor =
            serde_json::from_str(r#"{ "animations": [{ "name": "idle", "frames_rect": [[0, 0, 2, 2]] }] }"#).unwrap();
        let animation = &descriptor.animations[0];
        assert!(animation.looping);
        assert_eq!(animation.speed, DEFAULT_FRAME_DURATION);
        assert_eq!(descriptor.target_size, None);
    }

    #[test]
    fn test_zero_sized_rect_is_rejected() {
        let sheet = Surface::solid(4, 4, Color::WHITE);
        let descriptor: SheetDescriptor =
            serde_json::from_str(r#"{ "animations": [{ "name": "bad", "frames_rect": [[0, 0, 0, 2]] }] }"#).unwrap();
        assert!(matches!(
            build_animation_set(&sheet, &descriptor),
            Err(AssetError::InvalidFrame { w: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_rect_is_rejected() {
        let sheet = Surface::solid(4, 4, Color::WHITE);
        let descriptor: SheetDescriptor = serde_json::from_str(
            r#"{ "animations": [{ "name": "huge", "frames_rect": [[0, 0, 65536, 65537]] }] }"#,
        )
        .unwrap();
        assert!(matches!(
            build_animation_set(&sheet, &descriptor),
            Err(AssetError::InvalidFrame { w: 65536, h: 65537, .. })
        ));
    }

    #[test]
    fn test_oversized_target_size_is_rejected() {
        let sheet = Surface::solid(4, 4, Color::WHITE);
        let descriptor: SheetDescriptor = serde_json::from_str(
            r#"{ "target_size": [65536, 65537], "animations": [{ "name": "idle", "frames_rect": [[0, 0, 2, 2]] }] }"#,
        )
        .unwrap();
        assert!(matches!(
            build_animation_set(&sheet, &descriptor),
            Err(AssetError::InvalidFrame { w: 65536, h: 65537, .. })
        ));
    }
}
