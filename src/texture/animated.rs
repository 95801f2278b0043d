use smallvec::SmallVec;

use crate::constants::DEFAULT_FRAME_DURATION;
use crate::texture::{Mask, Surface};

/// One displayable frame together with its collision mask.
///
/// The two are built together and never updated separately, so any actor
/// showing a frame automatically gets the matching mask.
#[derive(Debug, Clone)]
pub struct Frame {
    surface: Surface,
    mask: Mask,
}

impl Frame {
    pub fn new(surface: Surface) -> Self {
        let mask = Mask::from_surface(&surface);
        Self { surface, mask }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn size(&self) -> (u32, u32) {
        self.surface.size()
    }
}

/// An ordered frame sequence with its playback metadata.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Frame>,
    looping: bool,
    frame_duration: f32,
}

impl Animation {
    pub fn new(frames: Vec<Frame>, looping: bool, frame_duration: f32) -> Self {
        let frame_duration = if frame_duration.is_finite() && frame_duration > 0.0 {
            frame_duration
        } else {
            DEFAULT_FRAME_DURATION
        };
        Self {
            frames,
            looping,
            frame_duration,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }
}

/// The animations of one sprite sheet, keyed by name, in descriptor order.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    entries: SmallVec<[(String, Animation); 4]>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an animation. A later entry with the same name replaces the earlier one in place.
    pub fn insert(&mut self, name: impl Into<String>, animation: Animation) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = animation,
            None => self.entries.push((name, animation)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The first animation in descriptor order; entities start on it.
    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
