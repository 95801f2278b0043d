use std::rc::Rc;

use glam::Vec2;
use tracing::trace;

use crate::collision::Collidable;
use crate::texture::{AnimationSet, Color, Frame, Mask, Rect, Surface};

/// Which point of the bounding rectangle the entity's position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    /// Middle of the bottom edge; used by actors that stand on the ground.
    MidBottom,
}

/// What the entity is currently showing.
#[derive(Debug, Clone)]
enum Visual {
    Animated {
        set: Rc<AnimationSet>,
        current: String,
        frame: usize,
        elapsed: f32,
        finished: bool,
    },
    /// Placeholder for entities without animation data. Never changes.
    Static(Frame),
}

/// A visible, collidable actor with a named animation set and a playback cursor.
///
/// The displayed frame decides both the bounding rectangle and the collision
/// mask. They are refreshed together on every frame change, never separately.
#[derive(Debug, Clone)]
pub struct AnimatedEntity {
    position: Vec2,
    anchor: Anchor,
    rect: Rect,
    visual: Visual,
}

impl AnimatedEntity {
    /// Creates an entity playing the first animation of `set`.
    ///
    /// Falls back to a `fallback_size` block of `fallback_color` when the set
    /// has no playable animation.
    pub fn new(set: Rc<AnimationSet>, position: Vec2, fallback_size: (u32, u32), fallback_color: Color) -> Self {
        let first = set
            .names()
            .find(|name| set.get(name).is_some_and(|a| !a.is_empty()))
            .map(str::to_owned);

        match first {
            Some(current) => {
                let mut entity = Self {
                    position,
                    anchor: Anchor::Center,
                    rect: Rect::default(),
                    visual: Visual::Animated {
                        set,
                        current,
                        frame: 0,
                        elapsed: 0.0,
                        finished: false,
                    },
                };
                entity.refresh_rect();
                entity
            }
            None => Self::placeholder(position, fallback_size, fallback_color),
        }
    }

    /// Creates an entity showing a solid block. `update` is a no-op for it forever.
    pub fn placeholder(position: Vec2, size: (u32, u32), color: Color) -> Self {
        Self::with_static_frame(position, Frame::new(Surface::solid(size.0, size.1, color)))
    }

    /// Creates an entity showing a single fixed frame.
    pub fn with_static_frame(position: Vec2, frame: Frame) -> Self {
        let mut entity = Self {
            position,
            anchor: Anchor::Center,
            rect: Rect::default(),
            visual: Visual::Static(frame),
        };
        entity.refresh_rect();
        entity
    }

    /// Re-anchors the entity; the position is kept, the rectangle moves.
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self.refresh_rect();
        self
    }

    /// Switches to animation `name`, restarting it from its first frame.
    ///
    /// Does nothing when `name` is already playing, is unknown, or has no
    /// frames. Callers get no feedback either way.
    pub fn set_animation(&mut self, name: &str) {
        let Visual::Animated {
            set,
            current,
            frame,
            elapsed,
            finished,
        } = &mut self.visual
        else {
            return;
        };

        if current == name || !set.get(name).is_some_and(|a| !a.is_empty()) {
            return;
        }

        trace!(from = %current, to = name, "Switching animation");
        *current = name.to_owned();
        *frame = 0;
        *elapsed = 0.0;
        *finished = false;
        self.refresh_rect();
    }

    /// Advances playback by `dt` seconds.
    ///
    /// Several frames may be consumed in one call; the remainder is kept for
    /// the next one. Non-looping animations stop on their last frame.
    pub fn update(&mut self, dt: f32) {
        let Visual::Animated {
            set,
            current,
            frame,
            elapsed,
            finished,
        } = &mut self.visual
        else {
            return;
        };

        if *finished {
            return;
        }
        let Some(animation) = set.get(current) else {
            return;
        };
        if animation.is_empty() {
            return;
        }

        let duration = animation.frame_duration();
        let last = animation.len() - 1;
        let mut changed = false;

        *elapsed += dt;
        // Whole loops change nothing; drop them so a huge `dt` costs at most one pass.
        let cycle = duration * animation.len() as f32;
        if animation.looping() && *elapsed >= cycle {
            *elapsed %= cycle;
        }
        while *elapsed >= duration {
            *elapsed -= duration;
            if *frame < last {
                *frame += 1;
                changed = true;
            } else if animation.looping() {
                *frame = 0;
                changed = true;
            } else {
                *finished = true;
                break;
            }
        }

        if changed {
            self.refresh_rect();
        }
    }

    /// Name of the animation being played, or `None` for placeholder entities.
    pub fn current_animation(&self) -> Option<&str> {
        match &self.visual {
            Visual::Animated { current, .. } => Some(current.as_str()),
            Visual::Static(_) => None,
        }
    }

    pub fn frame_index(&self) -> usize {
        match &self.visual {
            Visual::Animated { frame, .. } => *frame,
            Visual::Static(_) => 0,
        }
    }

    /// Time accumulated towards the next frame advance.
    pub fn frame_elapsed(&self) -> f32 {
        match &self.visual {
            Visual::Animated { elapsed, .. } => *elapsed,
            Visual::Static(_) => 0.0,
        }
    }

    /// Whether a non-looping animation has reached its end.
    pub fn is_finished(&self) -> bool {
        matches!(self.visual, Visual::Animated { finished: true, .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.visual, Visual::Static(_))
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Moves the entity by `delta`, keeping the rectangle in step.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.place_rect();
    }

    /// Places the entity at `position` on behalf of something other than its own movement rule.
    pub fn apply_override_position(&mut self, position: Vec2) {
        self.position = position;
        self.place_rect();
    }

    pub fn image(&self) -> &Surface {
        self.current_frame().surface()
    }

    pub fn mask(&self) -> &Mask {
        self.current_frame().mask()
    }

    pub fn draw(&self, target: &mut Surface) {
        target.blit(self.image(), self.rect.x, self.rect.y);
    }

    fn current_frame(&self) -> &Frame {
        match &self.visual {
            Visual::Animated { set, current, frame, .. } => set
                .get(current)
                .and_then(|a| a.frame(*frame))
                .expect("animated visual always points at an existing frame"),
            Visual::Static(frame) => frame,
        }
    }

    /// Resizes the rectangle to the displayed frame and re-anchors it.
    fn refresh_rect(&mut self) {
        let (w, h) = self.current_frame().size();
        self.rect.w = w;
        self.rect.h = h;
        self.place_rect();
    }

    fn place_rect(&mut self) {
        match self.anchor {
            Anchor::Center => self.rect.set_center(self.position),
            Anchor::MidBottom => self.rect.set_midbottom(self.position),
        }
    }
}

impl Collidable for AnimatedEntity {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mask(&self) -> &Mask {
        self.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Animation;

    #[test]
    fn test_empty_set_falls_back_to_placeholder() {
        let entity = AnimatedEntity::new(Rc::new(AnimationSet::new()), Vec2::ZERO, (8, 4), Color::RED);
        assert!(entity.is_placeholder());
        assert_eq!(entity.current_animation(), None);
        assert_eq!(entity.rect().w, 8);
        assert_eq!(entity.mask().count(), 32);
    }

    #[test]
    fn test_skips_frameless_animations_when_choosing_start() {
        let mut set = AnimationSet::new();
        set.insert("empty", Animation::new(Vec::new(), true, 0.1));
        set.insert("idle", Animation::new(vec![Frame::new(Surface::solid(2, 2, Color::WHITE))], true, 0.1));
        let entity = AnimatedEntity::new(Rc::new(set), Vec2::ZERO, (1, 1), Color::RED);
        assert_eq!(entity.current_animation(), Some("idle"));
    }
}
