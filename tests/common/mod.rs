#![allow(dead_code)]

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use pantaneiro::config::{SceneConfig, SceneKey};
use pantaneiro::error::{GameError, GameResult};
use pantaneiro::events::{InputEvent, Key};
use pantaneiro::resources::ResourceContext;
use pantaneiro::scene::{Scene, SceneFactory, SceneSignal};
use pantaneiro::score::ScoreManager;
use pantaneiro::texture::{Animation, AnimationSet, Color, Frame, Surface};

pub fn solid_frame(w: u32, h: u32, color: Color) -> Frame {
    Frame::new(Surface::solid(w, h, color))
}

/// Frames of increasing width so the displayed frame can be told apart by its size.
pub fn numbered_frames(count: u32) -> Vec<Frame> {
    (1..=count).map(|i| solid_frame(i * 10, 10, Color::WHITE)).collect()
}

pub fn single_animation_set(name: &str, frames: u32, looping: bool, duration: f32) -> Rc<AnimationSet> {
    let mut set = AnimationSet::new();
    set.insert(name, Animation::new(numbered_frames(frames), looping, duration));
    Rc::new(set)
}

/// A scene that does nothing but score and signal on demand.
///
/// Space kills the player, Escape asks for a pause.
pub struct ScriptedScene {
    key: SceneKey,
    config: SceneConfig,
    score: ScoreManager,
    signal: Option<SceneSignal>,
    pub serial: u32,
}

impl Scene for ScriptedScene {
    fn key(&self) -> SceneKey {
        self.key
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if event.is_press(Key::Space) {
            self.signal = Some(SceneSignal::Died);
        } else if event.is_press(Key::Escape) {
            self.signal = Some(SceneSignal::Pause);
        }
    }

    fn update(&mut self, dt: f32) {
        self.score.update(dt, 1000.0);
    }

    fn render(&self, target: &mut Surface) {
        target.fill(Color::BLACK);
    }

    fn config(&self) -> &SceneConfig {
        &self.config
    }

    fn score(&self) -> &ScoreManager {
        &self.score
    }

    fn score_mut(&mut self) -> &mut ScoreManager {
        &mut self.score
    }

    fn take_signal(&mut self) -> Option<SceneSignal> {
        self.signal.take()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Counts constructions; optionally refuses to build one key.
#[derive(Default, Clone)]
pub struct ScriptedFactory {
    pub created: Rc<Cell<u32>>,
    pub broken: Option<SceneKey>,
}

impl SceneFactory for ScriptedFactory {
    fn create(&self, key: SceneKey, _resources: &mut ResourceContext) -> GameResult<Box<dyn Scene>> {
        if self.broken == Some(key) {
            return Err(GameError::InvalidState(format!("{key} is broken")));
        }
        self.created.set(self.created.get() + 1);
        let config = SceneConfig::preset(key);
        Ok(Box::new(ScriptedScene {
            key,
            score: ScoreManager::new(config.scene_name.clone()),
            config,
            signal: None,
            serial: self.created.get(),
        }))
    }
}

pub fn press(key: Key) -> InputEvent {
    InputEvent::KeyDown(key)
}
