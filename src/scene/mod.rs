//! Playable scenes and the seam through which the session creates them.

use std::any::Any;

use crate::config::{SceneConfig, SceneKey};
use crate::error::GameResult;
use crate::events::InputEvent;
use crate::resources::ResourceContext;
use crate::score::ScoreManager;
use crate::texture::Surface;

pub mod behavior;
pub mod player;
pub mod runner;

pub use behavior::{Actor, Behavior, BehaviorContext};
pub use player::Player;
pub use runner::RunnerScene;

/// Requests a scene makes of the session. The session decides what happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSignal {
    Pause,
    Died,
}

/// A self-contained level driven by the session.
pub trait Scene {
    fn key(&self) -> SceneKey;

    fn handle_event(&mut self, event: &InputEvent);

    fn update(&mut self, dt: f32);

    fn render(&self, target: &mut Surface);

    fn config(&self) -> &SceneConfig;

    fn score(&self) -> &ScoreManager;

    fn score_mut(&mut self) -> &mut ScoreManager;

    /// Takes the pending signal, if any. Each signal is delivered once.
    fn take_signal(&mut self) -> Option<SceneSignal>;

    /// Lets callers holding a `dyn Scene` reach the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Builds scenes by key.
pub trait SceneFactory {
    fn create(&self, key: SceneKey, resources: &mut ResourceContext) -> GameResult<Box<dyn Scene>>;
}

/// Builds [`RunnerScene`]s from each key's configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunnerSceneFactory;

impl SceneFactory for RunnerSceneFactory {
    fn create(&self, key: SceneKey, resources: &mut ResourceContext) -> GameResult<Box<dyn Scene>> {
        let config = SceneConfig::load(key, resources.assets_dir());
        Ok(Box::new(RunnerScene::new(key, config, resources)?))
    }
}
