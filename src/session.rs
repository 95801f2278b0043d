//! The game-session state machine.
//!
//! Owns whichever scene or menu is active, routes input, updates and
//! rendering to exactly one of them per frame, and performs every state
//! change. Scenes and menus only ever request transitions.

use std::time::Instant;

use strum_macros::Display;
use tracing::{debug, error, info, trace};

use crate::config::SceneKey;
use crate::constants::SCREEN_SIZE;
use crate::events::InputEvent;
use crate::formatter;
use crate::menu::{GameOverMenu, HighScoresMenu, MainMenu, MenuScreen, PauseMenu, SceneSelectMenu};
use crate::resources::ResourceContext;
use crate::scene::{Scene, SceneFactory, SceneSignal};
use crate::score::HighScoreTable;
use crate::texture::Surface;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GameState {
    MainMenu,
    SceneSelect,
    Playing,
    Paused,
    GameOver,
    HighScores,
    /// Terminal. Input is ignored and the run loop should exit.
    Finished,
}

/// A request to change state, issued by menus, scenes or the loop itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    MainMenu,
    SceneSelect,
    /// Start `key` fresh, unless a paused scene is waiting to be resumed.
    Play(SceneKey),
    Resume,
    Pause,
    GameOver,
    HighScores,
    Quit,
}

pub struct Session<F: SceneFactory> {
    state: GameState,
    factory: F,
    resources: ResourceContext,
    high_scores: HighScoreTable,
    scene: Option<Box<dyn Scene>>,
    main_menu: Option<MainMenu>,
    scene_select: Option<SceneSelectMenu>,
    pause_menu: Option<PauseMenu>,
    game_over: Option<GameOverMenu>,
    high_scores_menu: Option<HighScoresMenu>,
    last_frame: Option<Instant>,
    dt: f32,
    surface: Surface,
}

impl<F: SceneFactory> Session<F> {
    pub fn new(factory: F, resources: ResourceContext, high_scores: HighScoreTable) -> Self {
        let main_menu = MainMenu::new().with_text(resources.text());
        Self {
            state: GameState::MainMenu,
            factory,
            resources,
            high_scores,
            scene: None,
            main_menu: Some(main_menu),
            scene_select: None,
            pause_menu: None,
            game_over: None,
            high_scores_menu: None,
            last_frame: None,
            dt: 0.0,
            surface: Surface::new(SCREEN_SIZE.x, SCREEN_SIZE.y),
        }
    }

    /// Runs one frame: measure `dt`, dispatch input, update, render.
    ///
    /// Returns false once the session is finished.
    pub fn frame(&mut self, events: &[InputEvent], now: Instant) -> bool {
        self.dt = self
            .last_frame
            .map_or(0.0, |previous| now.saturating_duration_since(previous).as_secs_f32());
        self.last_frame = Some(now);

        for event in events {
            self.handle_event(event);
        }
        self.update(self.dt);

        let mut surface = std::mem::replace(&mut self.surface, Surface::new(0, 0));
        self.render(&mut surface);
        self.surface = surface;

        formatter::increment_frame();
        !self.is_finished()
    }

    /// Routes `event` to the active scene or menu. Only one of them ever sees it.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if self.state == GameState::Finished {
            return;
        }
        if *event == InputEvent::Quit {
            self.change_state(Transition::Quit);
            return;
        }

        if self.state == GameState::Playing {
            if let Some(scene) = self.scene.as_mut() {
                scene.handle_event(event);
            }
            self.poll_scene();
            return;
        }

        if let Some(transition) = self.active_menu().and_then(|menu| menu.handle_event(event)) {
            self.change_state(transition);
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self.state {
            GameState::Finished => {}
            GameState::Playing => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.update(dt);
                }
                self.poll_scene();
            }
            _ => {
                if let Some(menu) = self.active_menu() {
                    menu.update(dt);
                }
            }
        }
    }

    pub fn render(&self, target: &mut Surface) {
        match self.state {
            GameState::Finished => {}
            GameState::Playing => {
                if let Some(scene) = &self.scene {
                    scene.render(target);
                }
            }
            GameState::MainMenu => render_menu(self.main_menu.as_ref(), target),
            GameState::SceneSelect => render_menu(self.scene_select.as_ref(), target),
            GameState::Paused => render_menu(self.pause_menu.as_ref(), target),
            GameState::GameOver => render_menu(self.game_over.as_ref(), target),
            GameState::HighScores => render_menu(self.high_scores_menu.as_ref(), target),
        }
    }

    /// Applies a transition. Requests that make no sense in the current state are ignored.
    pub fn change_state(&mut self, transition: Transition) {
        let from = self.state;
        if from == GameState::Finished {
            return;
        }

        let text = self.resources.text();
        let to = match transition {
            Transition::Quit => GameState::Finished,
            Transition::MainMenu => {
                self.scene = None;
                self.main_menu.get_or_insert_with(|| MainMenu::new().with_text(text));
                GameState::MainMenu
            }
            Transition::SceneSelect => {
                self.scene_select.get_or_insert_with(|| SceneSelectMenu::new().with_text(text));
                GameState::SceneSelect
            }
            Transition::HighScores => {
                // Rebuilt on every visit so it shows scores recorded since the last one.
                self.high_scores_menu = Some(HighScoresMenu::new(&self.high_scores).with_text(text));
                GameState::HighScores
            }
            Transition::Play(key) => {
                if from != GameState::Paused || self.scene.is_none() {
                    match self.factory.create(key, &mut self.resources) {
                        Ok(scene) => self.scene = Some(scene),
                        Err(e) => {
                            error!(scene = %key, error = %e, "Failed to construct scene");
                            return;
                        }
                    }
                }
                GameState::Playing
            }
            Transition::Resume => {
                if from != GameState::Paused || self.scene.is_none() {
                    trace!(state = %from, "Ignoring resume");
                    return;
                }
                GameState::Playing
            }
            Transition::Pause => {
                if from != GameState::Playing {
                    trace!(state = %from, "Ignoring pause");
                    return;
                }
                self.pause_menu.get_or_insert_with(|| PauseMenu::new().with_text(text));
                GameState::Paused
            }
            Transition::GameOver => {
                let Some(scene) = self.scene.as_deref() else {
                    trace!(state = %from, "Ignoring game over without a scene");
                    return;
                };
                self.game_over = Some(GameOverMenu::new(scene, &mut self.high_scores).with_text(text));
                GameState::GameOver
            }
        };

        info!(from = %from, to = %to, "State transition");
        self.state = to;
    }

    /// Applies whatever the scene asked for during its last call.
    fn poll_scene(&mut self) {
        let Some(signal) = self.scene.as_mut().and_then(|scene| scene.take_signal()) else {
            return;
        };
        debug!(?signal, "Scene signalled");
        match signal {
            SceneSignal::Pause => self.change_state(Transition::Pause),
            SceneSignal::Died => self.change_state(Transition::GameOver),
        }
    }

    fn active_menu(&mut self) -> Option<&mut dyn MenuScreen> {
        match self.state {
            GameState::MainMenu => self.main_menu.as_mut().map(|m| m as &mut dyn MenuScreen),
            GameState::SceneSelect => self.scene_select.as_mut().map(|m| m as &mut dyn MenuScreen),
            GameState::Paused => self.pause_menu.as_mut().map(|m| m as &mut dyn MenuScreen),
            GameState::GameOver => self.game_over.as_mut().map(|m| m as &mut dyn MenuScreen),
            GameState::HighScores => self.high_scores_menu.as_mut().map(|m| m as &mut dyn MenuScreen),
            GameState::Playing | GameState::Finished => None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    pub fn scene(&self) -> Option<&dyn Scene> {
        self.scene.as_deref()
    }

    /// Elapsed time measured by the last [`Session::frame`].
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// The image produced by the last [`Session::frame`].
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    pub fn resources_mut(&mut self) -> &mut ResourceContext {
        &mut self.resources
    }

    pub fn game_over_menu(&self) -> Option<&GameOverMenu> {
        self.game_over.as_ref()
    }
}

fn render_menu<M: MenuScreen>(menu: Option<&M>, target: &mut Surface) {
    if let Some(menu) = menu {
        menu.render(target);
    }
}
