use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use smallvec::{smallvec, SmallVec};
use strum::IntoEnumIterator;
use tracing::{error, info, warn};

use crate::config::{SceneKey, Settings};
use crate::events::{InputEvent, Key};
use crate::resources::ResourceContext;
use crate::scene::RunnerSceneFactory;
use crate::score::HighScoreTable;
use crate::session::{GameState, Session};
use crate::texture::{FontFace, Surface};
use crate::timing::FrameTimings;

/// How often frame statistics are logged.
const REPORT_PERIOD: Duration = Duration::from_secs(5);

pub type Events = SmallVec<[InputEvent; 4]>;

/// The outside world: where input comes from and where frames go.
///
/// The defaults make a headless platform that only produces input.
pub trait Platform {
    /// Called once per frame with the state the session is in.
    fn poll(&mut self, state: GameState) -> Events;

    /// Shows a finished frame.
    fn present(&mut self, _frame: &Surface) -> Result<()> {
        Ok(())
    }

    /// Outline font for all text, when the platform can rasterize one.
    fn font(&self) -> Option<Rc<dyn FontFace>> {
        None
    }
}

/// Scripted player: opens a scene, flaps until it dies, retries a few times,
/// checks the high scores and quits.
#[derive(Debug, Clone)]
pub struct Autopilot {
    scene: SceneKey,
    retries_left: u32,
    played: bool,
    visited_scores: bool,
    cooldown: u32,
    flap_timer: u32,
}

/// Frames to linger on each menu before acting.
const MENU_DELAY: u32 = 20;
/// Frames between wing beats.
const FLAP_PERIOD: u32 = 24;
/// Frames the thrust key is held for.
const FLAP_HOLD: u32 = 8;

impl Autopilot {
    pub fn new(scene: SceneKey, retries: u32) -> Self {
        Self {
            scene,
            retries_left: retries,
            played: false,
            visited_scores: false,
            cooldown: MENU_DELAY,
            flap_timer: 0,
        }
    }

    fn fly(&mut self) -> Events {
        self.flap_timer = (self.flap_timer + 1) % FLAP_PERIOD;
        match self.flap_timer {
            0 => smallvec![InputEvent::KeyDown(Key::Up)],
            FLAP_HOLD => smallvec![InputEvent::KeyUp(Key::Up)],
            _ => SmallVec::new(),
        }
    }
}

impl Platform for Autopilot {
    fn poll(&mut self, state: GameState) -> Events {
        if state == GameState::Playing {
            self.cooldown = MENU_DELAY;
            return self.fly();
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return SmallVec::new();
        }
        self.cooldown = MENU_DELAY;

        let press = InputEvent::KeyDown;
        match state {
            GameState::MainMenu if !self.played => smallvec![press(Key::Enter)],
            GameState::MainMenu if !self.visited_scores => {
                self.visited_scores = true;
                smallvec![press(Key::Down), press(Key::Enter)]
            }
            GameState::MainMenu => smallvec![InputEvent::Quit],
            GameState::SceneSelect => {
                self.played = true;
                let index = SceneKey::iter().position(|key| key == self.scene).unwrap_or(0);
                let mut events: Events = std::iter::repeat_n(press(Key::Down), index).collect();
                events.push(press(Key::Enter));
                events
            }
            GameState::GameOver if self.retries_left > 0 => {
                self.retries_left -= 1;
                smallvec![press(Key::Enter)]
            }
            GameState::GameOver => smallvec![press(Key::Down), press(Key::Enter)],
            GameState::Paused | GameState::HighScores => smallvec![press(Key::Enter)],
            GameState::Playing | GameState::Finished => SmallVec::new(),
        }
    }
}

pub struct App {
    session: Session<RunnerSceneFactory>,
    platform: Box<dyn Platform>,
    timings: FrameTimings,
    loop_time: Duration,
    frame_limit: Option<u64>,
    frames: u64,
    last_report: Instant,
}

impl App {
    pub fn new(settings: &Settings, platform: Box<dyn Platform>, frame_limit: Option<u64>) -> Result<Self> {
        if settings.target_fps == 0 {
            bail!("target_fps must be positive");
        }
        if !settings.assets_dir.is_dir() {
            warn!(path = %settings.assets_dir.display(), "Assets directory not found, every sprite will be a placeholder");
        }

        let mut resources = ResourceContext::new(&settings.assets_dir, settings.seed);
        if let Some(font) = platform.font() {
            resources.set_font(font);
        }
        let high_scores = HighScoreTable::load(&settings.high_score_path);
        let session = Session::new(RunnerSceneFactory, resources, high_scores);

        Ok(Self {
            session,
            platform,
            timings: FrameTimings::new(),
            loop_time: Duration::from_secs(1) / settings.target_fps,
            frame_limit,
            frames: 0,
            last_report: Instant::now(),
        })
    }

    /// Runs one frame and paces it. Returns false when the loop should stop.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let events = self.platform.poll(self.session.state());
        let running = self.session.frame(&events, start);
        self.frames += 1;

        if let Err(e) = self.platform.present(self.session.surface()) {
            error!(error = %e, "Failed to present frame");
            return false;
        }

        let elapsed = start.elapsed();
        self.timings.add(elapsed);

        if !running {
            info!(frames = self.frames, "Session finished");
            return false;
        }
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            info!(frames = self.frames, "Frame limit reached");
            return false;
        }

        if elapsed < self.loop_time {
            spin_sleep::sleep(self.loop_time - elapsed);
        } else {
            warn!("Game loop behind schedule by: {:?}", elapsed - self.loop_time);
        }

        if self.last_report.elapsed() >= REPORT_PERIOD {
            info!(timings = %self.timings.format_display(), "Frame timings");
            self.last_report = Instant::now();
        }

        true
    }

    pub fn session(&self) -> &Session<RunnerSceneFactory> {
        &self.session
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
