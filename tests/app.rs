use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use pantaneiro::app::{App, Events, Platform};
use pantaneiro::config::Settings;
use pantaneiro::events::InputEvent;
use pantaneiro::session::GameState;
use pantaneiro::texture::{Color, FontFace, Surface};
use smallvec::smallvec;
use speculoos::prelude::*;
use tempfile::TempDir;

/// Draws every line as a solid block and remembers what it was asked to draw.
#[derive(Debug, Default)]
struct RecordingFace {
    lines: RefCell<Vec<String>>,
}

impl FontFace for RecordingFace {
    fn render(&self, text: &str, height: u32, color: Color) -> Option<Surface> {
        self.lines.borrow_mut().push(text.to_owned());
        let (w, h) = self.measure(text, height)?;
        Some(Surface::solid(w, h, color))
    }

    fn measure(&self, text: &str, height: u32) -> Option<(u32, u32)> {
        Some((text.chars().count() as u32 * 2, height))
    }
}

/// Quits after `frames` polls and keeps the size of every presented frame.
struct FakePlatform {
    frames: u32,
    presented: Rc<RefCell<Vec<(u32, u32)>>>,
    face: Option<Rc<RecordingFace>>,
    fail_present: bool,
}

impl FakePlatform {
    fn new(frames: u32) -> Self {
        Self {
            frames,
            presented: Rc::default(),
            face: None,
            fail_present: false,
        }
    }
}

impl Platform for FakePlatform {
    fn poll(&mut self, _state: GameState) -> Events {
        if self.frames == 0 {
            return smallvec![InputEvent::Quit];
        }
        self.frames -= 1;
        Events::new()
    }

    fn present(&mut self, frame: &Surface) -> Result<()> {
        if self.fail_present {
            return Err(anyhow!("display lost"));
        }
        self.presented.borrow_mut().push(frame.size());
        Ok(())
    }

    fn font(&self) -> Option<Rc<dyn FontFace>> {
        self.face.clone().map(|face| face as Rc<dyn FontFace>)
    }
}

fn settings(dir: &TempDir) -> Settings {
    Settings {
        assets_dir: dir.path().join("assets"),
        high_score_path: dir.path().join("scores.json"),
        seed: Some(3),
        target_fps: 1000,
    }
}

#[test]
fn test_every_frame_is_presented_until_quit() {
    let dir = TempDir::new().unwrap();
    let platform = FakePlatform::new(2);
    let presented = Rc::clone(&platform.presented);
    let mut app = App::new(&settings(&dir), Box::new(platform), None).unwrap();

    let mut frames = 0;
    while app.run() {
        frames += 1;
    }

    assert_that(&frames).is_equal_to(2);
    assert_that(&app.session().state()).is_equal_to(GameState::Finished);
    assert_that(&*presented.borrow()).is_equal_to(vec![(1024_u32, 576_u32); 3]);
}

#[test]
fn test_failed_present_stops_the_loop() {
    let dir = TempDir::new().unwrap();
    let mut platform = FakePlatform::new(10);
    platform.fail_present = true;
    let mut app = App::new(&settings(&dir), Box::new(platform), None).unwrap();

    assert_that(&app.run()).is_false();
    assert_that(&app.frames()).is_equal_to(1);
}

#[test]
fn test_platform_font_draws_menu_text() {
    let dir = TempDir::new().unwrap();
    let face = Rc::new(RecordingFace::default());
    let mut platform = FakePlatform::new(1);
    platform.face = Some(Rc::clone(&face));
    let mut app = App::new(&settings(&dir), Box::new(platform), None).unwrap();

    app.run();

    let lines = face.lines.borrow();
    assert_that(&lines.contains(&"PANTANEIRO".to_owned())).is_true();
    assert_that(&lines.contains(&"PLAY".to_owned())).is_true();
}
