use std::fs;
use std::time::{Duration, Instant};

use pantaneiro::config::SceneKey;
use pantaneiro::entity::Groups;
use pantaneiro::events::{InputEvent, Key};
use pantaneiro::resources::ResourceContext;
use pantaneiro::scene::{RunnerScene, RunnerSceneFactory, Scene, SceneFactory};
use pantaneiro::score::HighScoreTable;
use pantaneiro::session::{GameState, Session, Transition};
use speculoos::prelude::*;
use tempfile::TempDir;

mod common;
use common::{press, ScriptedFactory};

fn session(factory: ScriptedFactory) -> Session<ScriptedFactory> {
    Session::new(factory, ResourceContext::new("missing-assets", Some(9)), HighScoreTable::in_memory())
}

/// Main menu -> scene select -> first scene.
fn start_playing<F: SceneFactory>(session: &mut Session<F>) {
    session.handle_event(&press(Key::Enter));
    session.handle_event(&press(Key::Enter));
}

#[test]
fn test_menus_lead_into_a_scene() {
    let mut session = session(ScriptedFactory::default());
    assert_that(&session.state()).is_equal_to(GameState::MainMenu);

    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::SceneSelect);

    session.handle_event(&press(Key::Down));
    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::Playing);
    assert_that(&session.scene().map(|s| s.key())).is_equal_to(Some(SceneKey::Forest));
}

#[test]
fn test_death_records_score_and_retry_builds_fresh_scene() {
    let factory = ScriptedFactory::default();
    let created = factory.created.clone();
    let mut session = session(factory);
    start_playing(&mut session);

    let t0 = Instant::now();
    session.frame(&[], t0);
    session.frame(&[], t0 + Duration::from_secs(1));
    session.handle_event(&press(Key::Space));

    assert_that(&session.state()).is_equal_to(GameState::GameOver);
    let menu = session.game_over_menu().unwrap();
    assert_that(&menu.score()).is_equal_to(10);
    assert_that(&menu.is_new_record()).is_true();
    assert_that(&session.high_scores().best("demo")).is_equal_to(Some(10));

    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::Playing);
    assert_that(&created.get()).is_equal_to(2);
    assert_that(&session.scene().unwrap().score().get_score()).is_equal_to(0);
}

/// Trunks roll along the floor every second and nothing else spawns, so a
/// player that never flaps falls onto the first one.
const FALLING_DEMO: &str = r#"{
    "scroller_cfg": { "initial_speed": 200.0 },
    "obstacles_cfg": {
        "initial_delay": 1.0,
        "base_interval": 1.0,
        "min_interval": 1.0,
        "speed_divisor": 0.0,
        "variants": [{ "kind": "grounded", "entity": { "fallback_size": [60, 180] } }]
    }
}"#;

fn runner(session: &Session<RunnerSceneFactory>) -> &RunnerScene {
    session.scene().and_then(|scene| scene.as_any().downcast_ref::<RunnerScene>()).unwrap()
}

#[test]
fn test_retry_after_death_restarts_the_runner_from_scratch() {
    let assets = TempDir::new().unwrap();
    fs::create_dir_all(assets.path().join("config")).unwrap();
    fs::write(assets.path().join("config").join("demo.json"), FALLING_DEMO).unwrap();
    let resources = ResourceContext::new(assets.path(), Some(5));
    let mut session = Session::new(RunnerSceneFactory, resources, HighScoreTable::in_memory());
    start_playing(&mut session);
    assert_that(&session.state()).is_equal_to(GameState::Playing);

    let t0 = Instant::now();
    for frame in 0..200u64 {
        if session.state() != GameState::Playing {
            break;
        }
        session.frame(&[], t0 + Duration::from_millis(100 * frame));
    }
    assert_that(&session.state()).is_equal_to(GameState::GameOver);
    let dead = runner(&session);
    assert_that(&dead.player().is_alive()).is_false();
    assert_that(&dead.scroller().offset()).is_greater_than(0.0);

    session.handle_event(&press(Key::Enter));

    assert_that(&session.state()).is_equal_to(GameState::Playing);
    let fresh = runner(&session);
    assert_that(&fresh.player().is_alive()).is_true();
    assert_that(&fresh.scroller().offset()).is_equal_to(0.0);
    assert_that(&fresh.actors().len_group(Groups::OBSTACLES | Groups::ENEMIES)).is_equal_to(0);
    assert_that(&fresh.score().get_score()).is_equal_to(0);
}

#[test]
fn test_pause_and_resume_keep_the_scene() {
    let factory = ScriptedFactory::default();
    let created = factory.created.clone();
    let mut session = session(factory);
    start_playing(&mut session);

    session.handle_event(&press(Key::Escape));
    assert_that(&session.state()).is_equal_to(GameState::Paused);

    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::Playing);
    assert_that(&created.get()).is_equal_to(1);
}

#[test]
fn test_paused_scene_does_not_advance() {
    let mut session = session(ScriptedFactory::default());
    start_playing(&mut session);
    session.handle_event(&press(Key::Escape));

    session.update(5.0);

    assert_that(&session.scene().unwrap().score().get_score()).is_equal_to(0);
}

#[test]
fn test_main_menu_from_pause_discards_scene() {
    let mut session = session(ScriptedFactory::default());
    start_playing(&mut session);
    session.handle_event(&press(Key::Escape));

    session.handle_event(&press(Key::Down));
    session.handle_event(&press(Key::Enter));

    assert_that(&session.state()).is_equal_to(GameState::MainMenu);
    assert_that(&session.scene().is_none()).is_true();
}

#[test]
fn test_quit_is_terminal() {
    let mut session = session(ScriptedFactory::default());
    start_playing(&mut session);

    let running = session.frame(&[InputEvent::Quit], Instant::now());

    assert_that(&running).is_false();
    assert_that(&session.is_finished()).is_true();

    session.change_state(Transition::MainMenu);
    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::Finished);
}

#[test]
fn test_high_scores_close_on_any_key() {
    let mut session = session(ScriptedFactory::default());
    session.handle_event(&press(Key::Down));
    session.handle_event(&press(Key::Enter));
    assert_that(&session.state()).is_equal_to(GameState::HighScores);

    session.handle_event(&press(Key::Space));
    assert_that(&session.state()).is_equal_to(GameState::MainMenu);
}

#[test]
fn test_failed_scene_construction_stays_put() {
    let factory = ScriptedFactory {
        broken: Some(SceneKey::Demo),
        ..ScriptedFactory::default()
    };
    let mut session = session(factory);

    start_playing(&mut session);

    assert_that(&session.state()).is_equal_to(GameState::SceneSelect);
    assert_that(&session.scene().is_none()).is_true();
}

#[test]
fn test_requests_that_make_no_sense_are_ignored() {
    let mut session = session(ScriptedFactory::default());

    session.change_state(Transition::Resume);
    session.change_state(Transition::Pause);
    session.change_state(Transition::GameOver);

    assert_that(&session.state()).is_equal_to(GameState::MainMenu);
}

#[test]
fn test_frame_measures_elapsed_time() {
    let mut session = session(ScriptedFactory::default());
    let t0 = Instant::now();

    session.frame(&[], t0);
    assert_that(&session.dt()).is_equal_to(0.0);

    session.frame(&[], t0 + Duration::from_millis(250));
    assert!((session.dt() - 0.25).abs() < 1e-6);
}

#[test]
fn test_frame_renders_the_active_screen() {
    let mut session = session(ScriptedFactory::default());
    start_playing(&mut session);

    session.frame(&[], Instant::now());

    assert_that(&session.surface().pixel(10, 10)).is_equal_to(Some(pantaneiro::texture::Color::BLACK));
}
