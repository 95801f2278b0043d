use pantaneiro::config::SceneKey;
use pantaneiro::events::{InputEvent, Key};
use pantaneiro::menu::{HighScoresMenu, MainMenu, Menu, MenuScreen, PauseMenu, SceneSelectMenu};
use pantaneiro::score::HighScoreTable;
use pantaneiro::session::Transition;
use pantaneiro::texture::Surface;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn press(key: Key) -> InputEvent {
    InputEvent::KeyDown(key)
}

fn three_options() -> Menu {
    Menu::new(vec![
        ("A".to_owned(), Transition::MainMenu),
        ("B".to_owned(), Transition::HighScores),
        ("C".to_owned(), Transition::Quit),
    ])
}

#[test]
fn test_selection_wraps_both_ways() {
    let mut menu = three_options();

    menu.handle_event(&press(Key::Up));
    assert_that(&menu.selected()).is_equal_to(2);

    menu.handle_event(&press(Key::Down));
    assert_that(&menu.selected()).is_equal_to(0);
}

#[test]
fn test_enter_confirms_selection() {
    let mut menu = three_options();
    menu.handle_event(&press(Key::Down));

    assert_that(&menu.handle_event(&press(Key::Enter))).is_equal_to(Some(Transition::HighScores));
}

#[test]
fn test_axis_moves_selection() {
    let mut menu = three_options();

    menu.handle_event(&InputEvent::Axis(1.0));
    assert_that(&menu.selected()).is_equal_to(1);

    menu.handle_event(&InputEvent::Axis(0.4));
    assert_that(&menu.selected()).is_equal_to(1);
}

#[test]
fn test_buttons_do_not_overlap() {
    let menu = three_options();
    for i in 0..2 {
        assert_that(&menu.button_rect(i).intersects(&menu.button_rect(i + 1))).is_false();
    }
}

#[test]
fn test_main_menu_options() {
    let mut menu = MainMenu::new();
    assert_eq!(menu.menu().labels().collect::<Vec<_>>(), vec!["PLAY", "SCORES", "QUIT"]);
    assert_that(&menu.handle_event(&press(Key::Enter))).is_equal_to(Some(Transition::SceneSelect));
}

#[test]
fn test_scene_select_lists_every_scene() {
    let mut menu = SceneSelectMenu::new();
    assert_eq!(menu.menu().labels().collect::<Vec<_>>(), vec!["DEMO", "FOREST", "SKY", "RIVER"]);

    for _ in 0..3 {
        menu.handle_event(&press(Key::Down));
    }
    assert_that(&menu.handle_event(&press(Key::Enter))).is_equal_to(Some(Transition::Play(SceneKey::Water)));
    assert_that(&menu.handle_event(&press(Key::Escape))).is_equal_to(Some(Transition::MainMenu));
}

#[test]
fn test_pause_escape_resumes() {
    let mut menu = PauseMenu::new();
    assert_that(&menu.handle_event(&press(Key::Escape))).is_equal_to(Some(Transition::Resume));
}

#[test]
fn test_high_scores_snapshot() {
    let mut table = HighScoreTable::in_memory();
    table.record("sky", 30);
    let mut menu = HighScoresMenu::new(&table);
    table.record("sky", 40);

    assert_eq!(menu.scores(), &[("sky".to_owned(), vec![30])]);
    assert_that(&menu.handle_event(&InputEvent::KeyUp(Key::Enter))).is_none();
    assert_that(&menu.handle_event(&press(Key::Left))).is_equal_to(Some(Transition::MainMenu));
}

#[test]
fn test_menus_render_without_panicking() {
    let mut target = Surface::new(1024, 576);
    MainMenu::new().render(&mut target);
    HighScoresMenu::new(&HighScoreTable::in_memory()).render(&mut target);
    assert_that(&target.pixel(0, 0)).is_equal_to(Some(pantaneiro::texture::Color::WHITE));
}
