//! Menu screens. Each one turns input into a [`Transition`] request and never
//! touches the session itself.

use glam::Vec2;

use crate::constants::SCREEN_WIDTH;
use crate::events::{InputEvent, Key};
use crate::session::Transition;
use crate::texture::{Color, Rect, Surface, TextRenderer};

pub mod game_over;
pub mod high_scores;
pub mod main_menu;
pub mod pause;
pub mod scene_select;

pub use game_over::GameOverMenu;
pub use high_scores::HighScoresMenu;
pub use main_menu::MainMenu;
pub use pause::PauseMenu;
pub use scene_select::SceneSelectMenu;

const BUTTON_WIDTH: u32 = 240;
const BUTTON_HEIGHT: u32 = 60;
const BUTTON_BORDER: u32 = 3;
const FIRST_BUTTON_Y: i32 = 220;
const BUTTON_SPACING: i32 = 80;

const IDLE_COLOR: Color = Color::BLACK;
const SELECTED_COLOR: Color = Color::RED;

/// Common surface of every menu screen.
pub trait MenuScreen {
    /// Returns the transition the player asked for, if any.
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition>;

    fn update(&mut self, _dt: f32) {}

    fn render(&self, target: &mut Surface);
}

/// A vertical list of buttons with a wrapping selection cursor.
#[derive(Debug, Clone)]
pub struct Menu {
    options: Vec<(String, Transition)>,
    selected: usize,
    label: TextRenderer,
}

impl Menu {
    pub fn new(options: Vec<(String, Transition)>) -> Self {
        Self {
            options,
            selected: 0,
            label: TextRenderer::new(4),
        }
    }

    /// `Up`/`Down` move the cursor, `Enter` confirms the selected option.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        match *event {
            InputEvent::KeyDown(Key::Down) => self.move_selection(1),
            InputEvent::KeyDown(Key::Up) => self.move_selection(-1),
            InputEvent::KeyDown(Key::Enter) => return self.confirm(),
            InputEvent::Axis(value) => self.move_selection(value as i32),
            _ => {}
        }
        None
    }

    pub fn move_selection(&mut self, direction: i32) {
        if self.options.is_empty() || direction == 0 {
            return;
        }
        let len = self.options.len() as i32;
        self.selected = (self.selected as i32 + direction).rem_euclid(len) as usize;
    }

    /// Draws labels with `text`'s face.
    pub fn with_text(mut self, text: &TextRenderer) -> Self {
        self.label = text.scaled(self.label.scale());
        self
    }

    pub fn confirm(&self) -> Option<Transition> {
        self.options.get(self.selected).map(|(_, transition)| *transition)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(label, _)| label.as_str())
    }

    /// Screen rectangle of button `index`.
    pub fn button_rect(&self, index: usize) -> Rect {
        let label_width = self.options.get(index).map_or(0, |(label, _)| self.label.text_width(label));
        let width = if label_width > BUTTON_WIDTH {
            label_width * 6 / 5
        } else {
            BUTTON_WIDTH
        };
        let center_y = FIRST_BUTTON_Y + index as i32 * BUTTON_SPACING;
        Rect::from_center(Vec2::new(SCREEN_WIDTH / 2.0, center_y as f32), width, BUTTON_HEIGHT)
    }

    pub fn render(&self, target: &mut Surface) {
        for (i, (label, _)) in self.options.iter().enumerate() {
            let color = if i == self.selected { SELECTED_COLOR } else { IDLE_COLOR };
            let rect = self.button_rect(i);
            target.fill_rect(rect, Color::LIGHT_GREY);
            target.stroke_rect(rect, color, BUTTON_BORDER);

            let text_y = rect.y + (rect.h as i32 - self.label.text_height() as i32) / 2;
            self.label
                .render_centered(target, label, rect.x + rect.w as i32 / 2, text_y, color);
        }
    }
}

/// White backdrop with a centered title, shared by every menu screen.
pub(crate) fn render_backdrop(target: &mut Surface, text: &TextRenderer, title: &str, y: i32) {
    target.fill(Color::WHITE);
    let center_x = target.width() as i32 / 2;
    text.scaled(8).render_centered(target, title, center_x, y, Color::BLACK);
}
