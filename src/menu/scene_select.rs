use strum::IntoEnumIterator;

use crate::config::SceneKey;
use crate::events::{InputEvent, Key};
use crate::menu::{render_backdrop, Menu, MenuScreen};
use crate::session::Transition;
use crate::texture::{Surface, TextRenderer};

/// One button per scene; `Escape` goes back to the main menu.
#[derive(Debug, Clone)]
pub struct SceneSelectMenu {
    menu: Menu,
    text: TextRenderer,
}

impl Default for SceneSelectMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSelectMenu {
    pub fn new() -> Self {
        let options = SceneKey::iter()
            .map(|key| (key.title().to_uppercase(), Transition::Play(key)))
            .collect();
        Self {
            menu: Menu::new(options),
            text: TextRenderer::new(1),
        }
    }

    pub fn with_text(mut self, text: TextRenderer) -> Self {
        self.menu = self.menu.with_text(&text);
        self.text = text;
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

impl MenuScreen for SceneSelectMenu {
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        if event.is_press(Key::Escape) {
            return Some(Transition::MainMenu);
        }
        self.menu.handle_event(event)
    }

    fn render(&self, target: &mut Surface) {
        render_backdrop(target, &self.text, "SELECT SCENE", 80);
        self.menu.render(target);
    }
}
