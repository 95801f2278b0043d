use crate::events::{InputEvent, Key};
use crate::menu::{render_backdrop, Menu, MenuScreen};
use crate::session::Transition;
use crate::texture::{Surface, TextRenderer};

#[derive(Debug, Clone)]
pub struct PauseMenu {
    menu: Menu,
    text: TextRenderer,
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseMenu {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(vec![
                ("RESUME".to_owned(), Transition::Resume),
                ("MAIN MENU".to_owned(), Transition::MainMenu),
            ]),
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

impl MenuScreen for PauseMenu {
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        // Escape toggles pause back off.
        if event.is_press(Key::Escape) {
            return Some(Transition::Resume);
        }
        self.menu.handle_event(event)
    }

    fn render(&self, target: &mut Surface) {
        render_backdrop(target, &self.text, "PAUSED", 80);
        self.menu.render(target);
    }
}
