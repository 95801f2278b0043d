use crate::events::InputEvent;
use crate::menu::{render_backdrop, Menu, MenuScreen};
use crate::session::Transition;
use crate::texture::{Surface, TextRenderer};

#[derive(Debug, Clone)]
pub struct MainMenu {
    menu: Menu,
    text: TextRenderer,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(vec![
                ("PLAY".to_owned(), Transition::SceneSelect),
                ("SCORES".to_owned(), Transition::HighScores),
                ("QUIT".to_owned(), Transition::Quit),
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

impl MenuScreen for MainMenu {
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        self.menu.handle_event(event)
    }

    fn render(&self, target: &mut Surface) {
        render_backdrop(target, &self.text, "PANTANEIRO", 80);
        self.menu.render(target);
    }
}
