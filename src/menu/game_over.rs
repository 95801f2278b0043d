use crate::config::SceneKey;
use crate::events::InputEvent;
use crate::menu::{render_backdrop, Menu, MenuScreen};
use crate::scene::Scene;
use crate::score::HighScoreTable;
use crate::session::Transition;
use crate::texture::{Color, Surface, TextRenderer};

/// Shown after the player dies. Bound to the scene that just ended.
#[derive(Debug, Clone)]
pub struct GameOverMenu {
    menu: Menu,
    key: SceneKey,
    score: u32,
    new_record: bool,
    text: TextRenderer,
}

impl GameOverMenu {
    /// Reads the finished scene's score and records it in `high_scores` if it qualifies.
    pub fn new(scene: &dyn Scene, high_scores: &mut HighScoreTable) -> Self {
        let key = scene.key();
        let score = scene.score().get_score();
        let new_record = scene.score().check_high_score(high_scores);

        Self {
            menu: Menu::new(vec![
                ("TRY AGAIN".to_owned(), Transition::Play(key)),
                ("MAIN MENU".to_owned(), Transition::MainMenu),
            ]),
            key,
            score,
            new_record,
            text: TextRenderer::new(1),
        }
    }

    pub fn with_text(mut self, text: TextRenderer) -> Self {
        self.menu = self.menu.with_text(&text);
        self.text = text;
        self
    }

    pub fn key(&self) -> SceneKey {
        self.key
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

impl MenuScreen for GameOverMenu {
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        self.menu.handle_event(event)
    }

    fn render(&self, target: &mut Surface) {
        render_backdrop(target, &self.text, "GAME OVER", 40);

        let text = self.text.scaled(4);
        let center_x = target.width() as i32 / 2;
        let line = if self.new_record {
            format!("NEW RECORD: {}", self.score)
        } else {
            format!("SCORE: {}", self.score)
        };
        text.render_centered(target, &line, center_x, 130, Color::BLACK);

        self.menu.render(target);
    }
}
