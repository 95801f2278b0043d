use crate::events::InputEvent;
use crate::menu::{render_backdrop, MenuScreen};
use crate::score::HighScoreTable;
use crate::session::Transition;
use crate::texture::{Color, Rect, Surface, TextRenderer};

const COLUMN_TOP: i32 = 200;
const COLUMN_HEIGHT: u32 = 200;
const BOX_COLOR: Color = Color::rgb(128, 128, 128);
const HINT_COLOR: Color = Color::rgb(64, 64, 64);

/// Snapshot of the high-score table, one column per scene. Any key goes back.
#[derive(Debug, Clone)]
pub struct HighScoresMenu {
    scores: Vec<(String, Vec<u32>)>,
    text: TextRenderer,
}

impl HighScoresMenu {
    pub fn new(high_scores: &HighScoreTable) -> Self {
        let scores = high_scores
            .iter()
            .filter(|(_, scores)| !scores.is_empty())
            .map(|(scene, scores)| (scene.to_owned(), scores.to_vec()))
            .collect();
        Self {
            scores,
            text: TextRenderer::new(1),
        }
    }

    pub fn with_text(mut self, text: TextRenderer) -> Self {
        self.text = text;
        self
    }

    pub fn scores(&self) -> &[(String, Vec<u32>)] {
        &self.scores
    }
}

impl MenuScreen for HighScoresMenu {
    fn handle_event(&mut self, event: &InputEvent) -> Option<Transition> {
        event.is_any_press().then_some(Transition::MainMenu)
    }

    fn render(&self, target: &mut Surface) {
        render_backdrop(target, &self.text, "TOP 5 SCORES", 60);

        let (width, height) = (target.width() as i32, target.height() as i32);
        let body = self.text.scaled(3);

        if self.scores.is_empty() {
            body.render_centered(target, "NO SCORES YET", width / 2, height / 2, Color::BLACK);
        } else {
            let column_width = width / self.scores.len() as i32;
            for (i, (scene, scores)) in self.scores.iter().enumerate() {
                let x = i as i32 * column_width + 10;
                let frame = Rect::new(x, COLUMN_TOP, (column_width - 20).max(0) as u32, COLUMN_HEIGHT);
                target.stroke_rect(frame, BOX_COLOR, 2);
                body.render(target, &scene.to_uppercase(), x + 10, COLUMN_TOP + 10, Color::BLACK);
                for (rank, score) in scores.iter().enumerate() {
                    let line = format!("{}. {} M", rank + 1, score);
                    body.render(target, &line, x + 10, COLUMN_TOP + 40 + rank as i32 * 30, Color::BLACK);
                }
            }
        }

        self.text.scaled(2).render_centered(target, "PRESS ANY KEY", width / 2, height - 40, HINT_COLOR);
    }
}
