//! Distance-based scoring and the persisted per-scene high-score table.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::constants::{MAX_HIGH_SCORES, PIXELS_PER_METER, SCORE_PER_METER};
use crate::error::PersistenceError;

/// Tracks how far the player has travelled in one run of a scene, plus pickup bonuses.
#[derive(Debug, Clone)]
pub struct ScoreManager {
    scene_name: String,
    distance: f32,
    bonus: u32,
    pixels_per_meter: f32,
    score_per_meter: f32,
}

impl ScoreManager {
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            distance: 0.0,
            bonus: 0,
            pixels_per_meter: PIXELS_PER_METER,
            score_per_meter: SCORE_PER_METER,
        }
    }

    /// Adds the distance covered at `speed` pixels per second during `dt`.
    pub fn update(&mut self, dt: f32, speed: f32) {
        self.distance += speed * dt / self.pixels_per_meter;
    }

    /// Adds points that do not come from distance.
    pub fn add_bonus(&mut self, points: u32) {
        self.bonus = self.bonus.saturating_add(points);
    }

    pub fn get_score(&self) -> u32 {
        ((self.distance * self.score_per_meter) as u32).saturating_add(self.bonus)
    }

    /// Whole metres travelled.
    pub fn get_distance(&self) -> u32 {
        self.distance as u32
    }

    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    pub fn reset(&mut self) {
        self.distance = 0.0;
        self.bonus = 0;
    }

    /// Records the current score if it is this scene's first or a new best, persisting the table.
    ///
    /// Returns whether the score was recorded.
    pub fn check_high_score(&self, table: &mut HighScoreTable) -> bool {
        let score = self.get_score();
        if !table.record(&self.scene_name, score) {
            return false;
        }
        info!(scene = %self.scene_name, score, "New high score");
        table.save();
        true
    }
}

/// Top scores per scene, kept sorted descending and capped at [`MAX_HIGH_SCORES`].
///
/// On disk this is a flat JSON object: `{ "<scene>": [score, ...] }`.
#[derive(Debug, Clone, Default)]
pub struct HighScoreTable {
    path: Option<PathBuf>,
    scores: BTreeMap<String, Vec<u32>>,
}

impl HighScoreTable {
    /// A table that is never written anywhere.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reads the table at `path`. A missing or unreadable file yields an empty table.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match Self::read(&path) {
            Ok(Some(scores)) => {
                debug!(path = %path.display(), scenes = scores.len(), "Loaded high scores");
                scores
            }
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!(error = %e, "Failed to load high scores, starting fresh");
                BTreeMap::new()
            }
        };

        let mut table = Self {
            path: Some(path),
            scores,
        };
        table.normalize();
        table
    }

    fn read(path: &Path) -> Result<Option<BTreeMap<String, Vec<u32>>>, PersistenceError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistenceError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Writes the table, logging instead of failing.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            error!(error = %e, "Failed to save high scores");
        }
    }

    /// Writes the table to a sibling temporary file, then renames it over the target.
    pub fn try_save(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.scores).map_err(PersistenceError::Encode)?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        debug!(path = %path.display(), "Saved high scores");
        Ok(())
    }

    /// Adds `score` for `scene` when the scene has no scores yet or `score` beats its best.
    ///
    /// Does not persist; see [`ScoreManager::check_high_score`].
    pub fn record(&mut self, scene: &str, score: u32) -> bool {
        let entry = self.scores.entry(scene.to_owned()).or_default();
        if entry.first().is_some_and(|&best| score <= best) {
            return false;
        }
        entry.push(score);
        entry.sort_unstable_by(|a, b| b.cmp(a));
        entry.truncate(MAX_HIGH_SCORES);
        true
    }

    pub fn scores(&self, scene: &str) -> &[u32] {
        self.scores.get(scene).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn best(&self, scene: &str) -> Option<u32> {
        self.scores(scene).first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.values().all(Vec::is_empty)
    }

    /// Scenes in name order with their scores.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.scores.iter().map(|(scene, scores)| (scene.as_str(), scores.as_slice()))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Hand-edited files may be unsorted or too long.
    fn normalize(&mut self) {
        for scores in self.scores.values_mut() {
            scores.sort_unstable_by(|a, b| b.cmp(a));
            scores.truncate(MAX_HIGH_SCORES);
        }
    }
}
