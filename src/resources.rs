//! Process-scoped resources handed explicitly to whatever needs them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::asset::{load_animation_set, load_background_layers};
use crate::background::{Background, ParallaxLayer};
use crate::config::{BackgroundConfig, EntityConfig, SpritesheetConfig};
use crate::entity::AnimatedEntity;
use crate::texture::{AnimationSet, FontFace, TextRenderer};

/// Loads each sheet once and hands out shared copies afterwards.
///
/// Failed loads are cached too: a broken sheet is reported once and every
/// later request falls back without touching the disk again. Also owns the
/// game's random generator so that a seed reproduces a whole run.
#[derive(Debug)]
pub struct ResourceContext {
    assets_dir: PathBuf,
    sheets: HashMap<SpritesheetConfig, Option<Rc<AnimationSet>>>,
    backgrounds: HashMap<SpritesheetConfig, Option<Vec<ParallaxLayer>>>,
    rng: StdRng,
    font: Option<Rc<dyn FontFace>>,
}

impl ResourceContext {
    pub fn new(assets_dir: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!(seed, "Seeding random generator");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self {
            assets_dir: assets_dir.into(),
            sheets: HashMap::new(),
            backgrounds: HashMap::new(),
            rng,
            font: None,
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Makes every renderer from [`Self::text`] draw with `font`.
    pub fn set_font(&mut self, font: Rc<dyn FontFace>) {
        self.font = Some(font);
    }

    /// A scale-1 text renderer with the installed font, if any.
    pub fn text(&self) -> TextRenderer {
        match &self.font {
            Some(font) => TextRenderer::new(1).with_face(Rc::clone(font)),
            None => TextRenderer::new(1),
        }
    }

    /// The animations of `sheet`, or `None` when it could not be loaded.
    pub fn animation_set(&mut self, sheet: &SpritesheetConfig) -> Option<Rc<AnimationSet>> {
        if let Some(cached) = self.sheets.get(sheet) {
            return cached.clone();
        }

        let image = self.assets_dir.join(&sheet.image);
        let data = self.assets_dir.join(&sheet.data);
        let loaded = match load_animation_set(&image, &data) {
            Ok(set) => Some(Rc::new(set)),
            Err(e) => {
                warn!(image = %image.display(), error = %e, "Failed to load sprite sheet, using placeholder");
                None
            }
        };
        self.sheets.insert(sheet.clone(), loaded.clone());
        loaded
    }

    /// Makes `set` the cached result for `sheet`.
    pub fn insert_animation_set(&mut self, sheet: SpritesheetConfig, set: AnimationSet) {
        self.sheets.insert(sheet, Some(Rc::new(set)));
    }

    /// Builds an entity from its config, degrading to the configured placeholder.
    pub fn entity(&mut self, config: &EntityConfig, position: Vec2) -> AnimatedEntity {
        match config.spritesheet.as_ref().and_then(|sheet| self.animation_set(sheet)) {
            Some(set) => AnimatedEntity::new(set, position, config.fallback_size, config.fallback_color),
            None => AnimatedEntity::placeholder(position, config.fallback_size, config.fallback_color),
        }
    }

    pub fn background(&mut self, config: &BackgroundConfig) -> Background {
        let layers = match &config.spritesheet {
            Some(sheet) => self.background_layers(sheet),
            None => Vec::new(),
        };
        Background::new(layers, config.fallback_color)
    }

    fn background_layers(&mut self, sheet: &SpritesheetConfig) -> Vec<ParallaxLayer> {
        if let Some(cached) = self.backgrounds.get(sheet) {
            return cached.clone().unwrap_or_default();
        }

        let image = self.assets_dir.join(&sheet.image);
        let data = self.assets_dir.join(&sheet.data);
        let loaded = match load_background_layers(&image, &data) {
            Ok(layers) => Some(layers),
            Err(e) => {
                warn!(image = %image.display(), error = %e, "Failed to load background, using fallback color");
                None
            }
        };
        self.backgrounds.insert(sheet.clone(), loaded.clone());
        loaded.unwrap_or_default()
    }

    /// Number of sheets requested so far, loaded or not.
    pub fn cached_sheets(&self) -> usize {
        self.sheets.len()
    }
}
