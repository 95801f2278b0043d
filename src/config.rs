//! Typed configuration records.
//!
//! Every record is parsed once at load time. Missing keys take the documented
//! defaults and unknown keys are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::constants::{FALLBACK_COLOR, FALLBACK_SIZE, HIGH_SCORE_PATH, SCREEN_HEIGHT, TARGET_FPS};
use crate::error::ConfigError;
use crate::spawn::SpawnTiming;
use crate::texture::Color;

/// The scenes the game ships with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString, EnumIter, IntoStaticStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SceneKey {
    Demo,
    Forest,
    Sky,
    Water,
}

impl SceneKey {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Title shown in the scene selection menu.
    pub fn title(self) -> &'static str {
        match self {
            SceneKey::Demo => "Demo",
            SceneKey::Forest => "Forest",
            SceneKey::Sky => "Sky",
            SceneKey::Water => "River",
        }
    }
}

/// Movement rule of a spawned actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, IntoStaticStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorKind {
    Drift,
    ZigZag,
    Dive,
    Hopper,
    Homing,
    Grounded,
    Float,
    Effect,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollerConfig {
    pub initial_speed: f32,
    pub max_difficulty_multiplier: f32,
    pub difficulty_increase_rate: f32,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            initial_speed: 10.0,
            max_difficulty_multiplier: 2.0,
            difficulty_increase_rate: 0.02,
        }
    }
}

/// A sprite sheet image and its JSON descriptor, relative to the assets directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpritesheetConfig {
    pub image: PathBuf,
    pub data: PathBuf,
}

impl SpritesheetConfig {
    pub fn new(image: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            data: data.into(),
        }
    }

    /// Conventional `<stem>.png` + `<stem>.json` pair under `sprites/`.
    fn sprites(stem: &str) -> Self {
        Self::new(format!("sprites/{stem}.png"), format!("sprites/{stem}.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
    pub spritesheet: Option<SpritesheetConfig>,
    pub fallback_size: (u32, u32),
    pub fallback_color: Color,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            spritesheet: None,
            fallback_size: FALLBACK_SIZE,
            fallback_color: FALLBACK_COLOR,
        }
    }
}

impl EntityConfig {
    fn sprites(stem: &str) -> Self {
        Self {
            spritesheet: Some(SpritesheetConfig::sprites(stem)),
            ..Self::default()
        }
    }

    fn sized(mut self, w: u32, h: u32) -> Self {
        self.fallback_size = (w, h);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    pub spritesheet: Option<SpritesheetConfig>,
    pub fallback_color: Color,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            spritesheet: None,
            fallback_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    pub kind: BehaviorKind,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub entity: EntityConfig,
}

fn default_weight() -> f64 {
    1.0
}

impl VariantConfig {
    fn new(kind: BehaviorKind, weight: f64, entity: EntityConfig) -> Self {
        Self { kind, weight, entity }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnerConfig {
    pub initial_delay: f32,
    pub base_interval: f32,
    pub min_interval: f32,
    pub speed_divisor: f32,
    pub variants: Vec<VariantConfig>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            initial_delay: 0.0,
            base_interval: 2.0,
            min_interval: 0.4,
            speed_divisor: 400.0,
            variants: Vec::new(),
        }
    }
}

impl SpawnerConfig {
    pub fn timing(&self) -> SpawnTiming {
        SpawnTiming {
            initial_delay: self.initial_delay,
            base_interval: self.base_interval,
            min_interval: self.min_interval,
            speed_divisor: self.speed_divisor,
        }
    }
}

/// Vertical flight tuning, in pixels and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerPhysics {
    pub gravity: f32,
    pub thrust: f32,
    pub dive: f32,
    pub tap_impulse: f32,
    pub max_fall: f32,
    /// Negative: upwards.
    pub max_rise: f32,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            thrust: 1300.0,
            dive: 1800.0,
            tap_impulse: 120.0,
            max_fall: 600.0,
            max_rise: -500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub entity: EntityConfig,
    pub physics: PlayerPhysics,
    pub start: (f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            entity: EntityConfig::default(),
            physics: PlayerPhysics::default(),
            start: (150.0, SCREEN_HEIGHT / 2.0),
        }
    }
}

impl PlayerConfig {
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.start.0, self.start.1)
    }
}

/// A fixed scenery actor that only plays its animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorConfig {
    #[serde(default)]
    pub entity: EntityConfig,
    pub position: (f32, f32),
    /// Animation to play instead of the sheet's first one.
    #[serde(default)]
    pub animation: Option<String>,
}

/// Everything a runner scene needs to build itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub scene_name: String,
    pub scroller_cfg: ScrollerConfig,
    pub background_cfg: BackgroundConfig,
    pub player_cfg: PlayerConfig,
    pub obstacles_cfg: Option<SpawnerConfig>,
    pub enemies_cfg: Option<SpawnerConfig>,
    /// Harmless pickups; touching one adds `collectible_value` to the score.
    pub collectibles_cfg: Option<SpawnerConfig>,
    pub collectible_value: u32,
    /// Sheet holding the `sparkle` and `explosion` one-shot effects.
    pub effects_cfg: Option<EntityConfig>,
    pub decor_cfg: Vec<DecorConfig>,
    pub player_invincible: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            scroller_cfg: ScrollerConfig::default(),
            background_cfg: BackgroundConfig::default(),
            player_cfg: PlayerConfig::default(),
            obstacles_cfg: None,
            enemies_cfg: None,
            collectibles_cfg: None,
            collectible_value: 10,
            effects_cfg: None,
            decor_cfg: Vec::new(),
            player_invincible: false,
        }
    }
}

impl SceneConfig {
    /// Reads a scene config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config for `key`: `config/<key>.json` under `assets_dir` if it parses, the built-in preset otherwise.
    pub fn load(key: SceneKey, assets_dir: &Path) -> Self {
        let path = assets_dir.join("config").join(format!("{}.json", key.as_str()));
        if !path.exists() {
            return Self::preset(key);
        }
        match Self::from_path(&path) {
            Ok(mut config) => {
                debug!(path = %path.display(), "Loaded scene config");
                if config.scene_name.is_empty() {
                    config.scene_name = key.as_str().to_owned();
                }
                config
            }
            Err(e) => {
                warn!(error = %e, "Scene config rejected, using built-in preset");
                Self::preset(key)
            }
        }
    }

    /// Built-in tuning for each scene.
    pub fn preset(key: SceneKey) -> Self {
        use BehaviorKind::*;

        let dir = key.as_str();
        let sheet = |name: &str| EntityConfig::sprites(&format!("{dir}/{name}"));
        let mut config = Self {
            scene_name: dir.to_owned(),
            background_cfg: BackgroundConfig {
                spritesheet: Some(SpritesheetConfig::new(
                    format!("backgrounds/{dir}.png"),
                    format!("backgrounds/{dir}.json"),
                )),
                fallback_color: Color::BLACK,
            },
            player_cfg: PlayerConfig {
                entity: sheet("player").sized(48, 48),
                ..PlayerConfig::default()
            },
            ..Self::default()
        };

        match key {
            SceneKey::Demo => {
                config.scroller_cfg.initial_speed = 200.0;
                config.background_cfg.fallback_color = Color::rgb(40, 40, 60);
                config.obstacles_cfg = Some(SpawnerConfig {
                    variants: vec![
                        VariantConfig::new(ZigZag, 10.0, sheet("bee").sized(40, 32)),
                        VariantConfig::new(Grounded, 15.0, sheet("trunk").sized(60, 180)),
                    ],
                    ..SpawnerConfig::default()
                });
                config.enemies_cfg = Some(SpawnerConfig {
                    initial_delay: 5.0,
                    base_interval: 8.0,
                    min_interval: 2.0,
                    speed_divisor: 100.0,
                    variants: vec![VariantConfig::new(Homing, 1.0, sheet("drone").sized(40, 30))],
                });
            }
            SceneKey::Forest => {
                config.scroller_cfg.initial_speed = 250.0;
                config.background_cfg.fallback_color = Color::rgb(20, 60, 30);
                config.enemies_cfg = Some(SpawnerConfig {
                    initial_delay: 5.0,
                    base_interval: 5.0,
                    min_interval: 2.0,
                    speed_divisor: 60.0,
                    variants: vec![
                        VariantConfig::new(Dive, 60.0, sheet("snake").sized(50, 30)),
                        VariantConfig::new(Hopper, 60.0, sheet("boar").sized(70, 50)),
                        VariantConfig::new(Homing, 60.0, sheet("mosquito").sized(30, 24)),
                    ],
                });
                config.decor_cfg = vec![DecorConfig {
                    entity: sheet("fire").sized(90, SCREEN_HEIGHT as u32),
                    position: (45.0, SCREEN_HEIGHT / 2.0),
                    animation: Some("burn".to_owned()),
                }];
            }
            SceneKey::Sky => {
                config.scroller_cfg.initial_speed = 220.0;
                config.background_cfg.fallback_color = Color::rgb(110, 170, 230);
                config.obstacles_cfg = Some(SpawnerConfig {
                    variants: vec![VariantConfig::new(ZigZag, 1.0, sheet("bee").sized(40, 32))],
                    ..SpawnerConfig::default()
                });
                config.enemies_cfg = Some(SpawnerConfig {
                    initial_delay: 2.0,
                    base_interval: 2.0,
                    min_interval: 2.0,
                    speed_divisor: 0.0,
                    variants: vec![
                        VariantConfig::new(Drift, 1.0, sheet("straight").sized(40, 30)),
                        VariantConfig::new(Homing, 1.0, sheet("homing").sized(40, 30)),
                    ],
                });
                config.collectibles_cfg = Some(SpawnerConfig {
                    initial_delay: 0.0,
                    base_interval: 3.0,
                    min_interval: 3.0,
                    speed_divisor: 0.0,
                    variants: vec![VariantConfig::new(
                        Float,
                        1.0,
                        EntityConfig {
                            fallback_color: Color::rgb(255, 215, 0),
                            ..sheet("coin").sized(32, 32)
                        },
                    )],
                });
                config.effects_cfg = Some(EntityConfig {
                    fallback_color: Color::rgb(255, 140, 0),
                    ..sheet("effects").sized(24, 24)
                });
            }
            SceneKey::Water => {
                config.scroller_cfg.initial_speed = 180.0;
                config.background_cfg.fallback_color = Color::rgb(20, 60, 120);
                config.enemies_cfg = Some(SpawnerConfig {
                    initial_delay: 5.0,
                    base_interval: 8.0,
                    min_interval: 2.0,
                    speed_divisor: 100.0,
                    variants: vec![
                        VariantConfig::new(Dive, 60.0, sheet("hook").sized(20, 60)),
                        VariantConfig::new(Homing, 40.0, sheet("missile").sized(40, 16)),
                    ],
                });
            }
        }

        config
    }
}

/// Process-wide settings, assembled from defaults and command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub assets_dir: PathBuf,
    pub high_score_path: PathBuf,
    pub seed: Option<u64>,
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            high_score_path: PathBuf::from(HIGH_SCORE_PATH),
            seed: None,
            target_fps: TARGET_FPS,
        }
    }
}
