use std::any::Any;
use std::rc::Rc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::background::Background;
use crate::collision::CollisionResolver;
use crate::config::{SceneConfig, SceneKey, SpawnerConfig};
use crate::constants::SCREEN_WIDTH;
use crate::entity::{AnimatedEntity, EntityId, EntityStore, Groups};
use crate::error::GameResult;
use crate::events::{InputEvent, Key};
use crate::resources::ResourceContext;
use crate::scene::{Actor, Behavior, BehaviorContext, Player, Scene, SceneSignal};
use crate::score::ScoreManager;
use crate::scroller::DifficultyScroller;
use crate::spawn::{Spawner, WeightedSpawnRegistry};
use crate::texture::{Color, Surface, TextRenderer};

type ActorSpawner = Spawner<BehaviorContext, Actor>;

const PICKUP_EFFECT: &str = "sparkle";
const HIT_EFFECT: &str = "explosion";

/// A side-scrolling level: a flying player, a scrolling background and
/// randomly spawned actors to avoid.
pub struct RunnerScene {
    key: SceneKey,
    config: SceneConfig,
    scroller: DifficultyScroller,
    background: Background,
    score: ScoreManager,
    player: Player,
    actors: EntityStore<Actor>,
    obstacle_spawner: Option<ActorSpawner>,
    enemy_spawner: Option<ActorSpawner>,
    collectible_spawner: Option<ActorSpawner>,
    /// Cloned and placed for every effect; `None` when the scene has no effects.
    effect: Option<AnimatedEntity>,
    rng: StdRng,
    signal: Option<SceneSignal>,
    text: TextRenderer,
}

impl RunnerScene {
    /// Fails when a configured spawner has nothing it could spawn.
    pub fn new(key: SceneKey, config: SceneConfig, resources: &mut ResourceContext) -> GameResult<Self> {
        let player_entity = resources.entity(&config.player_cfg.entity, config.player_cfg.start_position());
        let player = Player::new(player_entity, config.player_cfg.physics, config.player_invincible);

        let obstacle_spawner = config
            .obstacles_cfg
            .as_ref()
            .map(|cfg| build_spawner(cfg, resources))
            .transpose()?;
        let enemy_spawner = config
            .enemies_cfg
            .as_ref()
            .map(|cfg| build_spawner(cfg, resources))
            .transpose()?;
        let collectible_spawner = config
            .collectibles_cfg
            .as_ref()
            .map(|cfg| build_spawner(cfg, resources))
            .transpose()?;
        let effect = config.effects_cfg.as_ref().map(|cfg| resources.entity(cfg, Vec2::ZERO));

        let mut actors = EntityStore::new();
        for decor in &config.decor_cfg {
            let position = Vec2::new(decor.position.0, decor.position.1);
            let mut entity = resources.entity(&decor.entity, position);
            if let Some(name) = &decor.animation {
                entity.set_animation(name);
            }
            actors.spawn(Actor::new(entity, Behavior::Static), Groups::DECOR);
        }

        let scene = Self {
            key,
            scroller: DifficultyScroller::new(&config.scroller_cfg),
            background: resources.background(&config.background_cfg),
            score: ScoreManager::new(config.scene_name.clone()),
            player,
            actors,
            obstacle_spawner,
            enemy_spawner,
            collectible_spawner,
            effect,
            rng: StdRng::from_rng(resources.rng()),
            signal: None,
            text: resources.text().scaled(4),
            config,
        };
        info!(scene = %key, "Scene constructed");
        Ok(scene)
    }

    fn context(&self) -> BehaviorContext {
        BehaviorContext {
            player: self.player.position(),
            scroll_speed: self.scroller.current_speed(),
        }
    }

    fn check_collisions(&mut self) {
        if !self.player.is_alive() {
            return;
        }

        for pickup in CollisionResolver::take(&self.player, &mut self.actors, Groups::COLLECTIBLES) {
            self.score.add_bonus(self.config.collectible_value);
            debug!(scene = %self.key, score = self.score.get_score(), "Collected pickup");
            self.spawn_effect(PICKUP_EFFECT, pickup.entity.rect().center());
        }

        if self.player.is_invincible() {
            return;
        }
        let mut hit = CollisionResolver::check(&self.player, &mut self.actors, Groups::OBSTACLES);
        if !hit {
            let enemies = CollisionResolver::take(&self.player, &mut self.actors, Groups::ENEMIES);
            for enemy in &enemies {
                self.spawn_effect(HIT_EFFECT, enemy.entity.rect().center());
            }
            hit = !enemies.is_empty();
        }
        if hit {
            info!(scene = %self.key, score = self.score.get_score(), "Player died");
            self.player.die();
            self.scroller.stop();
            self.signal = Some(SceneSignal::Died);
        }
    }

    /// Plays `animation` of the scene's effect sheet once, centered on `at`.
    fn spawn_effect(&mut self, animation: &str, at: Vec2) {
        let Some(template) = &self.effect else {
            return;
        };
        let mut entity = template.clone();
        entity.set_animation(animation);
        entity.apply_override_position(at);
        self.actors.spawn(Actor::new(entity, Behavior::effect()), Groups::EFFECTS);
    }

    fn spawn(&mut self, dt: f32) {
        let ctx = self.context();
        let speed = self.scroller.current_speed();
        let spawners = [
            (self.obstacle_spawner.as_mut(), Groups::OBSTACLES),
            (self.enemy_spawner.as_mut(), Groups::ENEMIES),
            (self.collectible_spawner.as_mut(), Groups::COLLECTIBLES),
        ];
        for (spawner, groups) in spawners {
            let Some(spawner) = spawner else {
                continue;
            };
            match spawner.update(dt, speed, &ctx, &mut self.rng) {
                Ok(Some(actor)) => {
                    self.actors.spawn(actor, groups);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Spawner failed"),
            }
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn actors(&self) -> &EntityStore<Actor> {
        &self.actors
    }

    /// Places an actor directly, bypassing the spawners.
    pub fn insert_actor(&mut self, actor: Actor, groups: Groups) -> EntityId {
        self.actors.spawn(actor, groups)
    }

    pub fn scroller(&self) -> &DifficultyScroller {
        &self.scroller
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}

fn build_spawner(config: &SpawnerConfig, resources: &mut ResourceContext) -> GameResult<ActorSpawner> {
    let mut registry = WeightedSpawnRegistry::new();
    for variant in &config.variants {
        let kind = variant.kind;
        let set = variant
            .entity
            .spritesheet
            .as_ref()
            .and_then(|sheet| resources.animation_set(sheet));
        let (size, color) = (variant.entity.fallback_size, variant.entity.fallback_color);

        registry.register(kind.to_string(), variant.weight, move |ctx: &BehaviorContext, rng: &mut dyn RngCore| {
            let (behavior, position, anchor) = Behavior::spawn(kind, ctx, rng);
            let mut entity = match &set {
                Some(set) => AnimatedEntity::new(Rc::clone(set), position, size, color),
                None => AnimatedEntity::placeholder(position, size, color),
            }
            .anchored(anchor);
            if let Behavior::Hopper { .. } = behavior {
                entity.set_animation("run");
            }
            Actor::new(entity, behavior)
        })?;
    }
    Ok(Spawner::new(registry, config.timing())?)
}

impl Scene for RunnerScene {
    fn key(&self) -> SceneKey {
        self.key
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(Key::Up) => self.player.start_thrust(),
            InputEvent::KeyDown(Key::Down) => self.player.start_dive(),
            InputEvent::KeyDown(Key::Escape) => {
                // The matching key-ups go to the pause menu, so release everything now.
                self.player.stop_thrust();
                self.player.stop_dive();
                self.signal = Some(SceneSignal::Pause);
            }
            InputEvent::KeyUp(Key::Up) => self.player.stop_thrust(),
            InputEvent::KeyUp(Key::Down) => self.player.stop_dive(),
            InputEvent::Axis(value) => {
                if value <= -1.0 {
                    self.player.start_thrust();
                } else if value >= 1.0 {
                    self.player.start_dive();
                } else {
                    self.player.stop_thrust();
                    self.player.stop_dive();
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.scroller.update(dt);
        self.background.update(self.scroller.offset());

        self.player.update(dt);
        let ctx = self.context();
        self.actors.retain(|_, actor| actor.advance(dt, &ctx));

        self.check_collisions();

        self.score.update(dt, self.scroller.current_speed());
        self.spawn(dt);
    }

    fn render(&self, target: &mut Surface) {
        self.background.render(target);
        for (_, actor) in self.actors.iter() {
            actor.entity.draw(target);
        }
        self.player.draw(target);

        let label = format!("SCORE: {}", self.score.get_score());
        let x = SCREEN_WIDTH as i32 - self.text.text_width(&label) as i32 - 20;
        self.text.render(target, &label, x, 20, Color::WHITE);
    }

    fn config(&self) -> &SceneConfig {
        &self.config
    }

    fn score(&self) -> &ScoreManager {
        &self.score
    }

    fn score_mut(&mut self) -> &mut ScoreManager {
        &mut self.score
    }

    fn take_signal(&mut self) -> Option<SceneSignal> {
        self.signal.take()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
