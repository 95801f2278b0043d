//! Weighted random actor creation and the timers that drive it.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::SpawnError;

/// Builds one variant from the caller's spawn arguments and the shared generator.
pub type Constructor<A, T> = Box<dyn Fn(&A, &mut dyn RngCore) -> T>;

struct Entry<A, T> {
    name: String,
    weight: f64,
    construct: Constructor<A, T>,
}

/// An ordered pool of (variant, weight) pairs that produces random instances on demand.
///
/// `A` is whatever the constructors need to know about the world at spawn
/// time (typically the player's position); `T` is the produced actor.
pub struct WeightedSpawnRegistry<A, T> {
    entries: SmallVec<[Entry<A, T>; 4]>,
}

impl<A, T> Default for WeightedSpawnRegistry<A, T> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<A, T> std::fmt::Debug for WeightedSpawnRegistry<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.name, e.weight)))
            .finish()
    }
}

impl<A, T> WeightedSpawnRegistry<A, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a variant to the pool.
    ///
    /// Weights must be finite and non-negative. A zero weight is accepted but
    /// the variant is never drawn.
    pub fn register<F>(&mut self, name: impl Into<String>, weight: f64, construct: F) -> Result<(), SpawnError>
    where
        F: Fn(&A, &mut dyn RngCore) -> T + 'static,
    {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SpawnError::InvalidWeight(weight));
        }
        self.entries.push(Entry {
            name: name.into(),
            weight,
            construct: Box::new(construct),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered variant names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Picks the index of the variant to build.
    ///
    /// Draws N weighted samples with replacement (N being the number of
    /// variants), then picks one of those uniformly. This is not the same
    /// distribution as a single weighted draw.
    pub fn choose_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, SpawnError> {
        if self.entries.is_empty() {
            return Err(SpawnError::EmptyRegistry);
        }

        let weighted =
            WeightedIndex::<f64>::new(self.entries.iter().map(|e| e.weight)).map_err(|_| SpawnError::NoPositiveWeight)?;
        let pool: SmallVec<[usize; 4]> = (0..self.entries.len()).map(|_| weighted.sample(rng)).collect();

        pool.choose(rng).copied().ok_or(SpawnError::EmptyRegistry)
    }

    /// Builds a random variant with the supplied arguments.
    pub fn create_random<R: Rng>(&self, args: &A, rng: &mut R) -> Result<T, SpawnError> {
        let index = self.choose_index(rng)?;
        let entry = &self.entries[index];
        trace!(variant = %entry.name, "Creating random variant");
        Ok((entry.construct)(args, rng))
    }
}

/// Timing parameters of a [`Spawner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTiming {
    /// Timer value at scene start; a value close to the interval spawns early.
    pub initial_delay: f32,
    pub base_interval: f32,
    pub min_interval: f32,
    /// Scroll speed is divided by this and subtracted from `base_interval`.
    pub speed_divisor: f32,
}

/// Couples a registry with a timer whose period shrinks as the scroll speed grows.
#[derive(Debug)]
pub struct Spawner<A, T> {
    registry: WeightedSpawnRegistry<A, T>,
    timing: SpawnTiming,
    timer: f32,
}

impl<A, T> Spawner<A, T> {
    /// Fails when the registry can never produce anything.
    pub fn new(registry: WeightedSpawnRegistry<A, T>, timing: SpawnTiming) -> Result<Self, SpawnError> {
        if registry.is_empty() {
            return Err(SpawnError::EmptyRegistry);
        }
        if registry.entries.iter().all(|e| e.weight == 0.0) {
            return Err(SpawnError::NoPositiveWeight);
        }
        Ok(Self {
            registry,
            timing,
            timer: timing.initial_delay,
        })
    }

    /// Current spawn period for the given scroll speed.
    pub fn interval(&self, speed: f32) -> f32 {
        let SpawnTiming {
            base_interval,
            min_interval,
            speed_divisor,
            ..
        } = self.timing;
        if speed_divisor <= 0.0 {
            return base_interval.max(min_interval);
        }
        (base_interval - speed / speed_divisor).max(min_interval)
    }

    /// Advances the timer and returns a new instance when it elapses.
    pub fn update<R: Rng>(&mut self, dt: f32, speed: f32, args: &A, rng: &mut R) -> Result<Option<T>, SpawnError> {
        self.timer += dt;
        if self.timer < self.interval(speed) {
            return Ok(None);
        }
        self.timer = 0.0;
        self.registry.create_random(args, rng).map(Some)
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn timing(&self) -> SpawnTiming {
        self.timing
    }

    pub fn registry(&self) -> &WeightedSpawnRegistry<A, T> {
        &self.registry
    }
}
