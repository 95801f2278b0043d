use pantaneiro::error::SpawnError;
use pantaneiro::spawn::{SpawnTiming, Spawner, WeightedSpawnRegistry};
use rand::rngs::StdRng;
use rand::SeedableRng;
use speculoos::prelude::*;

fn registry(weights: &[f64]) -> WeightedSpawnRegistry<u32, usize> {
    let mut registry = WeightedSpawnRegistry::new();
    for (i, &weight) in weights.iter().enumerate() {
        registry
            .register(format!("variant-{i}"), weight, move |_: &u32, _: &mut dyn rand::RngCore| i)
            .unwrap();
    }
    registry
}

const TIMING: SpawnTiming = SpawnTiming {
    initial_delay: 0.0,
    base_interval: 2.0,
    min_interval: 0.5,
    speed_divisor: 100.0,
};

#[test]
fn test_single_variant_always_chosen() {
    let registry = registry(&[3.0]);
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..50 {
        assert_that(&registry.create_random(&0, &mut rng).unwrap()).is_equal_to(0);
    }
}

#[test]
fn test_zero_weight_variant_never_chosen() {
    let registry = registry(&[0.0, 1.0, 0.0]);
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..200 {
        assert_that(&registry.choose_index(&mut rng).unwrap()).is_equal_to(1);
    }
}

#[test]
fn test_every_positive_variant_shows_up() {
    let registry = registry(&[1.0, 1.0, 1.0]);
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = [false; 3];

    for _ in 0..300 {
        seen[registry.choose_index(&mut rng).unwrap()] = true;
    }

    assert_that(&seen.iter().all(|s| *s)).is_true();
}

#[test]
fn test_constructor_receives_arguments() {
    let mut registry = WeightedSpawnRegistry::new();
    registry
        .register("double", 1.0, |arg: &u32, _: &mut dyn rand::RngCore| arg * 2)
        .unwrap();

    let mut rng = StdRng::seed_from_u64(4);
    assert_that(&registry.create_random(&21, &mut rng).unwrap()).is_equal_to(42);
}

#[test]
fn test_empty_registry_fails() {
    let registry = registry(&[]);
    let mut rng = StdRng::seed_from_u64(5);

    assert!(matches!(registry.create_random(&0, &mut rng), Err(SpawnError::EmptyRegistry)));
    assert!(matches!(Spawner::new(registry, TIMING), Err(SpawnError::EmptyRegistry)));
}

#[test]
fn test_invalid_weights_rejected() {
    let mut registry = registry(&[]);
    for weight in [-1.0, f64::NAN, f64::INFINITY] {
        let result = registry.register("bad", weight, |_: &u32, _: &mut dyn rand::RngCore| 0);
        assert!(matches!(result, Err(SpawnError::InvalidWeight(_))));
    }
    assert_that(&registry.len()).is_equal_to(0);
}

#[test]
fn test_spawner_without_positive_weight_fails() {
    assert!(matches!(
        Spawner::new(registry(&[0.0, 0.0]), TIMING),
        Err(SpawnError::NoPositiveWeight)
    ));
}

#[test]
fn test_interval_shrinks_with_speed() {
    let spawner = Spawner::new(registry(&[1.0]), TIMING).unwrap();

    assert_that(&spawner.interval(0.0)).is_equal_to(2.0);
    assert_that(&spawner.interval(100.0)).is_equal_to(1.0);
    assert_that(&spawner.interval(1000.0)).is_equal_to(0.5);
}

#[test]
fn test_interval_ignores_speed_without_divisor() {
    let timing = SpawnTiming {
        speed_divisor: 0.0,
        ..TIMING
    };
    let spawner = Spawner::new(registry(&[1.0]), timing).unwrap();

    assert_that(&spawner.interval(10_000.0)).is_equal_to(2.0);
}

#[test]
fn test_spawner_fires_once_per_interval() {
    let mut spawner = Spawner::new(registry(&[1.0]), TIMING).unwrap();
    let mut rng = StdRng::seed_from_u64(6);

    assert_that(&spawner.update(1.5, 0.0, &0, &mut rng).unwrap()).is_none();
    assert_that(&spawner.update(0.5, 0.0, &0, &mut rng).unwrap()).is_some();
    assert_that(&spawner.timer()).is_equal_to(0.0);
    assert_that(&spawner.update(1.0, 0.0, &0, &mut rng).unwrap()).is_none();
}

#[test]
fn test_initial_delay_primes_timer() {
    let timing = SpawnTiming {
        initial_delay: 1.75,
        ..TIMING
    };
    let mut spawner = Spawner::new(registry(&[1.0]), timing).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    assert_that(&spawner.update(0.25, 0.0, &0, &mut rng).unwrap()).is_some();
}
