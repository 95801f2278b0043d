//! Centralized error types for the game.
//!
//! Most of these never reach the player: asset and persistence failures are
//! logged and degraded where they happen. They still get proper types so the
//! place that decides to degrade can see exactly what went wrong.

use std::io;
use std::path::PathBuf;

/// Main error type for the game.
///
/// This is the primary error type used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Spawn error: {0}")]
    Spawn(#[from] SpawnError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while loading sprite sheets and their descriptors.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Malformed descriptor {path}: {source}")]
    Descriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid frame rectangle [{x}, {y}, {w}, {h}] in animation '{animation}'")]
    InvalidFrame {
        animation: String,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
}

/// Errors raised while reading scene configuration files.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the weighted spawner.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error("Spawn registry has no registered variants")]
    EmptyRegistry,

    #[error("Spawn weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    #[error("Spawn registry has no variant with a positive weight")]
    NoPositiveWeight,
}

/// Errors raised while reading or writing the high-score file.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed score file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode scores: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
