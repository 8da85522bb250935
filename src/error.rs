use std::path::PathBuf;

use thiserror::Error;

/// Problems with the checkpoint list itself.
#[derive(Debug, Error, PartialEq)]
pub enum CourseError {
    #[error("checkpoint latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("checkpoint longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    #[error("checkpoint radius must be positive, got {0}")]
    Radius(f64),

    #[error("course has no checkpoints")]
    Empty,
}

/// Errors raised while loading a course file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid course file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid navigator setting: {0}")]
    Navigator(String),

    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Errors raised while reading or writing a land mask.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
