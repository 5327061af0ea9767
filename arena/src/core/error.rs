// tps_arena_core/arena/src/core/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type SimResult<T> = Result<T, SimError>;
