//! Bridge configuration (RON)
//!
//! Загружается один раз при старте, дальше живёт как `Resource`.
//! Пример файла:
//!
//! ```ron
//! (
//!     query_tolerance: 0.1,
//!     default_projectile_range: 1000.0,
//!     default_projectile_damage: 0,
//!     fixed_hz: 60.0,
//!     log_level: Info,
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::logger::LogLevel;

/// Half-width of the box built around a located point (world units).
pub const DEFAULT_QUERY_TOLERANCE: f32 = 0.1;

/// How far a thrown projectile may travel before it is quietly retired.
pub const DEFAULT_PROJECTILE_RANGE: f32 = 1000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Bridge settings shared by the locator and the projectile systems.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Tolerance вокруг точки запроса (half-width AABB)
    pub query_tolerance: f32,
    /// Range по умолчанию для новых projectiles
    pub default_projectile_range: f32,
    /// Damage по умолчанию для новых projectiles
    pub default_projectile_damage: u32,
    /// Частота FixedUpdate
    pub fixed_hz: f64,
    /// Минимальный уровень для crate logger
    pub log_level: LogLevel,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            query_tolerance: DEFAULT_QUERY_TOLERANCE,
            default_projectile_range: DEFAULT_PROJECTILE_RANGE,
            default_projectile_damage: 0,
            fixed_hz: 60.0,
            log_level: LogLevel::Debug,
        }
    }
}

impl BridgeConfig {
    /// Parses and validates a RON document. Missing fields take defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a RON config file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN тоже отсекается: сравнение с NaN всегда false
        if !(self.query_tolerance > 0.0) {
            return Err(ConfigError::Invalid("query_tolerance must be positive"));
        }
        if !(self.default_projectile_range > 0.0) {
            return Err(ConfigError::Invalid("default_projectile_range must be positive"));
        }
        if !(self.fixed_hz > 0.0) {
            return Err(ConfigError::Invalid("fixed_hz must be positive"));
        }
        Ok(())
    }
}
