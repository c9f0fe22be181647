// src/infra/config.rs
//! Конфиг часов (TOML).
//!
//! Пример:
//! ```toml
//! tick_interval_ms = 100
//! default_game = 2
//! log_filter = "refwatch_clock=debug"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::GameCatalog;
use crate::domain::GameId;

use super::errors::ConfigError;

pub const MIN_TICK_INTERVAL_MS: u64 = 10;
pub const MAX_TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClockConfig {
    /// Период тика в миллисекундах.
    pub tick_interval_ms: u64,
    /// Профиль, выбранный при старте сессии (None = первый в каталоге).
    pub default_game: Option<GameId>,
    /// Директива для `EnvFilter`, если `RUST_LOG` не задан.
    pub log_filter: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            default_game: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ClockConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self, catalog: &GameCatalog) -> Result<(), ConfigError> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "tick_interval_ms = {} (ожидается {}..={})",
                self.tick_interval_ms, MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
            )));
        }
        if let Some(id) = self.default_game {
            if catalog.find(id).is_none() {
                return Err(ConfigError::Invalid(format!("default_game = {id}: нет в каталоге")));
            }
        }
        Ok(())
    }
}

/// Загрузить конфиг из TOML-файла и проверить его против каталога.
pub fn load_config(path: &Path, catalog: &GameCatalog) -> Result<ClockConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = ClockConfig::from_toml_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    config.validate(catalog)?;
    Ok(config)
}
