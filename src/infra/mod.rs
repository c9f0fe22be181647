// src/infra/mod.rs
//! Инфраструктурный слой вокруг часов:
//! - хранилище выбранного профиля игры;
//! - конфиг (TOML);
//! - инициализация логов;
//! - ошибки этого слоя.

pub mod config;
pub mod errors;
pub mod game_store;
pub mod logging;

pub use config::{load_config, ClockConfig};
pub use errors::{ConfigError, SettingsError};
pub use game_store::{GameSettingsStore, InMemoryGameStore};
pub use logging::init_logging;
