// src/infra/errors.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::GameId;

/// Ошибки хранилища выбранного профиля.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Профиль игры {0} не найден в каталоге")]
    UnknownGame(GameId),

    #[error("Некорректный профиль игры {id}: {reason}")]
    InvalidGame { id: GameId, reason: String },
}

/// Ошибки загрузки конфига.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Битый TOML в конфиге {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Недопустимое значение в конфиге: {0}")]
    Invalid(String),
}
