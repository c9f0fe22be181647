// src/time_ctrl/errors.rs

use thiserror::Error;

use crate::infra::errors::SettingsError;

/// Ошибки ручки рантайма часов.
///
/// Сама машина состояний ошибок не знает: недопустимые команды - no-op.
/// Здесь только то, что может случиться вокруг неё.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Рантайм часов уже остановлен")]
    RuntimeStopped,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
