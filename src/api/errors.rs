// src/api/errors.rs

use thiserror::Error;

use crate::time_ctrl::ClockError;

/// Ошибки внешнего API (то, что видит CLI / клиент).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Пустая строка ввода.
    #[error("Пустая команда")]
    EmptyInput,

    /// Такой команды нет.
    #[error("Неизвестная команда: {0}")]
    UnknownCommand(String),

    /// Команде не хватает аргумента.
    #[error("Команде {command} нужен аргумент: {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Аргумент не разобрался.
    #[error("Недопустимый аргумент для {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },

    /// Ошибка рантайма часов / хранилища профилей.
    #[error(transparent)]
    Clock(#[from] ClockError),
}
