// src/api/commands.rs

use serde::{Deserialize, Serialize};

use crate::domain::GameId;
use crate::time_ctrl::ClockHandle;

use super::errors::ApiError;
use super::queries::Query;

/// Команды, меняющие состояние часов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Запустить часы.
    Start,
    /// Пауза.
    Pause,
    /// Одна кнопка play/pause: старт, если стоят, иначе пауза.
    Toggle,
    /// Сброс текущего тайма.
    Reset,
    /// Первый <-> второй тайм (только в стартовой позиции).
    SwitchPeriod,
    /// Выбрать профиль игры из каталога.
    SelectGame { game_id: GameId },
}

/// Разобранная строка ввода CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Query(Query),
    Quit,
}

/// Разобрать строку CLI.
///
/// Грамматика: `start|s`, `pause|p`, `toggle|t`, `reset|r`, `switch`,
/// `select <id>`, `games`, `status`, `quit|exit|q`. Регистр не важен.
pub fn parse_input(line: &str) -> Result<Input, ApiError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(ApiError::EmptyInput);
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "start" | "s" => Input::Command(Command::Start),
        "pause" | "p" => Input::Command(Command::Pause),
        "toggle" | "t" => Input::Command(Command::Toggle),
        "reset" | "r" => Input::Command(Command::Reset),
        "switch" => Input::Command(Command::SwitchPeriod),
        "select" => {
            let raw = parts.next().ok_or(ApiError::MissingArgument {
                command: "select",
                argument: "game id",
            })?;
            let game_id = raw.parse::<GameId>().map_err(|_| ApiError::InvalidArgument {
                command: "select",
                value: raw.to_string(),
            })?;
            Input::Command(Command::SelectGame { game_id })
        }
        "games" => Input::Query(Query::ListGames),
        "status" => Input::Query(Query::Status),
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(ApiError::UnknownCommand(other.to_string())),
    };

    Ok(input)
}

/// Выполнить команду через ручку рантайма.
pub fn execute(handle: &ClockHandle, command: &Command) -> Result<(), ApiError> {
    match command {
        Command::Start => handle.start()?,
        Command::Pause => handle.pause()?,
        Command::Toggle => handle.toggle()?,
        Command::Reset => handle.reset()?,
        Command::SwitchPeriod => handle.switch_period()?,
        Command::SelectGame { game_id } => {
            handle.select_game_by_id(*game_id)?;
        }
    }
    Ok(())
}
