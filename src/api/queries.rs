// src/api/queries.rs

use serde::{Deserialize, Serialize};

use crate::time_ctrl::ClockHandle;

use super::dto::{build_clock_view, build_game_options, ClockViewDto, GameOptionDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Текущее состояние часов.
    Status,
    /// Список профилей игры.
    ListGames,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Clock(ClockViewDto),
    Games(Vec<GameOptionDto>),
}

pub fn answer(handle: &ClockHandle, query: &Query) -> QueryResponse {
    match query {
        Query::Status => QueryResponse::Clock(build_clock_view(&handle.snapshot())),
        Query::ListGames => {
            let selected = handle.current_game().id;
            QueryResponse::Games(build_game_options(&handle.available_games(), selected))
        }
    }
}
