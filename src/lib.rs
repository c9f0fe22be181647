// src/lib.rs
//! Часы судьи для игры из двух таймов.
//!
//! Часы считают вверх до длины тайма, затем сами переходят в добавленное
//! время (без верхней границы). Пауза сохраняет накопленное время обеих фаз,
//! тайм можно сменить в стартовой позиции, сброс возвращает всё к нулю.
//!
//! Слои:
//! - `domain` - таймы, профили игр, каталог;
//! - `time_ctrl` - машина состояний `MatchClock` и tokio-рантайм с тиком;
//! - `infra` - хранилище выбранного профиля, конфиг, логи;
//! - `api` - команды, запросы, DTO для фронта / CLI.

pub mod api;
pub mod domain;
pub mod infra;
pub mod time_ctrl;

pub use domain::{GameCatalog, GameId, GameSpec, HalfSpec, Period};
pub use time_ctrl::{spawn_clock, ClockHandle, ClockSnapshot, FeedbackEvent, MatchClock};
