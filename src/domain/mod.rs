// src/domain/mod.rs
//! Доменная модель часов судьи: таймы, профили игр, каталог профилей.

pub mod catalog;
pub mod game;
pub mod period;

// Идентификатор профиля игры в каталоге.
pub type GameId = u64;

pub use catalog::*;
pub use game::*;
pub use period::*;
