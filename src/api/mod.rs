// src/api/mod.rs
//! Внешний API часов.
//!
//! Здесь описываются:
//! - команды (commands.rs) - всё, что меняет состояние, плюс разбор ввода CLI;
//! - запросы (queries.rs) - только чтение;
//! - DTO (dto.rs) - готовые к выводу строки `MM:SS` и доступность кнопок;
//! - ошибки (errors.rs) - то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
