// src/time_ctrl/mod.rs
//! Контроль времени матча.
//!
//! Здесь собираем:
//! - правила рантайма (`ClockRules`);
//! - учёт времени одной фазы (`PhaseTimer`);
//! - машину состояний часов (`MatchClock`) и её снимки;
//! - события вибрации (`FeedbackEvent`);
//! - tokio-рантайм, который крутит тик (`spawn_clock`, `ClockHandle`).

pub mod clock;
pub mod errors;
pub mod feedback;
pub mod phase;
pub mod runtime;
pub mod time_rules;

pub use clock::{ClockPhase, ClockSnapshot, GameChange, MatchClock, TickOutcome};
pub use errors::ClockError;
pub use feedback::FeedbackEvent;
pub use phase::PhaseTimer;
pub use runtime::{spawn_clock, ClockCommand, ClockHandle, SpawnedClock};
pub use time_rules::ClockRules;
