// src/time_ctrl/feedback.rs
//! События тактильной обратной связи (вибрация часов).
//!
//! Ядро не знает про железо: оно только кладёт события в очередь,
//! а фронт (CLI, драйвер вибромотора) их вычитывает.

use serde::{Deserialize, Serialize};

pub const SHORT_PULSE_MS: u64 = 150;
pub const LONG_PULSE_MS: u64 = 500;
pub const MAX_AMPLITUDE: u8 = 255;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// Короткий импульс - часы запущены.
    ShortPulse { duration_ms: u64, amplitude: u8 },
    /// Длинный импульс - пауза по команде судьи.
    LongPulse { duration_ms: u64, amplitude: u8 },
}

impl FeedbackEvent {
    pub const fn short_pulse() -> Self {
        FeedbackEvent::ShortPulse {
            duration_ms: SHORT_PULSE_MS,
            amplitude: MAX_AMPLITUDE,
        }
    }

    pub const fn long_pulse() -> Self {
        FeedbackEvent::LongPulse {
            duration_ms: LONG_PULSE_MS,
            amplitude: MAX_AMPLITUDE,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match *self {
            FeedbackEvent::ShortPulse { duration_ms, .. } | FeedbackEvent::LongPulse { duration_ms, .. } => {
                duration_ms
            }
        }
    }

    pub fn amplitude(&self) -> u8 {
        match *self {
            FeedbackEvent::ShortPulse { amplitude, .. } | FeedbackEvent::LongPulse { amplitude, .. } => amplitude,
        }
    }
}
