// src/time_ctrl/time_rules.rs
//! Параметры рантайма часов (период тика).
//!
//! Здесь только "правила", без состояния и без привязки к конкретной сессии.

use std::time::Duration;

use serde::Serialize;

use crate::infra::config::{ClockConfig, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};

/// Стандартный период тика.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(MIN_TICK_INTERVAL_MS);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(MAX_TICK_INTERVAL_MS);

/// Период тика всегда лежит в `MIN_TICK_INTERVAL..=MAX_TICK_INTERVAL`:
/// поле закрыто, конструкторы его зажимают.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ClockRules {
    tick_interval: Duration,
}

impl ClockRules {
    /// Правила с заданным периодом тика (зажимается в допустимый диапазон).
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval: tick_interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL),
        }
    }

    /// Стандартный профиль: тик раз в 100 мс.
    pub const fn standard() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Правила из конфига.
    pub fn from_config(config: &ClockConfig) -> Self {
        Self::new(Duration::from_millis(config.tick_interval_ms))
    }

    /// Как часто пересчитываем и публикуем состояние, пока часы идут.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for ClockRules {
    fn default() -> Self {
        Self::standard()
    }
}
