// src/domain/game.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::period::Period;
use crate::domain::GameId;

/// Описание одного тайма: с какой минуты он начинается, сколько длится
/// и как подписан на экране.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HalfSpec {
    /// К какому тайму относится.
    pub period: Period,
    /// Смещение начала тайма от начала матча (для второго тайма обычно = длина первого).
    pub start_offset: Duration,
    /// Целевая длительность тайма (без добавленного времени).
    pub length: Duration,
    /// Подпись на экране ("1. Halbzeit" и т.п.).
    pub label: String,
}

impl HalfSpec {
    pub fn new(period: Period, start_offset: Duration, length: Duration, label: impl Into<String>) -> Self {
        Self {
            period,
            start_offset,
            length,
            label: label.into(),
        }
    }

    /// Удобный конструктор "в минутах".
    pub fn from_minutes(period: Period, start_minute: u64, length_minutes: u64, label: impl Into<String>) -> Self {
        Self::new(
            period,
            Duration::from_secs(start_minute * 60),
            Duration::from_secs(length_minutes * 60),
            label,
        )
    }
}

/// Профиль игры: два тайма + описание (возрастная группа / лига).
///
/// Профили живут в `GameCatalog` и никогда не меняются; часы только читают их.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSpec {
    pub id: GameId,
    pub first_half: HalfSpec,
    pub second_half: HalfSpec,
    pub description: String,
}

impl GameSpec {
    pub fn new(id: GameId, first_half: HalfSpec, second_half: HalfSpec, description: impl Into<String>) -> Self {
        Self {
            id,
            first_half,
            second_half,
            description: description.into(),
        }
    }

    /// Спецификация тайма для заданного периода.
    pub fn half(&self, period: Period) -> &HalfSpec {
        match period {
            Period::First => &self.first_half,
            Period::Second => &self.second_half,
        }
    }

    /// Целевая длина тайма для периода.
    pub fn target_length(&self, period: Period) -> Duration {
        self.half(period).length
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.first_half.period != Period::First {
            return Err(format!("Game {}: first_half has period {:?}", self.id, self.first_half.period));
        }
        if self.second_half.period != Period::Second {
            return Err(format!("Game {}: second_half has period {:?}", self.id, self.second_half.period));
        }
        if self.first_half.length.is_zero() || self.second_half.length.is_zero() {
            return Err(format!("Game {}: half length = 0", self.id));
        }
        Ok(())
    }
}
