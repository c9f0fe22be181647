// src/domain/period.rs

use serde::{Deserialize, Serialize};

/// Какой тайм сейчас играется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Period {
    /// Первый тайм.
    #[default]
    First,
    /// Второй тайм.
    Second,
}

impl Period {
    /// Другой тайм (First <-> Second).
    pub fn other(self) -> Period {
        match self {
            Period::First => Period::Second,
            Period::Second => Period::First,
        }
    }

    /// Номер тайма для вывода: 1 или 2.
    pub fn number(self) -> u8 {
        match self {
            Period::First => 1,
            Period::Second => 2,
        }
    }
}
