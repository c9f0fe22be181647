// src/domain/catalog.rs
//! Каталог предустановленных профилей игры.

use serde::{Deserialize, Serialize};

use crate::domain::game::{GameSpec, HalfSpec};
use crate::domain::period::Period;
use crate::domain::GameId;

pub const FIRST_HALF_LABEL: &str = "1. Halbzeit";
pub const SECOND_HALF_LABEL: &str = "2. Halbzeit";

/// Неизменяемый список профилей. Первый профиль - профиль по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameCatalog {
    games: Vec<GameSpec>,
}

impl GameCatalog {
    /// Каталог из произвольного набора профилей (для тестов с фейковыми каталогами).
    ///
    /// Пустой каталог не имеет смысла: часам нужен хотя бы один профиль.
    /// Каталог с некорректным профилем тоже не создаётся.
    pub fn new(games: Vec<GameSpec>) -> Option<Self> {
        if games.is_empty() || games.iter().any(|g| g.validate().is_err()) {
            return None;
        }
        Some(Self { games })
    }

    /// Стандартные профили: взрослые и юношеские составы.
    pub fn standard() -> Self {
        Self {
            games: vec![
                two_equal_halves(1, 45, "Damen / Herren"),
                two_equal_halves(2, 40, "B - Jugend"),
                two_equal_halves(3, 35, "C - Jugend"),
                two_equal_halves(4, 30, "D - Jugend"),
            ],
        }
    }

    pub fn list_available(&self) -> &[GameSpec] {
        &self.games
    }

    pub fn default_game(&self) -> &GameSpec {
        // Конструкторы гарантируют непустой список.
        &self.games[0]
    }

    pub fn find(&self, id: GameId) -> Option<&GameSpec> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Профиль из двух одинаковых таймов; второй тайм начинается с минуты `half_minutes`.
pub fn two_equal_halves(id: GameId, half_minutes: u64, description: &str) -> GameSpec {
    GameSpec::new(
        id,
        HalfSpec::from_minutes(Period::First, 0, half_minutes, FIRST_HALF_LABEL),
        HalfSpec::from_minutes(Period::Second, half_minutes, half_minutes, SECOND_HALF_LABEL),
        description,
    )
}
