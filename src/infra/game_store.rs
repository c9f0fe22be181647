// src/infra/game_store.rs

use tokio::sync::watch;

use crate::domain::catalog::GameCatalog;
use crate::domain::game::GameSpec;
use crate::domain::GameId;

use super::errors::SettingsError;

/// Абстракция хранилища "какой профиль игры сейчас выбран".
///
/// Часы получают его явно при создании (`Arc<dyn GameSettingsStore>`),
/// без глобального синглтона. Это удобно:
/// - в тестах можно подсунуть фейковый каталог,
/// - в CLI и других фронтах хранилище одно на сессию.
pub trait GameSettingsStore: Send + Sync {
    /// Все доступные профили (фиксированный список).
    fn list_available(&self) -> Vec<GameSpec>;

    /// Текущий выбранный профиль.
    fn current(&self) -> GameSpec;

    /// Выбрать профиль. Подписчики получают уведомление.
    /// Некорректный профиль (например, тайм нулевой длины) отклоняется.
    fn select(&self, game: GameSpec) -> Result<(), SettingsError>;

    /// Выбрать профиль по id из каталога.
    fn select_by_id(&self, id: GameId) -> Result<GameSpec, SettingsError>;

    /// Поток текущего значения: каждый `changed()` = новый выбор.
    fn subscribe(&self) -> watch::Receiver<GameSpec>;
}

/// Простая in-memory реализация поверх `watch`-канала.
#[derive(Debug)]
pub struct InMemoryGameStore {
    catalog: GameCatalog,
    selected: watch::Sender<GameSpec>,
}

impl InMemoryGameStore {
    /// Хранилище со стандартным каталогом и профилем по умолчанию.
    pub fn new() -> Self {
        Self::with_catalog(GameCatalog::standard())
    }

    pub fn with_catalog(catalog: GameCatalog) -> Self {
        let initial = catalog.default_game().clone();
        let (selected, _rx) = watch::channel(initial);
        Self { catalog, selected }
    }

    /// Хранилище, где изначально выбран профиль `id` (например, из конфига).
    pub fn with_selected(catalog: GameCatalog, id: GameId) -> Result<Self, SettingsError> {
        let initial = catalog.find(id).cloned().ok_or(SettingsError::UnknownGame(id))?;
        let (selected, _rx) = watch::channel(initial);
        Ok(Self { catalog, selected })
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSettingsStore for InMemoryGameStore {
    fn list_available(&self) -> Vec<GameSpec> {
        self.catalog.list_available().to_vec()
    }

    fn current(&self) -> GameSpec {
        self.selected.borrow().clone()
    }

    fn select(&self, game: GameSpec) -> Result<(), SettingsError> {
        if let Err(reason) = game.validate() {
            tracing::warn!(game_id = game.id, %reason, "invalid game rejected");
            return Err(SettingsError::InvalidGame { id: game.id, reason });
        }
        tracing::debug!(game_id = game.id, description = %game.description, "game selected");
        self.selected.send_replace(game);
        Ok(())
    }

    fn select_by_id(&self, id: GameId) -> Result<GameSpec, SettingsError> {
        let game = self.catalog.find(id).cloned().ok_or(SettingsError::UnknownGame(id))?;
        self.select(game.clone())?;
        Ok(game)
    }

    fn subscribe(&self) -> watch::Receiver<GameSpec> {
        self.selected.subscribe()
    }
}
