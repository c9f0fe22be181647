// src/time_ctrl/phase.rs
//! Учёт времени одной фазы (основной тайм или добавленное время).

use std::time::Duration;

use tokio::time::Instant;

/// Секундомер фазы: сколько "накоплено" за завершённые отрезки
/// и когда начался текущий отрезок (если фаза идёт).
///
/// Время считаем как `accumulated + (now - run_start)`, а не прибавляем
/// по тику - пропущенный тик не даёт дрейфа.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimer {
    accumulated: Duration,
    run_start: Option<Instant>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.run_start.is_some()
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn run_start(&self) -> Option<Instant> {
        self.run_start
    }

    /// Запустить отрезок. Если уже идёт - ничего не делаем.
    pub fn start(&mut self, now: Instant) {
        if self.run_start.is_none() {
            self.run_start = Some(now);
        }
    }

    /// Сколько всего прошло на момент `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.run_start {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }

    /// Остановить отрезок и положить `banked` в накопленное.
    pub fn stop_and_bank(&mut self, banked: Duration) {
        self.run_start = None;
        self.accumulated = banked;
    }

    /// Полный сброс.
    pub fn clear(&mut self) {
        self.accumulated = Duration::ZERO;
        self.run_start = None;
    }
}
