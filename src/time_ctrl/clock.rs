// src/time_ctrl/clock.rs
//! Машина состояний часов судьи: основной тайм, добавленное время, пауза, сброс.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::domain::{GameId, GameSpec, HalfSpec, Period};

use super::feedback::FeedbackEvent;
use super::phase::PhaseTimer;

/// Производное состояние часов (отдельного поля под него нет).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClockPhase {
    /// Часы стоят (ещё не запускались или на паузе).
    Idle,
    /// Идёт основное время тайма.
    PrimaryRunning,
    /// Основное время вышло, идёт добавленное.
    AdditionalRunning,
}

/// Что произошло за один тик.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ничего не идёт - тик проигнорирован.
    Idle,
    /// Основное время обновлено, цель ещё не достигнута.
    Primary,
    /// Цель достигнута: основное время остановлено, добавленное запущено.
    HandedOff,
    /// Обновлено добавленное время.
    Additional,
}

/// Результат смены профиля игры.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameChange {
    /// Профиль тот же - ничего не поменялось.
    Unchanged,
    /// Часы в стартовой позиции - профиль применён сразу.
    Applied,
    /// Тайм уже идёт - профиль отложен до reset / смены тайма.
    Pending,
    /// Профиль не прошёл `GameSpec::validate` - часы его не принимают.
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PauseScope {
    /// Только основное время (внутренний переход в добавленное).
    PrimaryOnly,
    /// Обе фазы.
    All,
}

/// Неизменяемый снимок состояния для фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub game_id: GameId,
    pub game_description: String,
    pub period: Period,
    pub half_label: String,
    pub phase: ClockPhase,
    /// Сколько сыграно в текущем тайме (без добавленного).
    pub elapsed_primary: Duration,
    /// Игровая минута: смещение тайма + `elapsed_primary` (во втором тайме 45:00 -> 90:00).
    pub play_clock: Duration,
    pub time_left: Duration,
    pub elapsed_additional: Duration,
    pub is_primary_running: bool,
    pub is_additional_running: bool,
    pub is_running: bool,
    pub is_finished: bool,
    /// `elapsed_primary == 0`.
    pub timer_in_start_position: bool,
    /// Профиль, выбранный посреди тайма и ждущий reset / смены тайма.
    pub pending_game_id: Option<GameId>,
}

/// Часы судьи.
///
/// Все операции, зависящие от времени, получают `now` явно - так машина
/// состояний детерминирована, а источник времени (монотонный `Instant`)
/// выбирает рантайм. Все команды тотальные: недопустимый вызов = no-op.
#[derive(Clone, Debug)]
pub struct MatchClock {
    game: GameSpec,
    pending_game: Option<GameSpec>,
    period: Period,
    primary: PhaseTimer,
    additional: PhaseTimer,
    finished: bool,
    elapsed_primary: Duration,
    time_left: Duration,
    elapsed_additional: Duration,
    feedback: VecDeque<FeedbackEvent>,
}

impl MatchClock {
    /// Новая сессия: первый тайм, всё по нулям, `time_left` = длина первого тайма.
    pub fn new(game: GameSpec) -> Self {
        let time_left = game.target_length(Period::First);
        Self {
            game,
            pending_game: None,
            period: Period::First,
            primary: PhaseTimer::new(),
            additional: PhaseTimer::new(),
            finished: false,
            elapsed_primary: Duration::ZERO,
            time_left,
            elapsed_additional: Duration::ZERO,
            feedback: VecDeque::new(),
        }
    }

    // --- чтение состояния ---

    pub fn game(&self) -> &GameSpec {
        &self.game
    }

    pub fn pending_game(&self) -> Option<&GameSpec> {
        self.pending_game.as_ref()
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn half(&self) -> &HalfSpec {
        self.game.half(self.period)
    }

    pub fn target_length(&self) -> Duration {
        self.half().length
    }

    pub fn elapsed_primary(&self) -> Duration {
        self.elapsed_primary
    }

    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn elapsed_additional(&self) -> Duration {
        self.elapsed_additional
    }

    pub fn accumulated_primary(&self) -> Duration {
        self.primary.accumulated()
    }

    pub fn accumulated_additional(&self) -> Duration {
        self.additional.accumulated()
    }

    pub fn is_primary_running(&self) -> bool {
        self.primary.is_running()
    }

    pub fn is_additional_running(&self) -> bool {
        self.additional.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.is_primary_running() || self.is_additional_running()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn timer_in_start_position(&self) -> bool {
        self.elapsed_primary.is_zero()
    }

    /// Можно ли менять тайм/профиль: ноль на часах, они стоят и тайм не закончен.
    pub fn can_switch_period(&self) -> bool {
        self.timer_in_start_position() && !self.is_running() && !self.finished
    }

    pub fn phase(&self) -> ClockPhase {
        if self.is_primary_running() {
            ClockPhase::PrimaryRunning
        } else if self.is_additional_running() {
            ClockPhase::AdditionalRunning
        } else {
            ClockPhase::Idle
        }
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        let half = self.half();
        ClockSnapshot {
            game_id: self.game.id,
            game_description: self.game.description.clone(),
            period: self.period,
            half_label: half.label.clone(),
            phase: self.phase(),
            elapsed_primary: self.elapsed_primary,
            play_clock: half.start_offset + self.elapsed_primary,
            time_left: self.time_left,
            elapsed_additional: self.elapsed_additional,
            is_primary_running: self.is_primary_running(),
            is_additional_running: self.is_additional_running(),
            is_running: self.is_running(),
            is_finished: self.finished,
            timer_in_start_position: self.timer_in_start_position(),
            pending_game_id: self.pending_game.as_ref().map(|g| g.id),
        }
    }

    /// Забрать накопившиеся события вибрации (каждое отдаётся ровно один раз).
    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        self.feedback.drain(..).collect()
    }

    // --- команды ---

    /// Запуск часов.
    ///
    /// - уже идут - no-op;
    /// - тайм не закончен - стартует основное время;
    /// - основное время уже вышло (судья поставил добавленное на паузу) -
    ///   продолжаем добавленное.
    ///
    /// Старт на законченном тайме намеренно не игнорируется (в отличие от
    /// часов, где после конца тайма кнопка старта мертва): иначе добавленное
    /// время после паузы не продолжить без сброса. Короткий импульс шлём и здесь.
    ///
    /// Возвращает `true`, если что-то запустилось.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }

        if self.finished {
            self.additional.start(now);
            self.elapsed_additional = self.additional.elapsed(now);
        } else {
            self.primary.start(now);
        }

        self.feedback.push_back(FeedbackEvent::short_pulse());
        true
    }

    /// Один тик: пересчитать активную фазу от момента её старта.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.primary.is_running() {
            let target = self.target_length();
            let elapsed = self.primary.elapsed(now);

            if elapsed >= target {
                // Цель достигнута: в одном шаге останавливаем основное время
                // и запускаем добавленное.
                self.pause_phases(now, PauseScope::PrimaryOnly);
                self.finished = true;
                self.additional.start(now);
                self.elapsed_additional = self.additional.elapsed(now);
                return TickOutcome::HandedOff;
            }

            self.elapsed_primary = elapsed;
            self.time_left = target - elapsed;
            return TickOutcome::Primary;
        }

        if self.additional.is_running() {
            self.elapsed_additional = self.additional.elapsed(now);
            return TickOutcome::Additional;
        }

        TickOutcome::Idle
    }

    /// Пауза по команде судьи. Идемпотентна.
    ///
    /// Сначала доводим активную фазу до `now` (если цель уже достигнута -
    /// переход в добавленное время применяется), потом останавливаем всё.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }

        self.tick(now);
        let stopped = self.pause_phases(now, PauseScope::All);
        if stopped {
            self.feedback.push_back(FeedbackEvent::long_pulse());
        }
        stopped
    }

    /// Полный сброс в стартовую позицию текущего тайма.
    pub fn reset(&mut self, now: Instant) {
        self.pause_phases(now, PauseScope::All);

        self.primary.clear();
        self.additional.clear();
        self.elapsed_primary = Duration::ZERO;
        self.elapsed_additional = Duration::ZERO;
        self.finished = false;

        if let Some(game) = self.pending_game.take() {
            self.game = game;
        }
        self.time_left = self.target_length();
    }

    /// Сменить тайм. Только в стартовой позиции, иначе no-op.
    pub fn switch_period(&mut self) -> bool {
        if !self.can_switch_period() {
            return false;
        }

        self.period = self.period.other();
        if let Some(game) = self.pending_game.take() {
            self.game = game;
        }
        self.time_left = self.target_length();
        true
    }

    /// Реакция на смену выбранного профиля в хранилище.
    pub fn apply_game(&mut self, game: GameSpec) -> GameChange {
        if game.validate().is_err() {
            return GameChange::Rejected;
        }

        if game == self.game {
            // Вернулись к активному профилю - отложенный выбор больше не нужен.
            return match self.pending_game.take() {
                Some(_) => GameChange::Applied,
                None => GameChange::Unchanged,
            };
        }

        if self.can_switch_period() {
            self.game = game;
            self.pending_game = None;
            self.time_left = self.target_length();
            GameChange::Applied
        } else {
            self.pending_game = Some(game);
            GameChange::Pending
        }
    }

    /// Остановить фазы и положить прошедшее время в накопленное.
    fn pause_phases(&mut self, now: Instant, scope: PauseScope) -> bool {
        let mut stopped = false;

        if self.primary.is_running() {
            let target = self.target_length();
            let elapsed = self.primary.elapsed(now).min(target);
            self.elapsed_primary = elapsed;
            self.time_left = target - elapsed;
            self.primary.stop_and_bank(elapsed);
            stopped = true;
        }

        if scope == PauseScope::All && self.additional.is_running() {
            let elapsed = self.additional.elapsed(now);
            self.elapsed_additional = elapsed;
            self.additional.stop_and_bank(elapsed);
            stopped = true;
        }

        stopped
    }
}
