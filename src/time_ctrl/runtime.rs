// src/time_ctrl/runtime.rs
//! Рантайм часов: одна tokio-задача владеет `MatchClock` и крутит тик.
//!
//! Единственный писатель:
//! - команды, тики и смена профиля сериализуются одним `select!`-циклом;
//! - тикер существует только пока идёт фаза, пересоздаётся на переходе
//!   в добавленное время и выбрасывается на паузе/сбросе в той же итерации,
//!   поэтому "отменённый" тик не может записать устаревшее состояние;
//! - после каждого шага публикуем снимок в `watch` и отдаём события вибрации.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::domain::{GameId, GameSpec};
use crate::infra::game_store::GameSettingsStore;

use super::clock::{ClockPhase, ClockSnapshot, GameChange, MatchClock, TickOutcome};
use super::errors::ClockError;
use super::feedback::FeedbackEvent;
use super::time_rules::ClockRules;

/// Команды в почтовый ящик рантайма.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockCommand {
    Start,
    Pause,
    /// Старт, если часы стоят, иначе пауза. Решается внутри рантайма.
    Toggle,
    Reset,
    SwitchPeriod,
    Shutdown,
}

/// Всё, что возвращает `spawn_clock`.
pub struct SpawnedClock {
    /// Ручка для команд и чтения снимков (клонируемая).
    pub handle: ClockHandle,
    /// Очередь событий вибрации: один потребитель, каждое событие ровно один раз.
    pub feedback: mpsc::UnboundedReceiver<FeedbackEvent>,
    /// Задача рантайма (завершается после `shutdown`).
    pub task: JoinHandle<()>,
}

/// Ручка управления часами.
#[derive(Clone)]
pub struct ClockHandle {
    commands: mpsc::UnboundedSender<ClockCommand>,
    snapshots: watch::Receiver<ClockSnapshot>,
    store: Arc<dyn GameSettingsStore>,
}

impl ClockHandle {
    pub fn start(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::Start)
    }

    pub fn pause(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::Pause)
    }

    /// Одна кнопка play/pause. Состояние проверяется в задаче рантайма,
    /// поэтому уже стоящие в очереди команды учитываются.
    pub fn toggle(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::Toggle)
    }

    pub fn reset(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::Reset)
    }

    pub fn switch_period(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::SwitchPeriod)
    }

    /// Остановить рантайм. Повторный вызов - `RuntimeStopped`.
    pub fn shutdown(&self) -> Result<(), ClockError> {
        self.send(ClockCommand::Shutdown)
    }

    /// Выбрать профиль: пишем в хранилище, часы реагируют на его уведомление.
    pub fn select_game(&self, game: GameSpec) -> Result<(), ClockError> {
        self.ensure_alive()?;
        self.store.select(game)?;
        Ok(())
    }

    /// Выбрать профиль по id из каталога хранилища.
    pub fn select_game_by_id(&self, id: GameId) -> Result<GameSpec, ClockError> {
        self.ensure_alive()?;
        Ok(self.store.select_by_id(id)?)
    }

    pub fn available_games(&self) -> Vec<GameSpec> {
        self.store.list_available()
    }

    pub fn current_game(&self) -> GameSpec {
        self.store.current()
    }

    /// Последний опубликованный снимок.
    pub fn snapshot(&self) -> ClockSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Подписка на снимки (обновляются на каждом тике и каждой команде).
    pub fn subscribe(&self) -> watch::Receiver<ClockSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.commands.is_closed()
    }

    fn ensure_alive(&self) -> Result<(), ClockError> {
        if self.is_stopped() {
            return Err(ClockError::RuntimeStopped);
        }
        Ok(())
    }

    fn send(&self, command: ClockCommand) -> Result<(), ClockError> {
        self.commands.send(command).map_err(|_| ClockError::RuntimeStopped)
    }
}

/// Запустить рантайм часов в текущем tokio-рантайме.
pub fn spawn_clock(store: Arc<dyn GameSettingsStore>, rules: ClockRules) -> SpawnedClock {
    let mut games = store.subscribe();
    let initial = games.borrow_and_update().clone();
    let clock = MatchClock::new(initial);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(clock.snapshot());
    let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();

    let worker = ClockWorker {
        clock,
        rules,
        commands: command_rx,
        games,
        games_open: true,
        snapshots: snapshot_tx,
        feedback: feedback_tx,
        feedback_open: true,
        ticker: None,
        ticker_phase: ClockPhase::Idle,
    };

    let task = tokio::spawn(worker.run());

    SpawnedClock {
        handle: ClockHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            store,
        },
        feedback: feedback_rx,
        task,
    }
}

struct ClockWorker {
    clock: MatchClock,
    rules: ClockRules,
    commands: mpsc::UnboundedReceiver<ClockCommand>,
    games: watch::Receiver<GameSpec>,
    games_open: bool,
    snapshots: watch::Sender<ClockSnapshot>,
    feedback: mpsc::UnboundedSender<FeedbackEvent>,
    feedback_open: bool,
    ticker: Option<Interval>,
    ticker_phase: ClockPhase,
}

impl ClockWorker {
    async fn run(mut self) {
        tracing::info!(
            game_id = self.clock.game().id,
            tick_ms = self.rules.tick_interval().as_millis() as u64,
            "match clock runtime started"
        );

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(ClockCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },

                changed = self.games.changed(), if self.games_open => match changed {
                    Ok(()) => {
                        let game = self.games.borrow_and_update().clone();
                        self.handle_game(game);
                    }
                    Err(_) => {
                        self.games_open = false;
                        tracing::warn!("game store dropped, keeping current profile");
                    }
                },

                _ = next_tick(&mut self.ticker) => self.handle_tick(),
            }

            self.sync_ticker();
            self.publish();
        }

        self.ticker = None;
        tracing::info!("match clock runtime stopped");
    }

    fn handle_command(&mut self, command: ClockCommand) {
        let now = Instant::now();
        let applied = match command {
            ClockCommand::Start => self.clock.start(now),
            ClockCommand::Pause => self.clock.pause(now),
            ClockCommand::Toggle => {
                if self.clock.is_running() {
                    self.clock.pause(now)
                } else {
                    self.clock.start(now)
                }
            }
            ClockCommand::Reset => {
                self.clock.reset(now);
                tracing::info!(period = ?self.clock.period(), "clock reset");
                true
            }
            ClockCommand::SwitchPeriod => self.clock.switch_period(),
            // Shutdown обрабатывается в цикле.
            ClockCommand::Shutdown => false,
        };

        tracing::debug!(
            ?command,
            applied,
            phase = ?self.clock.phase(),
            elapsed_ms = self.clock.elapsed_primary().as_millis() as u64,
            "command handled"
        );
    }

    fn handle_tick(&mut self) {
        let now = Instant::now();
        match self.clock.tick(now) {
            TickOutcome::HandedOff => {
                tracing::info!(
                    period = ?self.clock.period(),
                    target_ms = self.clock.target_length().as_millis() as u64,
                    "half time reached, additional time started"
                );
            }
            TickOutcome::Idle => {
                tracing::debug!("tick while idle ignored");
            }
            TickOutcome::Primary | TickOutcome::Additional => {}
        }
    }

    fn handle_game(&mut self, game: GameSpec) {
        let game_id = game.id;
        match self.clock.apply_game(game) {
            GameChange::Applied => {
                tracing::info!(game_id, time_left_ms = self.clock.time_left().as_millis() as u64, "game applied")
            }
            GameChange::Pending => {
                tracing::info!(game_id, "game selected mid-half, applies on reset or period switch")
            }
            GameChange::Rejected => {
                tracing::warn!(game_id, "invalid game ignored by the clock")
            }
            GameChange::Unchanged => {}
        }
    }

    /// Привести тикер в соответствие с фазой часов.
    fn sync_ticker(&mut self) {
        let phase = self.clock.phase();

        if phase == ClockPhase::Idle {
            if self.ticker.take().is_some() {
                tracing::debug!("tick loop cancelled");
            }
            self.ticker_phase = ClockPhase::Idle;
            return;
        }

        if self.ticker.is_none() || self.ticker_phase != phase {
            let period = self.rules.tick_interval();
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.ticker = Some(interval);
            self.ticker_phase = phase;
            tracing::debug!(?phase, "tick loop started");
        }
    }

    fn publish(&mut self) {
        self.snapshots.send_replace(self.clock.snapshot());

        for event in self.clock.drain_feedback() {
            if !self.feedback_open {
                continue;
            }
            if self.feedback.send(event).is_err() {
                self.feedback_open = false;
                tracing::warn!("feedback consumer dropped, haptic events discarded");
            }
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
