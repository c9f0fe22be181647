// src/api/dto.rs
//! DTO для фронта: готовые к выводу строки и доступность кнопок.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{GameId, GameSpec};
use crate::time_ctrl::ClockSnapshot;

/// `MM:SS`, секунды вниз. Минуты не сворачиваем (90:00, 104:30).
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// `MM:SS` для обратного отсчёта: секунды вверх, чтобы 00:00 появлялось
/// только когда время действительно вышло.
pub fn format_countdown(duration: Duration) -> String {
    let total_secs = (duration.as_millis() as u64).div_ceil(1000);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Главная кнопка часов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrimaryActionDto {
    Start,
    Pause,
}

/// Какие элементы управления сейчас доступны.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlsDto {
    pub primary_action: PrimaryActionDto,
    /// Выбор профиля: только в стартовой позиции и на стоящих часах.
    pub can_open_settings: bool,
    /// Сброс: когда часы стоят не на нуле.
    pub can_reset: bool,
    /// Смена тайма: как и выбор профиля.
    pub can_switch_period: bool,
}

impl ControlsDto {
    pub fn from_snapshot(snapshot: &ClockSnapshot) -> Self {
        let at_start = snapshot.timer_in_start_position && !snapshot.is_running;
        Self {
            primary_action: if snapshot.is_running {
                PrimaryActionDto::Pause
            } else {
                PrimaryActionDto::Start
            },
            can_open_settings: at_start,
            can_reset: !snapshot.timer_in_start_position && !snapshot.is_running,
            can_switch_period: at_start,
        }
    }
}

/// Представление часов для экрана.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockViewDto {
    pub game_id: GameId,
    pub game_description: String,
    /// 1 или 2.
    pub period: u8,
    pub half_label: String,
    /// Игровая минута (`MM:SS`).
    pub play_clock: String,
    /// Остаток основного времени (`MM:SS`, вверх).
    pub time_left: String,
    /// Добавленное время (`MM:SS`).
    pub additional_time: String,
    pub elapsed_primary_ms: u64,
    pub time_left_ms: u64,
    pub additional_time_ms: u64,
    pub is_running: bool,
    pub is_additional_running: bool,
    pub is_finished: bool,
    pub timer_in_start_position: bool,
    pub pending_game_id: Option<GameId>,
    pub controls: ControlsDto,
}

/// Собрать DTO экрана из снимка часов.
pub fn build_clock_view(snapshot: &ClockSnapshot) -> ClockViewDto {
    ClockViewDto {
        game_id: snapshot.game_id,
        game_description: snapshot.game_description.clone(),
        period: snapshot.period.number(),
        half_label: snapshot.half_label.clone(),
        play_clock: format_clock(snapshot.play_clock),
        time_left: format_countdown(snapshot.time_left),
        additional_time: format_clock(snapshot.elapsed_additional),
        elapsed_primary_ms: snapshot.elapsed_primary.as_millis() as u64,
        time_left_ms: snapshot.time_left.as_millis() as u64,
        additional_time_ms: snapshot.elapsed_additional.as_millis() as u64,
        is_running: snapshot.is_running,
        is_additional_running: snapshot.is_additional_running,
        is_finished: snapshot.is_finished,
        timer_in_start_position: snapshot.timer_in_start_position,
        pending_game_id: snapshot.pending_game_id,
        controls: ControlsDto::from_snapshot(snapshot),
    }
}

/// Одна строка в списке профилей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameOptionDto {
    pub id: GameId,
    pub description: String,
    pub first_half_minutes: u64,
    pub second_half_minutes: u64,
    pub selected: bool,
}

/// Список профилей с отметкой выбранного.
pub fn build_game_options(games: &[GameSpec], selected: GameId) -> Vec<GameOptionDto> {
    games
        .iter()
        .map(|g| GameOptionDto {
            id: g.id,
            description: g.description.clone(),
            first_half_minutes: g.first_half.length.as_secs() / 60,
            second_half_minutes: g.second_half.length.as_secs() / 60,
            selected: g.id == selected,
        })
        .collect()
}
