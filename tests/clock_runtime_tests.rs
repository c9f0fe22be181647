// tests/clock_runtime_tests.rs
//
// Рантайм часов на "замороженном" времени tokio (start_paused = true):
// время двигаем сами через tokio::time::advance, тикер срабатывает детерминированно.

use std::sync::Arc;
use std::time::Duration;

use refwatch_clock::domain::{GameSpec, HalfSpec, Period};
use refwatch_clock::infra::{GameSettingsStore, InMemoryGameStore, SettingsError};
use refwatch_clock::time_ctrl::{
    spawn_clock, ClockError, ClockRules, ClockSnapshot, FeedbackEvent, SpawnedClock,
};
use tokio::sync::watch;
use tokio::time;

//
// ---------- helpers ----------
//

fn mins(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

fn spawn_standard() -> (Arc<InMemoryGameStore>, SpawnedClock) {
    let store = Arc::new(InMemoryGameStore::new());
    let spawned = spawn_clock(store.clone(), ClockRules::standard());
    (store, spawned)
}

/// Дождаться снимка, удовлетворяющего условию.
async fn wait_until(
    rx: &mut watch::Receiver<ClockSnapshot>,
    pred: impl FnMut(&ClockSnapshot) -> bool,
) -> ClockSnapshot {
    rx.wait_for(pred).await.expect("clock runtime alive").clone()
}

/// Дождаться следующей публикации (после команды она всегда есть).
async fn next_publish(rx: &mut watch::Receiver<ClockSnapshot>) -> ClockSnapshot {
    rx.changed().await.expect("clock runtime alive");
    rx.borrow_and_update().clone()
}

//
// ---------- тесты ----------
//

#[tokio::test(start_paused = true)]
async fn start_publishes_running_state_and_short_pulse() {
    let (_store, mut spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    let initial = spawned.handle.snapshot();
    assert_eq!(initial.time_left, mins(45));
    assert!(!initial.is_running);

    spawned.handle.start().unwrap();
    let snap = wait_until(&mut rx, |s| s.is_primary_running).await;
    assert!(snap.is_running);
    assert!(!snap.is_finished);

    assert_eq!(spawned.feedback.recv().await, Some(FeedbackEvent::short_pulse()));
}

#[tokio::test(start_paused = true)]
async fn ticks_advance_elapsed_time_while_running() {
    let (_store, spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    spawned.handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_primary_running).await;

    time::advance(Duration::from_secs(10)).await;
    let snap = wait_until(&mut rx, |s| s.elapsed_primary >= Duration::from_secs(10)).await;
    assert!(snap.elapsed_primary < Duration::from_secs(10) + Duration::from_millis(100));
    assert_eq!(snap.time_left, mins(45) - snap.elapsed_primary);
}

#[tokio::test(start_paused = true)]
async fn full_half_rolls_into_additional_time_and_resets() {
    let (_store, mut spawned) = spawn_standard();
    let handle = spawned.handle.clone();
    let mut rx = handle.subscribe();

    handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_primary_running).await;

    // 45 минут основного времени.
    time::advance(mins(45)).await;
    let snap = wait_until(&mut rx, |s| s.is_finished).await;
    assert_eq!(snap.elapsed_primary, mins(45));
    assert_eq!(snap.time_left, Duration::ZERO);
    assert!(!snap.is_primary_running);
    assert!(snap.is_additional_running);
    assert_eq!(snap.elapsed_additional, Duration::ZERO);

    // Ещё 2 минуты добавленного.
    time::advance(mins(2)).await;
    wait_until(&mut rx, |s| s.elapsed_additional >= mins(2)).await;

    handle.pause().unwrap();
    let paused = wait_until(&mut rx, |s| !s.is_running).await;
    assert!(paused.elapsed_additional >= mins(2));
    assert!(paused.elapsed_additional <= mins(2) + Duration::from_millis(100));
    assert!(paused.is_finished);

    handle.reset().unwrap();
    let reset = wait_until(&mut rx, |s| !s.is_finished).await;
    assert_eq!(reset.elapsed_primary, Duration::ZERO);
    assert_eq!(reset.time_left, mins(45));
    assert_eq!(reset.elapsed_additional, Duration::ZERO);
    assert!(!reset.is_running);

    // Вибрация: старт (короткая), пауза (длинная). На переходе и сбросе - ничего.
    assert_eq!(spawned.feedback.recv().await, Some(FeedbackEvent::short_pulse()));
    assert_eq!(spawned.feedback.recv().await, Some(FeedbackEvent::long_pulse()));
    assert!(spawned.feedback.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn no_tick_writes_state_after_pause() {
    let (_store, spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    spawned.handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_primary_running).await;
    time::advance(Duration::from_secs(3)).await;
    wait_until(&mut rx, |s| s.elapsed_primary >= Duration::from_secs(3)).await;

    spawned.handle.pause().unwrap();
    let paused = wait_until(&mut rx, |s| !s.is_running).await;

    time::advance(mins(5)).await;
    time::sleep(Duration::from_secs(1)).await;

    assert_eq!(spawned.handle.snapshot(), paused);
}

#[tokio::test(start_paused = true)]
async fn selecting_game_at_start_position_updates_time_left() {
    let (store, spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    let game = spawned.handle.select_game_by_id(4).unwrap();
    assert_eq!(game.description, "D - Jugend");
    assert_eq!(store.current().id, 4);

    let snap = wait_until(&mut rx, |s| s.game_id == 4).await;
    assert_eq!(snap.time_left, mins(30));
    assert!(!snap.is_running);
    assert!(snap.timer_in_start_position);
}

#[tokio::test(start_paused = true)]
async fn selecting_game_through_store_mid_half_waits_for_reset() {
    let (store, spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    spawned.handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_primary_running).await;
    time::advance(mins(1)).await;
    wait_until(&mut rx, |s| s.elapsed_primary >= mins(1)).await;

    // Выбор напрямую в хранилище: часы узнают о нём через подписку.
    store.select_by_id(2).unwrap();
    let snap = wait_until(&mut rx, |s| s.pending_game_id == Some(2)).await;
    assert_eq!(snap.game_id, 1);

    spawned.handle.reset().unwrap();
    let snap = wait_until(&mut rx, |s| s.game_id == 2).await;
    assert_eq!(snap.time_left, mins(40));
    assert_eq!(snap.pending_game_id, None);
}

#[tokio::test(start_paused = true)]
async fn switch_period_is_guarded_inside_the_runtime() {
    let (_store, spawned) = spawn_standard();
    let mut rx = spawned.handle.subscribe();

    spawned.handle.switch_period().unwrap();
    let snap = wait_until(&mut rx, |s| s.period == Period::Second).await;
    assert_eq!(snap.half_label, "2. Halbzeit");
    assert_eq!(snap.play_clock, mins(45));

    spawned.handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_running).await;
    time::advance(Duration::from_secs(2)).await;
    wait_until(&mut rx, |s| s.elapsed_primary >= Duration::from_secs(2)).await;
    spawned.handle.pause().unwrap();
    wait_until(&mut rx, |s| !s.is_running).await;

    rx.borrow_and_update();
    spawned.handle.switch_period().unwrap();
    let after = next_publish(&mut rx).await;
    assert_eq!(after.period, Period::Second);
    assert!(after.elapsed_primary >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_runtime_and_rejects_commands() {
    let (_store, spawned) = spawn_standard();
    let SpawnedClock { handle, task, .. } = spawned;

    handle.shutdown().unwrap();
    task.await.unwrap();

    assert!(handle.is_stopped());
    assert_eq!(handle.start(), Err(ClockError::RuntimeStopped));
    assert_eq!(handle.select_game_by_id(2), Err(ClockError::RuntimeStopped));
}

#[tokio::test(start_paused = true)]
async fn toggle_right_after_start_pauses_the_clock() {
    let (_store, mut spawned) = spawn_standard();

    // Обе команды уходят до того, как рантайм опубликует снимок после старта.
    spawned.handle.start().unwrap();
    spawned.handle.toggle().unwrap();
    time::sleep(Duration::from_millis(1)).await;

    let snap = spawned.handle.snapshot();
    assert!(!snap.is_running);
    assert_eq!(spawned.feedback.recv().await, Some(FeedbackEvent::short_pulse()));
    assert_eq!(spawned.feedback.recv().await, Some(FeedbackEvent::long_pulse()));

    spawned.handle.toggle().unwrap();
    time::sleep(Duration::from_millis(1)).await;
    assert!(spawned.handle.snapshot().is_running);
}

#[tokio::test(start_paused = true)]
async fn zero_tick_interval_is_clamped_and_runtime_survives() {
    let store = Arc::new(InMemoryGameStore::new());
    let rules = ClockRules::new(Duration::ZERO);
    assert_eq!(rules.tick_interval(), Duration::from_millis(10));

    let spawned = spawn_clock(store, rules);
    let mut rx = spawned.handle.subscribe();

    spawned.handle.start().unwrap();
    wait_until(&mut rx, |s| s.is_primary_running).await;
    time::advance(Duration::from_secs(1)).await;
    wait_until(&mut rx, |s| s.elapsed_primary >= Duration::from_secs(1)).await;

    assert!(!spawned.handle.is_stopped());
    assert!(!spawned.task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn invalid_game_through_handle_is_rejected() {
    let (store, spawned) = spawn_standard();

    let broken = GameSpec::new(
        13,
        HalfSpec::from_minutes(Period::First, 0, 0, "a"),
        HalfSpec::from_minutes(Period::Second, 0, 45, "b"),
        "broken",
    );

    assert!(matches!(
        spawned.handle.select_game(broken),
        Err(ClockError::Settings(SettingsError::InvalidGame { id: 13, .. }))
    ));
    assert_eq!(store.current().id, 1);

    time::sleep(Duration::from_millis(1)).await;
    let snap = spawned.handle.snapshot();
    assert_eq!(snap.game_id, 1);
    assert_eq!(snap.time_left, mins(45));
}
