use std::sync::Arc;
use std::time::Duration;

use refwatch_clock::{
    api::{
        commands::{execute, parse_input, Command, Input},
        dto::{
            build_clock_view, build_game_options, format_clock, format_countdown, ControlsDto,
            PrimaryActionDto,
        },
        errors::ApiError,
        queries::{answer, Query, QueryResponse},
    },
    domain::{GameCatalog, GameSpec},
    infra::InMemoryGameStore,
    time_ctrl::{spawn_clock, ClockRules, MatchClock},
};
use tokio::time::Instant;

/// Утилита: часы со стандартным профилем 2 x 45.
fn clock45() -> MatchClock {
    MatchClock::new(GameCatalog::standard().default_game().clone())
}

fn mins(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

//
// ---------- разбор ввода ----------
//

#[test]
fn parse_input_understands_commands_and_aliases() {
    assert_eq!(parse_input("start").unwrap(), Input::Command(Command::Start));
    assert_eq!(parse_input("  S ").unwrap(), Input::Command(Command::Start));
    assert_eq!(parse_input("pause").unwrap(), Input::Command(Command::Pause));
    assert_eq!(parse_input("p").unwrap(), Input::Command(Command::Pause));
    assert_eq!(parse_input("Toggle").unwrap(), Input::Command(Command::Toggle));
    assert_eq!(parse_input("reset").unwrap(), Input::Command(Command::Reset));
    assert_eq!(parse_input("switch").unwrap(), Input::Command(Command::SwitchPeriod));
    assert_eq!(
        parse_input("select 3").unwrap(),
        Input::Command(Command::SelectGame { game_id: 3 })
    );
    assert_eq!(parse_input("games").unwrap(), Input::Query(Query::ListGames));
    assert_eq!(parse_input("status").unwrap(), Input::Query(Query::Status));
    assert_eq!(parse_input("quit").unwrap(), Input::Quit);
    assert_eq!(parse_input("q").unwrap(), Input::Quit);
}

#[test]
fn parse_input_reports_bad_input() {
    assert_eq!(parse_input("   "), Err(ApiError::EmptyInput));
    assert_eq!(parse_input("whistle"), Err(ApiError::UnknownCommand("whistle".into())));
    assert_eq!(
        parse_input("select"),
        Err(ApiError::MissingArgument {
            command: "select",
            argument: "game id"
        })
    );
    assert_eq!(
        parse_input("select abc"),
        Err(ApiError::InvalidArgument {
            command: "select",
            value: "abc".into()
        })
    );
}

//
// ---------- форматирование ----------
//

#[test]
fn clock_formatting_floors_seconds_and_keeps_minutes_above_sixty() {
    assert_eq!(format_clock(Duration::ZERO), "00:00");
    assert_eq!(format_clock(Duration::from_millis(59_999)), "00:59");
    assert_eq!(format_clock(mins(12) + Duration::from_secs(5)), "12:05");
    assert_eq!(format_clock(mins(90)), "90:00");
    assert_eq!(format_clock(mins(104) + Duration::from_secs(30)), "104:30");
}

#[test]
fn countdown_formatting_rounds_up() {
    assert_eq!(format_countdown(Duration::ZERO), "00:00");
    assert_eq!(format_countdown(Duration::from_millis(1)), "00:01");
    assert_eq!(format_countdown(Duration::from_millis(59_001)), "01:00");
    assert_eq!(format_countdown(mins(45)), "45:00");
}

//
// ---------- DTO ----------
//

#[test]
fn clock_view_of_fresh_clock() {
    let view = build_clock_view(&clock45().snapshot());

    assert_eq!(view.game_id, 1);
    assert_eq!(view.game_description, "Damen / Herren");
    assert_eq!(view.period, 1);
    assert_eq!(view.half_label, "1. Halbzeit");
    assert_eq!(view.play_clock, "00:00");
    assert_eq!(view.time_left, "45:00");
    assert_eq!(view.additional_time, "00:00");
    assert_eq!(view.time_left_ms, 45 * 60 * 1000);
    assert!(view.timer_in_start_position);
    assert_eq!(
        view.controls,
        ControlsDto {
            primary_action: PrimaryActionDto::Start,
            can_open_settings: true,
            can_reset: false,
            can_switch_period: true,
        }
    );
}

#[test]
fn controls_follow_clock_state() {
    let t0 = Instant::now();
    let mut clock = clock45();

    clock.start(t0);
    clock.tick(t0 + Duration::from_millis(12_400));
    let running = build_clock_view(&clock.snapshot());
    assert_eq!(running.controls.primary_action, PrimaryActionDto::Pause);
    assert!(!running.controls.can_open_settings);
    assert!(!running.controls.can_reset);
    assert!(!running.controls.can_switch_period);
    assert_eq!(running.play_clock, "00:12");
    assert_eq!(running.time_left, "44:48");

    clock.pause(t0 + Duration::from_millis(12_400));
    let paused = build_clock_view(&clock.snapshot());
    assert_eq!(paused.controls.primary_action, PrimaryActionDto::Start);
    assert!(paused.controls.can_reset);
    assert!(!paused.controls.can_open_settings);
}

#[test]
fn clock_view_in_second_half_additional_time() {
    let t0 = Instant::now();
    let mut clock = clock45();
    clock.switch_period();
    clock.start(t0);
    clock.tick(t0 + mins(45));
    clock.tick(t0 + mins(48) + Duration::from_secs(7));

    let view = build_clock_view(&clock.snapshot());
    assert_eq!(view.period, 2);
    assert_eq!(view.play_clock, "90:00");
    assert_eq!(view.time_left, "00:00");
    assert_eq!(view.additional_time, "03:07");
    assert!(view.is_additional_running);
    assert!(view.is_finished);
}

#[test]
fn game_options_mark_selected_profile() {
    let catalog = GameCatalog::standard();
    let options = build_game_options(catalog.list_available(), 3);

    assert_eq!(options.len(), 4);
    assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    let selected = options.iter().find(|o| o.selected).unwrap();
    assert_eq!(selected.id, 3);
    assert_eq!(selected.description, "C - Jugend");
    assert_eq!(selected.first_half_minutes, 35);
    assert_eq!(selected.second_half_minutes, 35);
}

#[test]
fn clock_view_serializes_formatted_strings() {
    let view = build_clock_view(&clock45().snapshot());
    let json = serde_json::to_value(QueryResponse::Clock(view)).unwrap();

    assert_eq!(json["Clock"]["time_left"], "45:00");
    assert_eq!(json["Clock"]["half_label"], "1. Halbzeit");
    assert_eq!(json["Clock"]["controls"]["primary_action"], "Start");
}

//
// ---------- execute / answer через рантайм ----------
//

#[tokio::test(start_paused = true)]
async fn execute_toggle_and_select_through_runtime() {
    let store = Arc::new(InMemoryGameStore::new());
    let spawned = spawn_clock(store, ClockRules::standard());
    let handle = spawned.handle.clone();
    let mut rx = handle.subscribe();

    execute(&handle, &Command::SelectGame { game_id: 2 }).unwrap();
    rx.wait_for(|s| s.game_id == 2).await.unwrap();

    match answer(&handle, &Query::Status) {
        QueryResponse::Clock(view) => assert_eq!(view.time_left, "40:00"),
        other => panic!("unexpected response: {other:?}"),
    }

    match answer(&handle, &Query::ListGames) {
        QueryResponse::Games(games) => {
            let selected: Vec<_> = games.iter().filter(|g| g.selected).map(|g| g.id).collect();
            assert_eq!(selected, vec![2]);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    execute(&handle, &Command::Toggle).unwrap();
    rx.wait_for(|s| s.is_running).await.unwrap();

    execute(&handle, &Command::Toggle).unwrap();
    rx.wait_for(|s| !s.is_running).await.unwrap();

    let err = execute(&handle, &Command::SelectGame { game_id: 42 }).unwrap_err();
    assert!(matches!(err, ApiError::Clock(_)));
    assert!(err.to_string().contains("42"));

    // Неудачный выбор не трогает текущий профиль.
    let current: GameSpec = handle.current_game();
    assert_eq!(current.id, 2);
}
