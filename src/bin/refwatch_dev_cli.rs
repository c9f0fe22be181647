// src/bin/refwatch_dev_cli.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use refwatch_clock::api::{
    answer, execute, parse_input, ClockViewDto, GameOptionDto, Input, Query, QueryResponse,
};
use refwatch_clock::domain::{GameCatalog, GameId};
use refwatch_clock::infra::{init_logging, load_config, ClockConfig, GameSettingsStore, InMemoryGameStore};
use refwatch_clock::time_ctrl::{spawn_clock, ClockHandle, ClockRules, FeedbackEvent, SpawnedClock};

/// Сколько ждём публикации снимка после команды, прежде чем печатать статус.
const SETTLE_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Parser)]
#[command(name = "refwatch_dev_cli", about = "Dev-CLI часов судьи (команды читаются из stdin)")]
struct Args {
    /// Путь к TOML-конфигу.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Профиль игры при старте (важнее `default_game` из конфига).
    #[arg(long)]
    game: Option<GameId>,

    /// Печатать ответы как JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 1. Конфиг и логи
    let catalog = GameCatalog::standard();
    let config = match &args.config {
        Some(path) => load_config(path, &catalog)?,
        None => ClockConfig::default(),
    };
    init_logging(&config.log_filter);

    // 2. Хранилище профиля и рантайм часов
    let store = match args.game.or(config.default_game) {
        Some(id) => InMemoryGameStore::with_selected(catalog, id)?,
        None => InMemoryGameStore::with_catalog(catalog),
    };
    let store: Arc<dyn GameSettingsStore> = Arc::new(store);

    let SpawnedClock {
        handle,
        mut feedback,
        task,
    } = spawn_clock(store, ClockRules::from_config(&config));

    // 3. "Вибромотор": печатаем события обратной связи
    let haptics = tokio::spawn(async move {
        while let Some(event) = feedback.recv().await {
            println!("[HAPTIC] {}", describe_feedback(&event));
        }
    });

    // 4. Свисток: сообщаем, когда основное время вышло
    let mut updates = handle.subscribe();
    let whistle = tokio::spawn(async move {
        let mut was_finished = updates.borrow_and_update().is_finished;
        while updates.changed().await.is_ok() {
            let finished = updates.borrow_and_update().is_finished;
            if finished && !was_finished {
                println!("[CLI] Основное время вышло, идёт добавленное время.");
            }
            was_finished = finished;
        }
    });

    print_help();
    print_response(&answer(&handle, &Query::Status), args.json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Command(command)) => {
                let mut rx = handle.subscribe();
                rx.borrow_and_update();

                match execute(&handle, &command) {
                    Ok(()) => {
                        let _ = tokio::time::timeout(SETTLE_TIMEOUT, rx.changed()).await;
                        print_response(&answer(&handle, &Query::Status), args.json)?;
                    }
                    Err(err) => println!("[CLI] Ошибка: {err}"),
                }
            }
            Ok(Input::Query(query)) => print_response(&answer(&handle, &query), args.json)?,
            Err(err) => {
                println!("[CLI] {err}");
                print_help();
            }
        }
    }

    shutdown(&handle);
    task.await?;
    haptics.await?;
    whistle.await?;

    println!("[CLI] Завершение работы dev-CLI.");
    Ok(())
}

fn shutdown(handle: &ClockHandle) {
    if let Err(err) = handle.shutdown() {
        tracing::warn!(%err, "shutdown on stopped runtime");
    }
}

fn print_help() {
    println!();
    println!("================ REFWATCH DEV CLI =================");
    println!("  start | s         запустить часы");
    println!("  pause | p         пауза");
    println!("  toggle | t        старт/пауза одной кнопкой");
    println!("  reset | r         сброс тайма");
    println!("  switch            1. <-> 2. тайм (только на нуле)");
    println!("  select <id>       выбрать профиль игры");
    println!("  games             список профилей");
    println!("  status            текущее состояние");
    println!("  quit | q          выход");
    println!();
}

fn print_response(response: &QueryResponse, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    match response {
        QueryResponse::Clock(view) => print_clock(view),
        QueryResponse::Games(games) => print_games(games),
    }
    Ok(())
}

fn print_clock(view: &ClockViewDto) {
    let state = if view.is_additional_running {
        "ДОБ. ВРЕМЯ"
    } else if view.is_running {
        "ИДЁТ"
    } else if view.is_finished {
        "ТАЙМ ОКОНЧЕН"
    } else {
        "СТОП"
    };

    println!(
        "[{}] {} | {} | осталось {} | доп. {} | {}",
        view.game_description, view.half_label, view.play_clock, view.time_left, view.additional_time, state
    );

    if let Some(pending) = view.pending_game_id {
        println!("  профиль {pending} применится после сброса");
    }
}

fn print_games(games: &[GameOptionDto]) {
    for game in games {
        let marker = if game.selected { "*" } else { " " };
        println!(
            "{} {:>2}  {:<16} {} + {} мин",
            marker, game.id, game.description, game.first_half_minutes, game.second_half_minutes
        );
    }
}

fn describe_feedback(event: &FeedbackEvent) -> String {
    match event {
        FeedbackEvent::ShortPulse { duration_ms, amplitude } => {
            format!("short pulse {duration_ms}ms @ {amplitude}")
        }
        FeedbackEvent::LongPulse { duration_ms, amplitude } => {
            format!("long pulse {duration_ms}ms @ {amplitude}")
        }
    }
}
