// src/infra/logging.rs

use tracing_subscriber::filter::EnvFilter;

/// Переменная окружения: путь к лог-файлу (дописываем в конец).
pub const LOG_PATH_ENV: &str = "REFWATCH_LOG_PATH";

/// Инициализация `tracing`: `RUST_LOG` важнее `default_filter`.
/// Если задан `REFWATCH_LOG_PATH` - пишем в файл, иначе в stderr
/// (stdout занят выводом CLI).
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(path) = std::env::var(LOG_PATH_ENV) {
        if let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .try_init();
            return;
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
