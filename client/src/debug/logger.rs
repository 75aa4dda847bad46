//! Logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{LogConfig, DEFAULT_FILTER, LOG_FILE_NAME};

/// Initialize the logging system
///
/// Always logs to stderr. When `TOKENTALK_LOG_DIR` is set, also writes
/// daily-rotated logs there through a non-blocking writer; the returned guard
/// flushes that writer on drop.
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn init() -> Option<WorkerGuard> {
    let config = LogConfig::from_env();

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = match config.log_dir.as_ref() {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false); // No ANSI codes in log files
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory: {}", e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            log_level = %config.log_level,
            log_file = ?config.log_file(),
            "Logging initialized"
        );
        setup_panic_hook();
    }

    guard
}

/// Route panics through tracing so they land in the log file too
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");
        default_panic(panic_info);
    }));
}
