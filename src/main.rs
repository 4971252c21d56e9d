// catalog-admin - terminal admin console for the shop catalog
//
// Browses and edits catalog entities (brands, categories, sizes, colors,
// managers, orders, products) through the shop's JSON backend.
//
// Architecture:
// - Table engine: editable table, add form, filter/sort/page state
// - Pages: one per resource, turns user actions into backend requests
// - API client (reqwest): JSON POST endpoints with a success envelope
// - TUI (ratatui): tabs, table, form, toasts; requests run on tokio tasks
//   and report back over an mpsc channel

mod api;
mod cli;
mod config;
mod headless;
mod i18n;
mod logging;
mod pages;
mod table;
mod theme;
mod tui;

use anyhow::{Context, Result};
use api::ApiClient;
use cli::Mode;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Config subcommands print and exit
    let Some(mode) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();
    let tui_mode = matches!(mode, Mode::Tui);

    // In TUI mode logs go to the in-memory buffer (shown in the log modal),
    // in list mode to stderr. Optional JSON file logging on top of either.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("catalog_admin={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, _file_guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                // The guard must outlive the program for logs to flush
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if tui_mode {
        registry.with(TuiLogLayer::new(log_buffer.clone())).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!(
        api_url = %config.api_url,
        resources = config.resources.len(),
        "catalog-admin {}",
        config::VERSION
    );

    let client = ApiClient::new(&config).context("Failed to build HTTP client")?;

    match mode {
        Mode::Tui => {
            tui::run_tui(config, client, log_buffer).await?;
            tracing::info!("Shutdown complete");
        }
        Mode::List(args) => headless::run_list(&config, &client, args).await?,
    }
    Ok(())
}
