// Draft explorer entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Ensure config files exist, then load config
// 3. Build the stats client and the LLM client
// 4. Create mpsc channels
// 5. Spawn the app logic task (fetches the latest season on startup)
// 6. Run the TUI event loop until the user quits
// 7. Cleanup on exit

use draft_explorer::app;
use draft_explorer::config;
use draft_explorer::llm;
use draft_explorer::stats;
use draft_explorer::tui;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Draft explorer starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: seasons {}..={}, model {}",
        config.seasons.earliest, config.seasons.latest, config.llm.model
    );

    // 3. Build clients
    let stats_client =
        stats::StatsClient::new(&config).context("failed to build stats client")?;

    let llm_client = llm::client::LlmClient::from_config(&config);
    match &llm_client {
        llm::client::LlmClient::Active(_) => info!("LLM client initialized (API key configured)"),
        llm::client::LlmClient::Disabled => info!("LLM client disabled (no API key)"),
    }

    // 4. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (summary_tx, summary_rx) = mpsc::channel(256);

    let view_state = tui::ViewState::new(&config);

    let app_state = app::AppState::new(
        config,
        Arc::new(stats_client),
        llm_client,
        summary_tx,
    );

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, summary_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI event loop (blocking until user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Draft explorer shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draft-explorer.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draft_explorer=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
