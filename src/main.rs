use context_path_selector::app::file_dialog::NativeDialogService;
use context_path_selector::app::{self, events::UserEvent, state::SelectionState};
use context_path_selector::config::AppConfig;
use context_path_selector::core::HttpPreviewService;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// How long runtime shutdown waits for leftover blocking work, such as a stdin read.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries protocol events only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    config.apply_env_overrides();

    let (dialog, dialog_thread) =
        NativeDialogService::channel(config.dialog_start_directory.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let session = runtime.spawn(run_session(config, Arc::new(dialog)));

    // Native pickers are shown here, on the main thread, until the session drops
    // its dialog handle.
    dialog_thread.run();

    let result = runtime.block_on(session);
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    result?
}

async fn run_session(config: AppConfig, dialog: Arc<NativeDialogService>) -> anyhow::Result<()> {
    let preview = Arc::new(HttpPreviewService::from_config(&config));
    tracing::info!("Previews are served by {}", config.preview_base_url);
    let state = Arc::new(Mutex::new(SelectionState::new(config)));

    let (proxy, mut event_rx) = mpsc::unbounded_channel::<UserEvent>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = event_rx.recv().await {
            let line = match serde_json::to_string(&event) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to serialize event {:?}: {}", event, e);
                    continue;
                }
            };
            if let Err(e) = write_line(&mut stdout, &line).await {
                tracing::error!("Failed to write event to stdout: {}", e);
                break;
            }
        }
    });

    tracing::info!("Selection session started, reading commands from stdin.");
    let mut pending = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(handle) = app::handle_ipc_message(
            line,
            dialog.clone(),
            preview.clone(),
            proxy.clone(),
            state.clone(),
        ) {
            pending.push(handle);
        }
        pending.retain(|handle| !handle.is_finished());
    }

    tracing::info!("Input closed, ending selection session.");
    if state.lock().map(|s| s.is_awaiting_dialog).unwrap_or(false) {
        tracing::info!("A file dialog is still open, exiting once it is closed.");
    }
    for handle in pending {
        handle.abort();
        let _ = handle.await;
    }
    drop(proxy);
    writer.await?;
    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
