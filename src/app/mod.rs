//! The selection session: state, command handlers, and IPC dispatch.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod view_model;

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::core::PreviewService;
use events::IpcMessage;
use file_dialog::DialogService;
use proxy::EventProxy;
use state::SelectionState;

/// Parses one IPC message and dispatches it to its command handler.
///
/// Synchronous commands run inline, so removals and clears apply in the order they
/// arrive. Commands that wait on a dialog or on the preview endpoint run on their own
/// task; its handle is returned so the caller can await or abort it.
pub fn handle_ipc_message<P, D, S>(
    message: &str,
    dialog: Arc<D>,
    preview: Arc<S>,
    proxy: P,
    state: Arc<Mutex<SelectionState>>,
) -> Option<JoinHandle<()>>
where
    P: EventProxy,
    D: DialogService + ?Sized + 'static,
    S: PreviewService + ?Sized + 'static,
{
    let msg: IpcMessage = match serde_json::from_str(message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message {:?}: {}", message, e);
            return None;
        }
    };
    tracing::debug!("IPC command received: {}", msg.command);

    match msg.command.as_str() {
        "initialize" => {
            commands::initialize(proxy, state);
            None
        }
        "addFiles" => Some(tokio::spawn(async move {
            commands::add_files(dialog.as_ref(), proxy, state).await;
        })),
        "addFolder" => Some(tokio::spawn(async move {
            commands::add_folder(dialog.as_ref(), proxy, state).await;
        })),
        "removePath" => {
            commands::remove_path(msg.payload, proxy, state);
            None
        }
        "clearSelection" => {
            commands::clear_selection(proxy, state);
            None
        }
        "requestPreview" => Some(tokio::spawn(async move {
            commands::request_preview(preview.as_ref(), msg.payload, proxy, state).await;
        })),
        unknown => {
            tracing::warn!("Unknown IPC command: {}", unknown);
            None
        }
    }
}
