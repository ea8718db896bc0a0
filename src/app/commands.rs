// src/app/commands.rs
//! Contains all the command handlers that are callable from the embedding application.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! Together they form the selection state machine: picking paths, removing them,
//! clearing the session, and loading previews. Handlers never fail; problems are
//! logged and surfaced as `UserEvent::ShowNotice`.

use serde::Deserialize;
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::file_dialog::DialogService;
use super::helpers::{lock_state, notify, with_state_and_notify, ResetOnDrop};
use super::proxy::EventProxy;
use super::state::SelectionState;
use crate::core::{CoreError, PreviewService};

/// Optional payload of `requestPreview`.
#[derive(Deserialize, Debug, Default)]
struct PreviewPayload {
    #[serde(default)]
    question: Option<String>,
}

/// Handles the initial request for state from the embedding application.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<SelectionState>>) {
    let state_guard = lock_state(&state);
    notify(&state_guard, &proxy, &state_guard.selected_paths);
}

/// Opens the multi-file picker and merges the picked files into the selection.
pub async fn add_files<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<SelectionState>>,
) {
    let Some(dialog_open) = begin_dialog(&proxy, &state) else {
        return;
    };
    let result = dialog.pick_files().await;
    finish_dialog(
        &proxy,
        &state,
        dialog_open,
        "file",
        result,
        SelectionState::merge_paths,
    );
}

/// Opens the folder picker and adds the picked folder to the selection.
pub async fn add_folder<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<SelectionState>>,
) {
    let Some(dialog_open) = begin_dialog(&proxy, &state) else {
        return;
    };
    let result = dialog.pick_folder().await;
    finish_dialog(
        &proxy,
        &state,
        dialog_open,
        "folder",
        result,
        SelectionState::add_path,
    );
}

/// Marks a picker as open. Returns `None` if one already is.
fn begin_dialog<P: EventProxy>(
    proxy: &P,
    state: &Arc<Mutex<SelectionState>>,
) -> Option<ResetOnDrop> {
    let mut state_guard = lock_state(state);
    if state_guard.is_awaiting_dialog {
        tracing::debug!("A dialog is already open, ignoring request.");
        return None;
    }
    state_guard.is_awaiting_dialog = true;
    notify(&state_guard, proxy, &state_guard.selected_paths);
    Some(ResetOnDrop::new(state, |s| s.is_awaiting_dialog = false))
}

/// Applies a resolved dialog result against the selection as it is now.
fn finish_dialog<P: EventProxy, T>(
    proxy: &P,
    state: &Arc<Mutex<SelectionState>>,
    mut dialog_open: ResetOnDrop,
    kind: &str,
    result: Result<Option<T>, CoreError>,
    apply: fn(&mut SelectionState, T) -> bool,
) {
    let notice = with_state_and_notify(state, proxy, |s| {
        s.is_awaiting_dialog = false;
        dialog_open.disarm();
        match result {
            Ok(Some(picked)) => {
                if apply(s, picked) {
                    tracing::info!(
                        "Selection updated from {} dialog, {} path(s) selected.",
                        kind,
                        s.selected_paths.len()
                    );
                } else {
                    tracing::info!("Picked {} path(s) were already selected.", kind);
                }
                None
            }
            Ok(None) => {
                tracing::info!("User cancelled {} selection.", kind);
                None
            }
            Err(e) => {
                tracing::warn!("The {} dialog failed: {}", kind, e);
                Some(format!("Could not open the {} dialog: {}", kind, e))
            }
        }
    });

    if let Some(message) = notice {
        proxy.send_event(UserEvent::ShowNotice(message));
    }
}

/// Removes a single path, and its preview, from the selection.
pub fn remove_path<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SelectionState>>,
) {
    let Ok(target) = serde_json::from_value::<String>(payload.clone()) else {
        tracing::warn!("Failed to deserialize path from payload: {:?}", payload);
        return;
    };

    with_state_and_notify(&state, &proxy, |s| {
        if s.remove_path(&target) {
            tracing::info!("Removed {} from selection.", target);
        } else {
            tracing::debug!("{} was not selected, nothing to remove.", target);
        }
    });
}

/// Clears the selection and all previews.
pub fn clear_selection<P: EventProxy>(proxy: P, state: Arc<Mutex<SelectionState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.clear();
        tracing::info!("Selection cleared.");
    });
}

/// Loads previews for every selected path in a single request.
///
/// Does nothing when the selection is empty or a preview request is already in
/// flight. On success the previews are replaced by the result, minus paths removed
/// while the request was running. On failure the previous previews stay as they were.
pub async fn request_preview<P: EventProxy, S: PreviewService + ?Sized>(
    service: &S,
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<SelectionState>>,
) {
    let question_override = if payload.is_null() {
        None
    } else {
        match serde_json::from_value::<PreviewPayload>(payload.clone()) {
            Ok(p) => p.question,
            Err(_) => {
                tracing::warn!("Failed to deserialize preview payload: {:?}", payload);
                return;
            }
        }
    };

    let (epoch, paths, question, mut loading) = {
        let mut state_guard = lock_state(&state);
        if state_guard.selected_paths.is_empty() {
            tracing::debug!("Preview requested with an empty selection, ignoring.");
            return;
        }
        if state_guard.is_loading_preview {
            tracing::debug!("A preview request is already in flight, ignoring.");
            return;
        }
        state_guard.is_loading_preview = true;
        notify(&state_guard, &proxy, &state_guard.selected_paths);

        let question =
            question_override.unwrap_or_else(|| state_guard.config.default_question.clone());
        (
            state_guard.session_epoch,
            state_guard.selected_paths.clone(),
            question,
            ResetOnDrop::new(&state, |s| s.is_loading_preview = false),
        )
    };

    let result = service.fetch_previews(&question, &paths).await;

    let notice = with_state_and_notify(&state, &proxy, |s| {
        s.is_loading_preview = false;
        loading.disarm();
        match result {
            Ok(entries) => {
                match s.apply_previews(epoch, entries) {
                    Some(kept) => tracing::info!("Loaded {} preview(s).", kept),
                    None => tracing::info!("Selection was cleared meanwhile, discarding previews."),
                }
                None
            }
            Err(e) => {
                tracing::warn!("Preview request failed: {}", e);
                Some(format!("Could not load previews: {}", e))
            }
        }
    });

    if let Some(message) = notice {
        proxy.send_event(UserEvent::ShowNotice(message));
    }
}
