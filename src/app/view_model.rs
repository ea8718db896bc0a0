//! Responsible for transforming the `SelectionState` into a `SelectionView` view model.
//!
//! This module acts as a presentation layer, preparing data specifically for
//! consumption by the embedding application.

use serde::Serialize;
use std::collections::HashSet;

use super::state::SelectionState;
use crate::core::{display_name, PreviewEntry};

/// A serializable representation of the selection session for the UI.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SelectionView {
    pub selected_paths: Vec<SelectedPath>,
    pub previews: Vec<PreviewEntry>,
    pub selected_count: usize,
    pub total_preview_length: u64,
    pub is_awaiting_dialog: bool,
    pub is_loading_preview: bool,
}

/// A single selected path as shown in the list.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SelectedPath {
    pub path: String,
    pub display_name: String,
    pub has_preview: bool,
}

/// Creates the complete `SelectionView` from the current `SelectionState`.
pub fn generate_view(state: &SelectionState) -> SelectionView {
    let previewed: HashSet<&str> = state.previews.iter().map(|e| e.path.as_str()).collect();

    let selected_paths = state
        .selected_paths
        .iter()
        .map(|path| SelectedPath {
            path: path.clone(),
            display_name: display_name(path).to_string(),
            has_preview: previewed.contains(path.as_str()),
        })
        .collect();

    SelectionView {
        selected_paths,
        previews: state.previews.clone(),
        selected_count: state.selected_paths.len(),
        total_preview_length: state.previews.iter().map(|e| e.text_length).sum(),
        is_awaiting_dialog: state.is_awaiting_dialog,
        is_loading_preview: state.is_loading_preview,
    }
}
