//! Defines the central, mutable state of a selection session.

use crate::config::AppConfig;
use crate::core::{path_set, PreviewEntry};

/// Holds the complete, mutable state of one selection session.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so command handlers and the
/// tasks awaiting dialogs or previews can share it. The lock is never held across
/// a suspension point, so every mutation runs to completion on its own.
#[derive(Debug, Default)]
pub struct SelectionState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// The ordered, deduplicated list of selected context paths.
    pub selected_paths: Vec<String>,
    /// The previews from the latest successful retrieval, reconciled against `selected_paths`.
    pub previews: Vec<PreviewEntry>,
    /// `true` while a native picker is open.
    pub is_awaiting_dialog: bool,
    /// `true` while a preview request is in flight.
    pub is_loading_preview: bool,
    /// Incremented on every clear. Preview results issued in an older epoch are discarded.
    pub session_epoch: u64,
}

impl SelectionState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Merges paths picked in a file dialog. Returns `true` if the selection changed.
    pub fn merge_paths(&mut self, incoming: Vec<String>) -> bool {
        let merged = path_set::add_many(&self.selected_paths, incoming);
        self.replace_paths(merged)
    }

    /// Adds a single picked folder. Returns `true` if the selection changed.
    pub fn add_path(&mut self, candidate: String) -> bool {
        let merged = path_set::add_one(&self.selected_paths, candidate);
        self.replace_paths(merged)
    }

    /// Removes a path together with its preview. Returns `true` if the selection changed.
    pub fn remove_path(&mut self, target: &str) -> bool {
        let remaining = path_set::remove(&self.selected_paths, target);
        self.previews.retain(|entry| entry.path != target);
        self.replace_paths(remaining)
    }

    /// Empties both the selection and the previews and starts a new epoch.
    pub fn clear(&mut self) {
        self.selected_paths = path_set::clear();
        self.previews.clear();
        self.session_epoch += 1;
    }

    /// Installs the result of a preview retrieval issued in `epoch`.
    ///
    /// The batch replaces the previous previews wholesale, minus entries whose path
    /// is no longer selected. A batch from an older epoch is dropped entirely.
    /// Returns the number of entries kept, or `None` if the batch was stale.
    pub fn apply_previews(&mut self, epoch: u64, entries: Vec<PreviewEntry>) -> Option<usize> {
        if epoch != self.session_epoch {
            return None;
        }
        let selected = &self.selected_paths;
        self.previews = entries
            .into_iter()
            .filter(|entry| selected.contains(&entry.path))
            .collect();
        Some(self.previews.len())
    }

    fn replace_paths(&mut self, paths: Vec<String>) -> bool {
        if paths == self.selected_paths {
            return false;
        }
        self.selected_paths = paths;
        true
    }
}
