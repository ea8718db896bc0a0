//! Defines the event and message structures exchanged with the embedding application.

use serde::{Deserialize, Serialize};

use super::view_model::SelectionView;

/// Events sent from the selection session to the embedding application.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum UserEvent {
    /// A complete view update to re-render the selection.
    StateUpdate(Box<SelectionView>),
    /// The full list of selected paths, sent whenever that list changes.
    SelectionChanged(Vec<String>),
    /// A transient, non-fatal notice to show to the user.
    ShowNotice(String),
}

/// A message received from the embedding application.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
