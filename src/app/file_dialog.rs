//! An abstraction layer for native file dialogs to enable testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};

use crate::core::CoreError;

/// Defines a common interface for the context file and folder pickers.
///
/// `Ok(None)` means the user cancelled, which is a normal outcome. `Err` is reserved
/// for the platform call itself failing. A mock implementation is used in tests to
/// avoid interacting with actual OS dialog windows.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select one or more files.
    async fn pick_files(&self) -> Result<Option<Vec<String>>, CoreError>;

    /// Opens a dialog to select a single folder.
    async fn pick_folder(&self) -> Result<Option<String>, CoreError>;
}

/// A picker request handed to the dialog thread, with the channel for its answer.
enum DialogRequest {
    Files(oneshot::Sender<Option<Vec<PathBuf>>>),
    Folder(oneshot::Sender<Option<PathBuf>>),
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
///
/// The dialogs themselves are shown by a [`DialogThread`] on the main thread. This
/// handle only forwards requests to it and awaits the answer, so the session keeps
/// processing removals and previews while a picker is open.
#[derive(Debug, Clone)]
pub struct NativeDialogService {
    requests: mpsc::UnboundedSender<DialogRequest>,
}

/// Serves the picker requests of every [`NativeDialogService`] created with it.
pub struct DialogThread {
    requests: mpsc::UnboundedReceiver<DialogRequest>,
    start_directory: Option<PathBuf>,
}

impl NativeDialogService {
    /// Creates the service together with the thread side that shows its dialogs.
    pub fn channel(start_directory: Option<PathBuf>) -> (Self, DialogThread) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { requests: tx },
            DialogThread {
                requests: rx,
                start_directory,
            },
        )
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> DialogRequest,
    ) -> Result<T, CoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requests
            .send(make(reply_tx))
            .map_err(|_| CoreError::Dialog("the dialog thread is not running".to_string()))?;
        reply_rx
            .await
            .map_err(|_| CoreError::Dialog("the dialog closed without an answer".to_string()))
    }
}

impl DialogThread {
    /// Shows requested pickers until every `NativeDialogService` handle is dropped.
    ///
    /// Must be called on the main thread, outside the tokio runtime. macOS only
    /// allows native dialogs there, and the call blocks between requests.
    pub fn run(self) {
        self.serve(show_native);
    }

    fn serve(mut self, mut show: impl FnMut(DialogRequest, Option<&Path>)) {
        tracing::debug!("Dialog thread started.");
        while let Some(request) = self.requests.blocking_recv() {
            show(request, self.start_directory.as_deref());
        }
        tracing::debug!("All dialog handles dropped, dialog thread stopping.");
    }
}

fn show_native(request: DialogRequest, start_directory: Option<&Path>) {
    // A failed send means the requesting task was aborted while the picker was open.
    let delivered = match request {
        DialogRequest::Files(reply) => reply
            .send(build_dialog("Select context files", start_directory).pick_files())
            .is_ok(),
        DialogRequest::Folder(reply) => reply
            .send(build_dialog("Select context folder", start_directory).pick_folder())
            .is_ok(),
    };
    if !delivered {
        tracing::debug!("Dialog answer arrived after its request was dropped.");
    }
}

fn build_dialog(title: &str, start_directory: Option<&Path>) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    match start_directory {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[async_trait]
impl DialogService for NativeDialogService {
    async fn pick_files(&self) -> Result<Option<Vec<String>>, CoreError> {
        let picked = self.request(DialogRequest::Files).await?;
        Ok(picked.map(|paths| paths.iter().map(|p| path_to_string(p)).collect()))
    }

    async fn pick_folder(&self) -> Result<Option<String>, CoreError> {
        let picked = self.request(DialogRequest::Folder).await?;
        Ok(picked.as_deref().map(path_to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVING_THREAD: &str = "dialog-thread";

    /// Serves requests on a named thread, answering like a user would.
    fn spawn_serving(thread: DialogThread) -> std::thread::JoinHandle<Vec<String>> {
        std::thread::Builder::new()
            .name(SERVING_THREAD.to_string())
            .spawn(move || {
                let mut shown_on = Vec::new();
                thread.serve(|request, start| {
                    shown_on.push(std::thread::current().name().unwrap().to_string());
                    match request {
                        DialogRequest::Files(reply) => {
                            let base = start.unwrap_or(Path::new("/proj"));
                            let _ = reply.send(Some(vec![base.join("a.txt"), base.join("b.txt")]));
                        }
                        DialogRequest::Folder(reply) => {
                            let _ = reply.send(None);
                        }
                    }
                });
                shown_on
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_pickers_are_shown_on_the_serving_thread() {
        let (service, thread) = NativeDialogService::channel(Some(PathBuf::from("/work")));
        let serving = spawn_serving(thread);

        let files = service.pick_files().await.unwrap();
        assert_eq!(
            files,
            Some(vec!["/work/a.txt".to_string(), "/work/b.txt".to_string()])
        );
        assert_eq!(service.pick_folder().await.unwrap(), None);

        // Dropping the last handle lets the serving loop return.
        drop(service);
        let shown_on = serving.join().unwrap();
        assert_eq!(shown_on, vec![SERVING_THREAD, SERVING_THREAD]);
    }

    #[tokio::test]
    async fn test_pick_fails_when_dialog_thread_is_gone() {
        let (service, thread) = NativeDialogService::channel(None);
        drop(thread);

        let err = service.pick_files().await.unwrap_err();
        assert!(err.is_dialog_failure());
        assert!(err.to_string().contains("not running"));
    }

    #[tokio::test]
    async fn test_pick_fails_when_request_is_dropped_unanswered() {
        let (service, thread) = NativeDialogService::channel(None);
        let serving = std::thread::spawn(move || thread.serve(|request, _| drop(request)));

        let err = service.pick_folder().await.unwrap_err();
        assert!(matches!(err, CoreError::Dialog(_)));

        drop(service);
        serving.join().unwrap();
    }
}
