//! Yes/Cancel confirmation dialog resolved through a future.
//!
//! Opening a dialog hands back a [`Decision`] that resolves once the user
//! answers. Closing the dialog without answering resolves to `false`.
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Modal state for a pending confirmation.
#[derive(Debug)]
pub struct ConfirmDialog {
    pub title: String,
    pub prompt: String,
    pub confirm_label: String,
    /// 0 = confirm, 1 = cancel. Starts on cancel.
    pub selected: usize,
    reply: Option<oneshot::Sender<bool>>,
}

impl ConfirmDialog {
    pub fn open(title: impl Into<String>, prompt: impl Into<String>) -> (Self, Decision) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            title: title.into(),
            prompt: prompt.into(),
            confirm_label: "Yes, delete".to_string(),
            selected: 1,
            reply: Some(tx),
        };
        (dialog, Decision { rx })
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % 2;
    }

    pub fn resolve_selected(&mut self) {
        let yes = self.selected == 0;
        self.resolve(yes);
    }

    /// Send the answer. Later calls are no-ops.
    pub fn resolve(&mut self, yes: bool) {
        if let Some(tx) = self.reply.take() {
            // Receiver may already be gone if the flow was abandoned.
            let _ = tx.send(yes);
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.reply.is_none()
    }
}

/// The user's answer to a [`ConfirmDialog`].
#[derive(Debug)]
pub struct Decision {
    rx: oneshot::Receiver<bool>,
}

impl Future for Decision {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn selected_confirm_resolves_true() {
        let (mut dialog, decision) = ConfirmDialog::open("Confirm delete", "Delete?");
        dialog.select_next();
        dialog.resolve_selected();
        assert!(dialog.is_resolved());
        assert!(decision.await);
    }

    #[tokio::test]
    async fn default_selection_is_cancel() {
        let (mut dialog, decision) = ConfirmDialog::open("Confirm delete", "Delete?");
        dialog.resolve_selected();
        assert!(!decision.await);
    }

    #[tokio::test]
    async fn dropped_dialog_resolves_false() {
        let (dialog, decision) = ConfirmDialog::open("Confirm delete", "Delete?");
        drop(dialog);
        assert!(!decision.await);
    }
}
