//! Notification channel
//!
//! Producers hold a cloneable [`Notifier`]; the application owns the single
//! [`NoticeBoard`] receiving end and decides how long to show each notice.

use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Sending half of the notification channel
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    /// Returns `false` once the board has been dropped
    pub fn push(&self, notice: Notice) -> bool {
        tracing::debug!(kind = ?notice.kind, message = %notice.message, "notice");
        self.tx.send(notice).is_ok()
    }

    pub fn success(&self, message: impl Into<String>) -> bool {
        self.push(Notice::success(message))
    }

    pub fn error(&self, message: impl Into<String>) -> bool {
        self.push(Notice::error(message))
    }
}

/// Receiving half of the notification channel
#[derive(Debug)]
pub struct NoticeBoard {
    rx: mpsc::UnboundedReceiver<Notice>,
}

impl NoticeBoard {
    pub fn channel() -> (Notifier, NoticeBoard) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Notifier { tx }, NoticeBoard { rx })
    }

    /// Wait for the next notice; `None` once every notifier is gone
    pub async fn recv(&mut self) -> Option<Notice> {
        self.rx.recv().await
    }

    /// Take whatever is queued without waiting
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            notices.push(notice);
        }
        notices
    }
}
