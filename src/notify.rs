// User-visible notifications.
// Toasts are raised through a sink so background work never touches the UI directly.

use std::time::{Duration, Instant};

/// How long a finished toast stays in the status line.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// Work in progress.
    Animated,
    Success,
    Failure,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

impl Toast {
    pub fn animated(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Animated,
            title: title.into(),
            message: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: None,
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Toast currently shown by the host, with its display deadline.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub toast: Toast,
    shown_at: Instant,
}

impl ActiveToast {
    pub fn new(toast: Toast) -> Self {
        Self {
            toast,
            shown_at: Instant::now(),
        }
    }

    /// Animated toasts stay until replaced; others expire after [`TOAST_TTL`].
    pub fn is_expired(&self) -> bool {
        self.toast.style != ToastStyle::Animated && self.shown_at.elapsed() >= TOAST_TTL
    }
}

/// Capability for raising notifications.
pub trait NotificationSink: Send + Sync + 'static {
    fn notify(&self, toast: Toast);
}

#[cfg(test)]
pub use recording::RecordingSink;
