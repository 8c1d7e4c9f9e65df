//! Toast notifications raised by form submissions.
//!
//! A [`Toaster`] is created per rendered page. Controllers get a cloneable
//! [`ToastHandle`]; the page drains the toaster when it renders.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPosition {
    #[default]
    BottomCenter,
}

impl ToastPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomCenter => "bottom-center",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Provider message shown under an error toast.
    pub detail: Option<String>,
    pub position: ToastPosition,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            detail: None,
            position: ToastPosition::BottomCenter,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            detail: (!detail.trim().is_empty()).then_some(detail),
            position: ToastPosition::BottomCenter,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToastHandle {
    tx: UnboundedSender<Toast>,
}

impl ToastHandle {
    pub fn push(&self, toast: Toast) {
        // The toaster only goes away once its page has rendered.
        let _ = self.tx.send(toast);
    }
}

#[derive(Debug)]
pub struct Toaster {
    tx: UnboundedSender<Toast>,
    rx: UnboundedReceiver<Toast>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    #[must_use]
    pub fn handle(&self) -> ToastHandle {
        ToastHandle {
            tx: self.tx.clone(),
        }
    }

    /// Take every toast raised so far, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        let mut toasts = Vec::new();
        while let Ok(toast) = self.rx.try_recv() {
            toasts.push(toast);
        }
        toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_toasts_in_order() {
        let mut toaster = Toaster::new();
        let handle = toaster.handle();
        handle.push(Toast::success("first"));
        handle.push(Toast::error("second", "because"));

        let toasts = toaster.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, "first");
        assert_eq!(toasts[1].detail.as_deref(), Some("because"));
        assert!(toaster.drain().is_empty());
    }

    #[test]
    fn blank_error_detail_is_dropped() {
        let toast = Toast::error("Could not Sign In", "  ");
        assert_eq!(toast.detail, None);
        assert_eq!(toast.position.as_str(), "bottom-center");
    }
}
