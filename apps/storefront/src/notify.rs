//! # Notifications
//!
//! User-visible error surface for cart operations. Operations never return
//! their outcome; a failure is visible only as a toast handed to the
//! [`Notifier`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Failure                          Toast                                 │
//! │  ───────                          ─────                                 │
//! │  add: stock exceeded          ──► "Requested quantity out of stock"     │
//! │  add: anything else           ──► "Error adding product"                │
//! │  remove: anything             ──► "Error removing product"              │
//! │  update: stock exceeded       ──► "Requested quantity out of stock"     │
//! │  update: anything else        ──► "Error changing product quantity"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

pub const OUT_OF_STOCK: &str = "Requested quantity out of stock";
pub const ADD_FAILED: &str = "Error adding product";
pub const REMOVE_FAILED: &str = "Error removing product";
pub const UPDATE_FAILED: &str = "Error changing product quantity";

/// A transient user-facing error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Toast {
    /// Creates a toast stamped with the current time.
    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Surfaces toasts to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        warn!(toast = %toast.message, "Toast raised");
    }
}

/// Keeps toasts until taken. The CLI drains it after each command.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
    forward: Option<Arc<dyn Notifier>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records toasts and also hands each one to `inner`.
    pub fn forwarding(inner: Arc<dyn Notifier>) -> Self {
        RecordingNotifier {
            toasts: Mutex::default(),
            forward: Some(inner),
        }
    }

    /// Messages raised so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|t| t.message.clone()).collect()
    }

    /// Removes and returns every recorded toast.
    pub fn take(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Some(inner) = &self.forward {
            inner.notify(toast.clone());
        }
        self.lock().push(toast);
    }
}
