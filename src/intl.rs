//! Label provider for paginator hosts.
//!
//! Hosts render controls with these labels and re-render when they change.
//! The pagination state only forwards the change notification; it never
//! reads the labels itself.

use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Text shown on paginator controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlLabels {
    pub items_per_page: String,
    pub next_page: String,
    pub previous_page: String,
    pub first_page: String,
    pub last_page: String,
}

impl Default for IntlLabels {
    fn default() -> Self {
        Self {
            items_per_page: "Items per page:".to_string(),
            next_page: "Next page".to_string(),
            previous_page: "Previous page".to_string(),
            first_page: "First page".to_string(),
            last_page: "Last page".to_string(),
        }
    }
}

/// Shared label collaborator with a change stream.
#[derive(Debug)]
pub struct PaginatorIntl {
    labels: RwLock<IntlLabels>,
    changes: broadcast::Sender<()>,
}

/// Registration on the label change stream.
///
/// Dropping the handle releases the registration.
#[derive(Debug)]
pub struct IntlSubscription {
    receiver: broadcast::Receiver<()>,
}

impl PaginatorIntl {
    pub fn new() -> Self {
        Self::with_labels(IntlLabels::default())
    }

    pub fn with_labels(labels: IntlLabels) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            labels: RwLock::new(labels),
            changes,
        }
    }

    /// Convenience for the common shared-ownership setup.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of the current labels.
    pub fn labels(&self) -> IntlLabels {
        match self.labels.read() {
            Ok(labels) => labels.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Mutate the labels and notify every subscriber.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut IntlLabels),
    {
        {
            let mut labels = match self.labels.write() {
                Ok(labels) => labels,
                Err(poisoned) => poisoned.into_inner(),
            };
            f(&mut labels);
        }
        self.notify_changed();
    }

    /// Announce a label change without mutating anything here.
    pub fn notify_changed(&self) {
        // No receivers is fine: nobody is rendering yet.
        let delivered = self.changes.send(()).unwrap_or(0);
        debug!("Label change broadcast to {} subscriber(s)", delivered);
    }

    pub fn subscribe(&self) -> IntlSubscription {
        IntlSubscription {
            receiver: self.changes.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    /// Describe the visible range, e.g. `"11 – 20 of 95"`.
    pub fn range_label(&self, page: usize, page_size: usize, length: usize) -> String {
        if length == 0 || page_size == 0 {
            return format!("0 of {}", length);
        }

        let start_index = page.saturating_mul(page_size);
        // A page past the end still reports a full page width.
        let end_index = if start_index < length {
            start_index.saturating_add(page_size).min(length)
        } else {
            start_index.saturating_add(page_size)
        };

        format!("{} – {} of {}", start_index.saturating_add(1), end_index, length)
    }
}

impl Default for PaginatorIntl {
    fn default() -> Self {
        Self::new()
    }
}

impl IntlSubscription {
    /// Drain pending notifications; returns how many changes were seen.
    ///
    /// A lagged receiver still counts as a change so the host re-renders.
    pub fn drain(&mut self) -> usize {
        let mut seen = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(()) => seen += 1,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    seen += skipped as usize;
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        seen
    }
}
