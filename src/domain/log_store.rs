//! Append-only status log shared by the connector and the HTTP layer.
//!
//! [`LogStore`] keeps every status line the probe emits, in order, for the
//! lifetime of the process. There is no rotation and no size bound.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered, mutex-guarded record of status strings.
///
/// Writers call [`LogStore::append`]; the `/logs` handler reads the whole
/// buffer with [`LogStore::render`]. Both take the same lock, so a read
/// always sees a prefix of the append order.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Mutex<Vec<String>>,
}

impl LogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a status line and echoes it through `tracing`.
    pub fn append(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "mssql_probe::status", "{message}");
        self.lock().push(message);
    }

    /// Returns a copy of all entries in append order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Renders all entries as text, one per line, each newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        let entries = self.lock();
        let capacity = entries.iter().map(|e| e.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for entry in entries.iter() {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A writer that panicked mid-push leaves a valid Vec behind.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
