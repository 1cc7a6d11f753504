use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ListingLog;
use crate::domain::{DomainError, LogRow};

/// In-memory [`ListingLog`] for tests and the `--memory-log` flag.
///
/// Preserves append order; rows live only as long as the process.
pub struct InMemoryListingLog {
    rows: Mutex<Vec<LogRow>>,
    fail: bool,
}

impl InMemoryListingLog {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A log whose every append fails, for exercising the soft-warning path.
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn rows(&self) -> Vec<LogRow> {
        self.rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryListingLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingLog for InMemoryListingLog {
    async fn append(&self, row: &LogRow) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::log(
                "InMemoryListingLog: simulated append failure",
            ));
        }
        self.rows
            .lock()
            .map_err(|_| DomainError::internal("listing log mutex poisoned"))?
            .push(row.clone());
        Ok(())
    }
}
