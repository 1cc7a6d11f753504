use async_trait::async_trait;

use crate::domain::{DomainError, LogRow};

/// Append-only destination for generated listings.
///
/// Rows are only ever added; no update or delete path exists. A failure here
/// must never block generation or display — callers downgrade it to a
/// warning.
#[async_trait]
pub trait ListingLog: Send + Sync {
    async fn append(&self, row: &LogRow) -> Result<(), DomainError>;
}
