use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::SupplierRecord;

/// The storage trait for delivery-rules backends.
///
/// A `RulesStore` implementation holds one rules record per supplier.
///
/// ## Write Semantics
///
/// Concurrent edits to one supplier's rules use last-write-wins:
/// resolution never depends on a record remaining unchanged across
/// calls, and no cross-supplier coordination is required, so `upsert`
/// simply replaces whatever is stored.
///
/// Callers are expected to validate a rules document
/// (`RulesDoc::validate`) before upserting; the store itself does not
/// re-validate.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait RulesStore: Send + Sync + 'static {
    /// Fetch the rules record for a supplier.
    ///
    /// Returns `Err(StoreError::NotFound)` when no record exists; callers
    /// must surface that, never substitute default rules.
    async fn fetch(&self, supplier_id: &str) -> Result<SupplierRecord, StoreError>;

    /// Insert or replace a supplier's record (last-write-wins).
    async fn upsert(&self, record: SupplierRecord) -> Result<(), StoreError>;

    /// Remove a supplier's record.
    ///
    /// Returns `Err(StoreError::NotFound)` when no record exists.
    async fn remove(&self, supplier_id: &str) -> Result<(), StoreError>;

    /// All stored records, ordered by supplier id.
    async fn list(&self) -> Result<Vec<SupplierRecord>, StoreError>;
}
