//! commis-store: the Rules Store boundary.
//!
//! Defines the async [`RulesStore`] trait consumed by the resolution
//! workflow (`fetch(supplier_id) -> SupplierRecord | NotFound`), the
//! stored record type, and an in-memory backend.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{now_rfc3339, SupplierRecord};
pub use traits::RulesStore;
