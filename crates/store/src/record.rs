use commis_core::RulesDoc;
use serde::{Deserialize, Serialize};

/// A supplier's stored delivery-rules record.
///
/// The rules are kept in boundary document form; validation happens on
/// every write, before a record is constructed, and again as the parse
/// step when a reader needs the typed rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierRecord {
    pub supplier_id: String,
    pub rules: RulesDoc,
    /// ISO 8601 / RFC 3339 timestamp string of the last write.
    pub updated_at: String,
}

impl SupplierRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn new(supplier_id: impl Into<String>, rules: RulesDoc) -> Self {
        SupplierRecord {
            supplier_id: supplier_id.into(),
            rules,
            updated_at: now_rfc3339(),
        }
    }
}

/// Current UTC instant as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
