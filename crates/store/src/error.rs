/// All errors that can be returned by a RulesStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No rules record exists for the given supplier. Propagated verbatim
    /// to callers -- never silently defaulted to "unconstrained" rules.
    #[error("no delivery rules for supplier: {supplier_id}")]
    NotFound { supplier_id: String },

    /// A backend-specific storage error (DB connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
