//! Application state shared across request handlers.

use commis_store::MemoryStore;

pub(crate) struct AppState {
    /// The rules store backing the API.
    pub(crate) store: MemoryStore,
}
