//! Shared application state

use pasar_core::Config;
use pasar_storage::DiskStore;

/// State shared by all handlers. Cheap to clone; the store is internally
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: DiskStore,
}

impl AppState {
    pub fn new(config: Config, store: DiskStore) -> Self {
        Self { config, store }
    }
}
