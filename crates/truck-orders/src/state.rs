use crate::clients::OrderClient;
use crate::clock::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Which backend holds the collection, as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageInfo {
    pub backend: &'static str,
    pub configured: bool,
}

impl StorageInfo {
    pub fn new(backend: &'static str) -> Self {
        Self {
            backend,
            configured: backend != "unconfigured",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub clock: Arc<dyn Clock>,
    pub storage: StorageInfo,
    /// Hide error details from responses.
    pub production: bool,
}
