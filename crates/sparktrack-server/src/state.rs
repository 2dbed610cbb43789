use std::sync::Arc;
use std::time::Duration;

use sparktrack_storage::store::Store;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub jwt_secret: Arc<[u8]>,
    pub token_ttl: Duration,
}

impl AppState {
    pub fn new(store: Store, jwt_secret: &str, token_ttl: Duration) -> Self {
        Self {
            store: Arc::new(store),
            jwt_secret: Arc::from(jwt_secret.as_bytes()),
            token_ttl,
        }
    }
}
