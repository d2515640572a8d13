//! Shared gateway state.

use std::sync::Arc;

use claimline_db::DbPool;

use crate::providers::Provider;

/// State shared across request handlers
pub struct AppState {
    pub db: DbPool,
    pub provider: Arc<dyn Provider>,
}

impl AppState {
    pub fn new(db: DbPool, provider: Arc<dyn Provider>) -> Self {
        Self { db, provider }
    }
}
