use std::sync::Arc;

use crate::config::HubConfig;
use crate::db::pool::{open_ro_pool, DbPool};
use crate::error::HubError;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: HubConfig,
    pub pool: DbPool,
}

impl AppState {
    /// Open the trade store and build shared state.
    ///
    /// A store that cannot be opened is fatal: the caller surfaces the
    /// error and exits rather than serving a dashboard with no data source.
    pub fn new(config: HubConfig) -> Result<Arc<Self>, HubError> {
        let pool = open_ro_pool(&config.trades_db, 4)?;
        Ok(Arc::new(Self { config, pool }))
    }
}
