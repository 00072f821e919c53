use sqlx::PgPool;

use crate::config::Config;

/// Shared application state, injected into all route handlers via Axum
/// state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
