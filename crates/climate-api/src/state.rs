use climate_core::db::DbPool;

/// Shared handler state. The pool is opened read-only once at startup and
/// cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}
