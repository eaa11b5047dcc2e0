pub mod auth;
pub mod error;
pub mod middleware;
pub mod pains;
pub mod routes;
pub mod votes;

use tracing::error;

use painkiller_db::Database;

use crate::auth::AppState;
use crate::error::ApiError;

/// Run a store call (and any CPU-heavy hashing inside it) off the async runtime.
pub(crate) async fn blocking<F, T, E>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db).map_err(Into::<ApiError>::into))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })?
}
