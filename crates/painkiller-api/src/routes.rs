use axum::{
    Json, Router, middleware,
    routing::{get, post},
};

use painkiller_types::api::WelcomeResponse;

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{pains, votes};

/// All API routes with state applied. CORS and request tracing are layered
/// on by the server binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/register", post(auth::register))
        .route("/token", post(auth::login))
        .route("/pains", get(pains::list_pains));

    let protected_routes = Router::new()
        .route("/users/me", get(auth::me))
        .route("/pains", post(pains::create_pain))
        .route("/votes", post(votes::cast_vote))
        .route("/votes/check/{pain_id}", get(votes::check_vote))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to PainKiller API".to_string(),
    })
}
