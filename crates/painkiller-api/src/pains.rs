use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, error};

use painkiller_types::api::{CreatePainRequest, ListPainsQuery};

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;
use crate::middleware::CurrentUser;

const DEFAULT_LIMIT: u32 = 100;

pub async fn create_pain(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Json(req), _): WithRejection<Json<CreatePainRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let pain = blocking(&state, move |db| {
        db.create_pain(user.id, &req.title, &req.description)
    })
    .await?;

    Ok(Json(pain))
}

/// Public listing, most-voted first.
///
/// A store failure is logged and answered with an empty list rather than an
/// error status. A malformed query string is still a 422.
pub async fn list_pains(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListPainsQuery>, ApiError>,
) -> impl IntoResponse {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(state.max_list_limit);

    let pains = match blocking(&state, move |db| db.list_pains(skip, limit)).await {
        Ok(pains) => pains,
        Err(e) => {
            error!("Listing pains failed, returning empty list: {}", e);
            Vec::new()
        }
    };

    debug!("Listed {} pains (skip {}, limit {})", pains.len(), skip, limit);
    Json(pains)
}
