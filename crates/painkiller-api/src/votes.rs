use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::warn;

use painkiller_types::api::{CastVoteRequest, VoteCheckResponse};

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;
use crate::middleware::CurrentUser;

pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Json(req), _): WithRejection<Json<CastVoteRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let (pain_id, user_id) = (req.pain_id, user.id);
    let vote = blocking(&state, move |db| db.cast_vote(pain_id, user_id))
        .await
        .inspect_err(|e| {
            if matches!(e, ApiError::Conflict(_)) {
                warn!("User {} already voted for pain {}", user.username, pain_id);
            }
        })?;

    Ok(Json(vote))
}

pub async fn check_vote(
    State(state): State<AppState>,
    WithRejection(Path(pain_id), _): WithRejection<Path<i64>, ApiError>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = user.id;
    let has_voted = blocking(&state, move |db| db.has_voted(pain_id, user_id)).await?;
    Ok(Json(VoteCheckResponse { has_voted }))
}
