use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use serein_core::{QuestionnaireResponse, StressEvent};
use serein_inventory::RiskBand;
use serein_store::{responses, StoreError};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub event_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct SubmissionOutcome {
    pub response_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub total: i32,
    pub band: RiskBand,
    pub message: String,
}

#[derive(Serialize)]
pub struct ResponseDetailBody {
    pub response: QuestionnaireResponse,
    pub events: Vec<StressEvent>,
    pub total: i32,
    pub band: RiskBand,
    pub message: String,
}

/// Record the caller's selection and return the computed score.
pub async fn submit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmissionOutcome>, ApiError> {
    let recorded = responses::record(&state.pool, auth.id, &payload.event_ids)
        .await
        .map_err(|e| match e {
            // A valid token for a user that no longer exists.
            StoreError::UserNotFound { .. } => {
                ApiError::Unauthorized("unknown caller identity".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(SubmissionOutcome {
        response_id: recorded.response.id,
        submitted_at: recorded.response.submitted_at,
        total: recorded.score.total,
        band: recorded.score.band,
        message: recorded.score.band.message().to_string(),
    }))
}

/// The caller's submissions, newest first. Admins see everyone's.
pub async fn list_responses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<QuestionnaireResponse>>, ApiError> {
    let items = if auth.capabilities.is_admin() {
        responses::list_all(&state.pool).await?
    } else {
        responses::list_for_user(&state.pool, auth.id).await?
    };

    Ok(Json(items))
}

/// One submission with its events and recomputed score.
pub async fn get_response(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponseDetailBody>, ApiError> {
    let detail = responses::fetch(&state.pool, id).await?;
    authorize_owner(&auth, detail.response.user_id)?;

    Ok(Json(ResponseDetailBody {
        response: detail.response,
        events: detail.events,
        total: detail.score.total,
        band: detail.score.band,
        message: detail.score.band.message().to_string(),
    }))
}

/// Delete a submission; its event rows go with it.
pub async fn delete_response(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    let detail = responses::fetch(&state.pool, id).await?;
    authorize_owner(&auth, detail.response.user_id)?;

    responses::delete(&state.pool, id).await?;
    Ok(Json(()))
}

fn authorize_owner(auth: &AuthUser, owner: Uuid) -> Result<(), ApiError> {
    if auth.capabilities.is_admin() || auth.id == owner {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "submission belongs to another user".to_string(),
        ))
    }
}
