use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use serein_core::{AccountStatus, Role, UserWithRoles};
use serein_store::users;
use serein_store::users::{NewUser, UserUpdate};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub role: Option<Role>,
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithRoles>>, ApiError> {
    let users = users::list(&state.pool).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserWithRoles>, ApiError> {
    let user = users::fetch(&state.pool, id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserWithRoles>, ApiError> {
    validate_profile(&payload.email, &payload.first_name, &payload.last_name)?;

    let created = users::create(
        &state.pool,
        NewUser {
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            role: payload.role,
        },
    )
    .await?;

    Ok(Json(created))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserWithRoles>, ApiError> {
    validate_profile(&payload.email, &payload.first_name, &payload.last_name)?;

    let updated = users::update(
        &state.pool,
        id,
        UserUpdate {
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            status: payload.status,
            role: payload.role,
        },
    )
    .await?;

    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    users::delete(&state.pool, id).await?;
    Ok(Json(()))
}

pub async fn promote_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = users::promote(&state.pool, id).await?;
    Ok(Json(roles))
}

pub async fn demote_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Role>>, ApiError> {
    let roles = users::demote(&state.pool, id).await?;
    Ok(Json(roles))
}

fn validate_profile(email: &str, first_name: &str, last_name: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("a valid email is required".to_string()));
    }
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "first and last name are required".to_string(),
        ));
    }
    Ok(())
}
