/// User management endpoints
///
/// # Endpoints
///
/// - `POST   /v1/users` - Create user (admin action)
/// - `GET    /v1/users` - List users
/// - `GET    /v1/users/:id` - Get user
/// - `PUT    /v1/users/:id` - Update user
/// - `DELETE /v1/users/:id` - Delete user
/// - `PUT    /v1/users/:id/toggle-active` - Flip the active flag
/// - `GET    /v1/users/:id/main-tasks` - Main tasks the user can see

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskhub_shared::{
    auth::password,
    models::{
        main_task::MainTask,
        user::{CreateUser, UpdateUser, User},
    },
};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login name
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,

    /// Password (hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Update user request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login name
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: Option<String>,

    /// New password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    /// Enable or disable the account
    pub is_active: Option<bool>,
}

/// Create a new user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: username already taken
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}

/// Update a user
///
/// Only the provided fields are changed; a new password is hashed
/// before storage.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let password_hash = match req.password {
        Some(ref password) => Some(password::hash_password(password)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            username: req.username,
            password_hash,
            is_active: req.is_active,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}

/// Delete a user
///
/// Tasks assigned by or to the user survive with their assignment
/// fields cleared; the user's group grants and task shares are removed.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let deleted = User::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("User {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Flip a user's active flag (soft-disable / re-enable)
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<User>> {
    let user = User::toggle_active(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user))
}

/// List the main tasks a user can see (owned or granted)
pub async fn list_user_main_tasks(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<MainTask>>> {
    // 404 for unknown users rather than an empty list
    if User::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("User {} not found", id)));
    }

    let main_tasks = MainTask::list_for_user(&state.db, id).await?;
    Ok(Json(main_tasks))
}
