/// Main task (task group) endpoints
///
/// # Endpoints
///
/// - `POST   /v1/main-tasks` - Create main task
/// - `GET    /v1/main-tasks` - List main tasks
/// - `GET    /v1/main-tasks/:id` - Get main task
/// - `PUT    /v1/main-tasks/:id` - Update main task
/// - `DELETE /v1/main-tasks/:id` - Delete main task
/// - `POST   /v1/main-tasks/:id/share` - Grant users access
/// - `DELETE /v1/main-tasks/:id/share/:user_id` - Revoke access

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskhub_shared::models::{
    main_task::{CreateMainTask, MainTask, UpdateMainTask},
    user_task_group::UserTaskGroup,
};
use validator::Validate;

/// Create main task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMainTaskRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Owning user
    pub assigned_by: Option<i32>,
}

/// Update main task request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMainTaskRequest {
    /// New display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// Enable or disable the grouping
    pub is_active: Option<bool>,

    /// Reassign ownership
    pub assigned_by: Option<i32>,
}

/// Share request: users to grant access to
#[derive(Debug, Deserialize, Validate)]
pub struct ShareMainTaskRequest {
    /// Ids of users to grant access
    #[validate(length(min = 1, message = "At least one user id is required"))]
    pub user_ids: Vec<i32>,
}

/// Share response
#[derive(Debug, Serialize)]
pub struct ShareMainTaskResponse {
    /// Users newly granted access (already-granted users are omitted)
    pub granted: Vec<i32>,
}

/// Create a new main task
///
/// # Errors
///
/// - `400 Bad Request`: `assigned_by` references a user that does not exist
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_main_task(
    State(state): State<AppState>,
    Json(req): Json<CreateMainTaskRequest>,
) -> ApiResult<(StatusCode, Json<MainTask>)> {
    req.validate()?;

    let main_task = MainTask::create(
        &state.db,
        CreateMainTask {
            name: req.name,
            assigned_by: req.assigned_by,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(main_task)))
}

/// List all main tasks
pub async fn list_main_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<MainTask>>> {
    let main_tasks = MainTask::list(&state.db).await?;
    Ok(Json(main_tasks))
}

/// Get a main task by id
pub async fn get_main_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MainTask>> {
    let main_task = MainTask::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Main task {} not found", id)))?;

    Ok(Json(main_task))
}

/// Update a main task
pub async fn update_main_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateMainTaskRequest>,
) -> ApiResult<Json<MainTask>> {
    req.validate()?;

    let main_task = MainTask::update(
        &state.db,
        id,
        UpdateMainTask {
            name: req.name,
            is_active: req.is_active,
            assigned_by: req.assigned_by,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Main task {} not found", id)))?;

    Ok(Json(main_task))
}

/// Delete a main task
///
/// Tasks in the grouping survive with `task_group_id` cleared; grants
/// are removed by the database.
pub async fn delete_main_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let deleted = MainTask::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Main task {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Grant users access to a main task
///
/// Idempotent per user: already-granted users are skipped and omitted
/// from the response.
pub async fn share_main_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ShareMainTaskRequest>,
) -> ApiResult<Json<ShareMainTaskResponse>> {
    req.validate()?;

    if MainTask::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Main task {} not found", id)));
    }

    let mut granted = Vec::new();
    for user_id in req.user_ids {
        if UserTaskGroup::grant(&state.db, user_id, id).await? {
            granted.push(user_id);
        }
    }

    Ok(Json(ShareMainTaskResponse { granted }))
}

/// Revoke a user's access to a main task
pub async fn unshare_main_task(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    let revoked = UserTaskGroup::revoke(&state.db, user_id, id).await?;

    if !revoked {
        return Err(ApiError::NotFound(format!(
            "User {} has no access to main task {}",
            user_id, id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
