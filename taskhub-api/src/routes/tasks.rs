/// Task endpoints
///
/// # Endpoints
///
/// - `POST   /v1/tasks` - Create task
/// - `GET    /v1/tasks` - List tasks (optional filters)
/// - `POST   /v1/tasks/assign` - Create a task for another user
/// - `GET    /v1/tasks/:id` - Get task
/// - `PUT    /v1/tasks/:id` - Update task
/// - `DELETE /v1/tasks/:id` - Delete task
/// - `POST   /v1/tasks/:id/share` - Share task with a user
/// - `GET    /v1/tasks/:id/shares` - List shares of a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskhub_shared::{
    auth::jwt::Claims,
    models::{
        task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask},
        task_share::TaskShare,
        user_task_group::UserTaskGroup,
    },
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Initial status, defaults to PENDING
    #[serde(default)]
    pub status: TaskStatus,

    /// Assigning user
    pub assigned_by: Option<i32>,

    /// Assigned user
    pub assigned_to: Option<i32>,

    /// Main task grouping
    pub task_group_id: Option<i32>,
}

/// Assign task request: create a task on behalf of another user
///
/// Unlike plain creation, every reference is required so the task lands
/// in a grouping visible to the assignee.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignTaskRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Assigning user
    pub assigned_by: i32,

    /// Assigned user
    pub assigned_to: i32,

    /// Main task the task is assigned under
    pub task_group_id: i32,
}

/// Update task request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New status (any status may be set to any other)
    pub status: Option<TaskStatus>,

    /// New assigning user
    pub assigned_by: Option<i32>,

    /// New assigned user
    pub assigned_to: Option<i32>,

    /// New main task grouping
    pub task_group_id: Option<i32>,
}

/// Share task request
#[derive(Debug, Deserialize)]
pub struct ShareTaskRequest {
    /// User to share the task with
    pub user_id: i32,
}

/// Create a new task
///
/// # Errors
///
/// - `400 Bad Request`: a referenced user or main task does not exist
/// - `422 Unprocessable Entity`: validation failed or unknown status
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            name: req.name,
            status: req.status,
            assigned_by: req.assigned_by,
            assigned_to: req.assigned_to,
            task_group_id: req.task_group_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks, optionally filtered
///
/// # Query parameters
///
/// - `assigned_to`: only tasks assigned to this user
/// - `task_group_id`: only tasks in this grouping
/// - `status`: only tasks with this status
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db, filter).await?;
    Ok(Json(tasks))
}

/// Create a task on behalf of another user
///
/// Grants the assignee access to the main task first, so the new task
/// is visible to them immediately.
pub async fn assign_task(
    State(state): State<AppState>,
    Json(req): Json<AssignTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    UserTaskGroup::grant(&state.db, req.assigned_to, req.task_group_id).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            name: req.name,
            status: TaskStatus::Pending,
            assigned_by: Some(req.assigned_by),
            assigned_to: Some(req.assigned_to),
            task_group_id: Some(req.task_group_id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    Ok(Json(task))
}

/// Update a task
///
/// Status changes carry no transition rules.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            name: req.name,
            status: req.status,
            assigned_by: req.assigned_by,
            assigned_to: req.assigned_to,
            task_group_id: req.task_group_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    Ok(Json(task))
}

/// Delete a task
///
/// Shares of the task are removed by the database.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Task {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Share a task with a user
///
/// Records the share and, when the task sits in a grouping, grants the
/// target user access to that grouping so the task is visible to them.
/// The sharing user is taken from the access token.
pub async fn share_task(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(req): Json<ShareTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskShare>)> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    let share = TaskShare::create(&state.db, task.task_id, req.user_id).await?;

    if let Some(task_group_id) = task.task_group_id {
        UserTaskGroup::grant(&state.db, req.user_id, task_group_id).await?;
    }

    tracing::info!(
        task_id = task.task_id,
        shared_with = req.user_id,
        shared_by = claims.sub,
        "Task shared"
    );

    Ok((StatusCode::CREATED, Json(share)))
}

/// List the shares of a task
pub async fn list_task_shares(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<TaskShare>>> {
    if Task::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Task {} not found", id)));
    }

    let shares = TaskShare::list_for_task(&state.db, id).await?;
    Ok(Json(shares))
}
