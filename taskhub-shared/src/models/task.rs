/// Task model and database operations
///
/// A task is a unit of work assigned between users, optionally grouped
/// under a main task. Status is a flat three-valued enum with no
/// transition rules: any status may be set to any other.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('PENDING', 'DONE', 'REJECTED');
///
/// CREATE TABLE tasks (
///     task_id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     status task_status NOT NULL DEFAULT 'PENDING',
///     assigned_by INTEGER REFERENCES users (user_id) ON DELETE SET NULL,
///     assigned_to INTEGER REFERENCES users (user_id) ON DELETE SET NULL,
///     task_group_id INTEGER REFERENCES main_tasks (main_task_id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Deleting a referenced user or main task clears the pointer instead
/// of deleting the task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task status
///
/// Serialized in uppercase on the wire (`"PENDING"`); any other value
/// is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Not yet acted on
    Pending,

    /// Completed
    Done,

    /// Declined by the assignee
    Rejected,
}

impl TaskStatus {
    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Done => "DONE",
            TaskStatus::Rejected => "REJECTED",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub task_id: i32,

    /// Display name
    pub name: String,

    /// Current status
    pub status: TaskStatus,

    /// User who assigned the task (null if that user was deleted)
    pub assigned_by: Option<i32>,

    /// User the task is assigned to (null if unassigned or user deleted)
    pub assigned_to: Option<i32>,

    /// Main task grouping, if any
    pub task_group_id: Option<i32>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Display name
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

/// Input for updating a task; only non-None fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New display name
    pub name: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New assigning user
    pub assigned_by: Option<i32>,

    /// New assigned user
    pub assigned_to: Option<i32>,

    /// New main task grouping
    pub task_group_id: Option<i32>,
}

/// Optional filters for listing tasks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    /// Only tasks assigned to this user
    pub assigned_to: Option<i32>,

    /// Only tasks in this main task grouping
    pub task_group_id: Option<i32>,

    /// Only tasks with this status
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns a database error if any of the referenced users or the
    /// main task do not exist (foreign key violation).
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, status, assigned_by, assigned_to, task_group_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING task_id, name, status, assigned_by, assigned_to, task_group_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.status)
        .bind(data.assigned_by)
        .bind(data.assigned_to)
        .bind(data.task_group_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT task_id, name, status, assigned_by, assigned_to, task_group_id,
                   created_at, updated_at
            FROM tasks
            WHERE task_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks matching the filter, oldest first
    ///
    /// An empty filter lists every task.
    pub async fn list(pool: &PgPool, filter: TaskFilter) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            "SELECT task_id, name, status, assigned_by, assigned_to, task_group_id, \
             created_at, updated_at FROM tasks WHERE TRUE",
        );
        let mut bind_count = 0;

        if filter.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND assigned_to = ${}", bind_count));
        }
        if filter.task_group_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND task_group_id = ${}", bind_count));
        }
        if filter.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND status = ${}", bind_count));
        }

        query.push_str(" ORDER BY task_id");

        let mut q = sqlx::query_as::<_, Task>(&query);

        if let Some(assigned_to) = filter.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(task_group_id) = filter.task_group_id {
            q = q.bind(task_group_id);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Updates a task
    ///
    /// Returns None if the task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.assigned_by.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_by = ${}", bind_count));
        }
        if data.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }
        if data.task_group_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_group_id = ${}", bind_count));
        }

        query.push_str(
            " WHERE task_id = $1 \
             RETURNING task_id, name, status, assigned_by, assigned_to, task_group_id, \
             created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(assigned_by) = data.assigned_by {
            q = q.bind(assigned_by);
        }
        if let Some(assigned_to) = data.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(task_group_id) = data.task_group_id {
            q = q.bind(task_group_id);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Shares of the task cascade away.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "PENDING");
        assert_eq!(TaskStatus::Done.as_str(), "DONE");
        assert_eq!(TaskStatus::Rejected.as_str(), "REJECTED");
    }

    #[test]
    fn test_task_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"DONE\"").unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_task_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<TaskStatus>("\"CANCELED\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"pending\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"\"").is_err());
    }

    #[test]
    fn test_create_task_status_defaults_to_pending() {
        let create: CreateTask =
            serde_json::from_str(r#"{"name": "write report"}"#).unwrap();
        assert_eq!(create.status, TaskStatus::Pending);
        assert!(create.assigned_by.is_none());
        assert!(create.assigned_to.is_none());
        assert!(create.task_group_id.is_none());
    }

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.name.is_none());
        assert!(update.status.is_none());
        assert!(update.assigned_by.is_none());
        assert!(update.assigned_to.is_none());
        assert!(update.task_group_id.is_none());
    }
}
