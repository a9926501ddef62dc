/// MainTask model and database operations
///
/// A main task is a named grouping of tasks, owned by the user who
/// created it. Other users gain visibility through `user_task_groups`
/// grants.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE main_tasks (
///     main_task_id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     assigned_by INTEGER REFERENCES users (user_id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Named grouping of tasks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MainTask {
    /// Unique main task id
    pub main_task_id: i32,

    /// Display name
    pub name: String,

    /// Soft-disable flag
    pub is_active: bool,

    /// User who created the grouping (null if that user was deleted)
    pub assigned_by: Option<i32>,

    /// When the grouping was created
    pub created_at: DateTime<Utc>,

    /// When the grouping was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a main task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMainTask {
    /// Display name
    pub name: String,

    /// Owning user, if any
    pub assigned_by: Option<i32>,
}

/// Input for updating a main task; only non-None fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMainTask {
    /// New display name
    pub name: Option<String>,

    /// Enable or disable the grouping
    pub is_active: Option<bool>,

    /// Reassign ownership
    pub assigned_by: Option<i32>,
}

impl MainTask {
    /// Creates a new main task
    ///
    /// # Errors
    ///
    /// Returns a database error if `assigned_by` references a user that
    /// does not exist (foreign key violation).
    pub async fn create(pool: &PgPool, data: CreateMainTask) -> Result<Self, sqlx::Error> {
        let main_task = sqlx::query_as::<_, MainTask>(
            r#"
            INSERT INTO main_tasks (name, assigned_by)
            VALUES ($1, $2)
            RETURNING main_task_id, name, is_active, assigned_by, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.assigned_by)
        .fetch_one(pool)
        .await?;

        Ok(main_task)
    }

    /// Finds a main task by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let main_task = sqlx::query_as::<_, MainTask>(
            r#"
            SELECT main_task_id, name, is_active, assigned_by, created_at, updated_at
            FROM main_tasks
            WHERE main_task_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(main_task)
    }

    /// Lists all main tasks, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let main_tasks = sqlx::query_as::<_, MainTask>(
            r#"
            SELECT main_task_id, name, is_active, assigned_by, created_at, updated_at
            FROM main_tasks
            ORDER BY main_task_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(main_tasks)
    }

    /// Lists the main tasks a user can see
    ///
    /// A user sees a grouping when they own it (`assigned_by`) or when
    /// a `user_task_groups` grant exists for them.
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let main_tasks = sqlx::query_as::<_, MainTask>(
            r#"
            SELECT DISTINCT m.main_task_id, m.name, m.is_active, m.assigned_by,
                   m.created_at, m.updated_at
            FROM main_tasks m
            LEFT JOIN user_task_groups g ON g.task_group_id = m.main_task_id
            WHERE m.assigned_by = $1 OR g.user_id = $1
            ORDER BY m.main_task_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(main_tasks)
    }

    /// Updates a main task
    ///
    /// Returns None if the main task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateMainTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE main_tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.is_active.is_some() {
            bind_count += 1;
            query.push_str(&format!(", is_active = ${}", bind_count));
        }
        if data.assigned_by.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_by = ${}", bind_count));
        }

        query.push_str(
            " WHERE main_task_id = $1 \
             RETURNING main_task_id, name, is_active, assigned_by, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, MainTask>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(is_active) = data.is_active {
            q = q.bind(is_active);
        }
        if let Some(assigned_by) = data.assigned_by {
            q = q.bind(assigned_by);
        }

        let main_task = q.fetch_optional(pool).await?;

        Ok(main_task)
    }

    /// Deletes a main task
    ///
    /// Tasks inside the grouping lose their `task_group_id` (SET NULL);
    /// visibility grants cascade away.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM main_tasks WHERE main_task_id = $1")
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
    fn test_update_main_task_default_is_empty() {
        let update = UpdateMainTask::default();
        assert!(update.name.is_none());
        assert!(update.is_active.is_none());
        assert!(update.assigned_by.is_none());
    }
}
