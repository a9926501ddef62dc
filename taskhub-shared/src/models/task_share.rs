/// TaskShare model: records that a task was shared with a user
///
/// Share rows are removed by the database when their task or user is
/// deleted (CASCADE foreign keys). The `(task_id, user_id)` unique key
/// makes re-sharing a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A task shared with a user beyond its primary assignment
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskShare {
    /// Unique share id
    pub id: i32,

    /// Task being shared
    pub task_id: i32,

    /// User the task was shared with
    pub user_id: i32,

    /// When the share was made
    pub created_at: DateTime<Utc>,
}

impl TaskShare {
    /// Shares a task with a user
    ///
    /// Idempotent on the `(task_id, user_id)` unique key: sharing an
    /// already-shared task returns the existing row.
    ///
    /// # Errors
    ///
    /// Returns a database error if the task or user does not exist
    /// (foreign key violation).
    pub async fn create(pool: &PgPool, task_id: i32, user_id: i32) -> Result<Self, sqlx::Error> {
        let share = sqlx::query_as::<_, TaskShare>(
            r#"
            INSERT INTO task_shares (task_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (task_id, user_id) DO UPDATE SET task_id = EXCLUDED.task_id
            RETURNING id, task_id, user_id, created_at
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(share)
    }

    /// Lists shares of a task
    pub async fn list_for_task(pool: &PgPool, task_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let shares = sqlx::query_as::<_, TaskShare>(
            r#"
            SELECT id, task_id, user_id, created_at
            FROM task_shares
            WHERE task_id = $1
            ORDER BY id
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(shares)
    }

    /// Lists shares made to a user
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let shares = sqlx::query_as::<_, TaskShare>(
            r#"
            SELECT id, task_id, user_id, created_at
            FROM task_shares
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(shares)
    }

    /// Removes a share
    ///
    /// Returns true if a share was removed.
    pub async fn revoke(pool: &PgPool, task_id: i32, user_id: i32) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM task_shares WHERE task_id = $1 AND user_id = $2")
                .bind(task_id)
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
