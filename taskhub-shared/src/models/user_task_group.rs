/// UserTaskGroup model: many-to-many grants between users and main tasks
///
/// The composite primary key `(user_id, task_group_id)` guarantees a
/// pairing exists at most once; `grant` is idempotent on top of that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A visibility grant: the user can see the main task and its tasks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserTaskGroup {
    /// User the grant applies to
    pub user_id: i32,

    /// Main task being granted
    pub task_group_id: i32,

    /// When the grant was made
    pub created_at: DateTime<Utc>,
}

impl UserTaskGroup {
    /// Grants a user access to a main task
    ///
    /// Idempotent: granting an existing pairing is a no-op. Returns true
    /// if a new grant was created.
    pub async fn grant(pool: &PgPool, user_id: i32, task_group_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_task_groups (user_id, task_group_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, task_group_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(task_group_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revokes a user's access to a main task
    ///
    /// Returns true if a grant was removed.
    pub async fn revoke(pool: &PgPool, user_id: i32, task_group_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_task_groups WHERE user_id = $1 AND task_group_id = $2",
        )
        .bind(user_id)
        .bind(task_group_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a grant exists for the pairing
    pub async fn has_access(
        pool: &PgPool,
        user_id: i32,
        task_group_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_task_groups
                WHERE user_id = $1 AND task_group_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(task_group_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Lists the ids of users granted access to a main task
    pub async fn list_user_ids(pool: &PgPool, task_group_id: i32) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            "SELECT user_id FROM user_task_groups WHERE task_group_id = $1 ORDER BY user_id",
        )
        .bind(task_group_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
