//! Repository for the append-only `activity_logs` table.

use sqlx::{PgConnection, PgPool};
use tablero_core::activity::ActivityEvent;
use tablero_core::types::DbId;

use crate::models::activity::ActivityLog;

/// Column list shared across queries. The `type` column is quoted because
/// it is a reserved word.
const COLUMNS: &str = r#"id, "type", project_id, user_id, metadata, created_at"#;

/// Append and read operations for activity logs. There is no update or
/// delete: rows are immutable history.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one log entry for an event.
    ///
    /// Takes `&mut PgConnection` rather than a pool so it can only run on
    /// the caller's transaction: the entry commits or rolls back together
    /// with the mutation it records.
    pub async fn append(
        conn: &mut PgConnection,
        project_id: DbId,
        user_id: DbId,
        event: &ActivityEvent,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO activity_logs ("type", project_id, user_id, metadata)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(event.kind().as_str())
            .bind(project_id)
            .bind(user_id)
            .bind(event.metadata_json())
            .fetch_one(conn)
            .await
    }

    /// List a project's activity, newest first, with limit/offset paging.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(project_id)
            .bind(limit.clamp(1, 500))
            .bind(offset.max(0))
            .fetch_all(pool)
            .await
    }

    /// Count a project's log entries (for pagination metadata).
    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM activity_logs WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
