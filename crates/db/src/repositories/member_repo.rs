//! Repository for the `project_members` table: reconciling add, removal,
//! and membership lookups.

use sqlx::PgPool;
use tablero_core::activity::{ActivityEvent, MembershipRef};
use tablero_core::error::CoreError;
use tablero_core::member::display_name;
use tablero_core::types::DbId;

use crate::models::member::{ProjectMember, ReconcileOutcome};
use crate::models::user::UserRef;
use crate::repositories::ActivityLogRepo;
use crate::DbError;

const COLUMNS: &str = "id, project_id, user_id, invited_at, joined_at";

/// Membership reconciliation and lookups.
pub struct MemberRepo;

impl MemberRepo {
    /// Reconcile the requested ids against existing membership, applying
    /// only the delta, in one transaction.
    ///
    /// `requested` is assumed normalized (deduplicated, positive ids --
    /// see `tablero_core::member::normalize_member_ids`). Ids already
    /// present are skipped, never errors; ids actually inserted each get
    /// one MEMBER_ADDED log entry. A concurrent insert of the same
    /// membership degrades to a skip via `ON CONFLICT DO NOTHING`.
    pub async fn add_members(
        pool: &PgPool,
        project_id: DbId,
        requested: &[DbId],
        actor_id: DbId,
    ) -> Result<ReconcileOutcome, DbError> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM projects WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }
            .into());
        }

        if requested.is_empty() {
            return Ok(ReconcileOutcome {
                added: vec![],
                skipped: vec![],
            });
        }

        let existing = sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM project_members WHERE project_id = $1 AND user_id = ANY($2)",
        )
        .bind(project_id)
        .bind(requested)
        .fetch_all(&mut *tx)
        .await?;

        let to_add: Vec<DbId> = requested
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect();
        let mut skipped: Vec<DbId> = requested
            .iter()
            .copied()
            .filter(|id| existing.contains(id))
            .collect();

        if to_add.is_empty() {
            tracing::debug!(project_id, ?skipped, "all requested users already members");
            return Ok(ReconcileOutcome {
                added: vec![],
                skipped,
            });
        }

        // Display names for log metadata. A requested id with no user row
        // would violate the FK on insert; surface it as a validation error
        // up front instead.
        let users =
            sqlx::query_as::<_, UserRef>("SELECT id, name, email FROM users WHERE id = ANY($1)")
                .bind(&to_add)
                .fetch_all(&mut *tx)
                .await?;
        let missing: Vec<DbId> = to_add
            .iter()
            .copied()
            .filter(|id| !users.iter().any(|u| u.id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(
                CoreError::Validation(format!("Unknown user ids: {missing:?}")).into(),
            );
        }

        let mut added = Vec::with_capacity(to_add.len());
        for user_id in to_add {
            let inserted = sqlx::query_as::<_, ProjectMember>(&format!(
                "INSERT INTO project_members (project_id, user_id)
                 VALUES ($1, $2)
                 ON CONFLICT (project_id, user_id) DO NOTHING
                 RETURNING {COLUMNS}"
            ))
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(member) = inserted else {
                // Lost a race with a concurrent add of the same user.
                skipped.push(user_id);
                continue;
            };

            let user = users.iter().find(|u| u.id == user_id).ok_or_else(|| {
                CoreError::Internal(format!("user {user_id} vanished during reconciliation"))
            })?;
            let event = ActivityEvent::MemberAdded(MembershipRef {
                user_id,
                user_name: display_name(user.name.as_deref(), &user.email),
                joined_at: member.joined_at,
            });
            ActivityLogRepo::append(&mut *tx, project_id, actor_id, &event).await?;
            added.push(user_id);
        }

        tx.commit().await?;
        Ok(ReconcileOutcome { added, skipped })
    }

    /// Remove a membership by its row id, appending the MEMBER_REMOVED log
    /// in the same transaction. The log carries the membership's original
    /// `joined_at`, not the removal time.
    pub async fn remove_member(
        pool: &PgPool,
        member_id: DbId,
        actor_id: DbId,
    ) -> Result<ProjectMember, DbError> {
        let mut tx = pool.begin().await?;

        let member = sqlx::query_as::<_, ProjectMember>(&format!(
            "SELECT {COLUMNS} FROM project_members WHERE id = $1"
        ))
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ProjectMember",
            id: member_id,
        })?;

        let user =
            sqlx::query_as::<_, UserRef>("SELECT id, name, email FROM users WHERE id = $1")
                .bind(member.user_id)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("DELETE FROM project_members WHERE id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        let event = ActivityEvent::MemberRemoved(MembershipRef {
            user_id: member.user_id,
            user_name: display_name(user.name.as_deref(), &user.email),
            joined_at: member.joined_at,
        });
        ActivityLogRepo::append(&mut *tx, member.project_id, actor_id, &event).await?;

        tx.commit().await?;
        Ok(member)
    }

    /// List a project's members in join order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_members WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a user is a member of a project. Used for authorization.
    pub async fn is_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }
}
