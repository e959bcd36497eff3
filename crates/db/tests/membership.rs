//! Integration tests for membership reconciliation and its audit records.

use assert_matches::assert_matches;
use sqlx::PgPool;
use tablero_core::error::CoreError;
use tablero_core::types::DbId;
use tablero_db::models::project::CreateProject;
use tablero_db::models::user::NewUser;
use tablero_db::repositories::{ActivityLogRepo, MemberRepo, ProjectRepo, UserRepo};
use tablero_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str, name: Option<&str>) -> DbId {
    UserRepo::create(
        pool,
        &NewUser {
            email: email.to_string(),
            name: name.map(str::to_string),
            password_hash: "$argon2id$test".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_project(pool: &PgPool, owner_id: DbId) -> DbId {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: "p1".to_string(),
            description: None,
        },
        owner_id,
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Reconciling add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn adding_new_members_inserts_rows_and_logs_each(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", Some("Luis")).await;
    let u2 = seed_user(&pool, "u2@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    let outcome = MemberRepo::add_members(&pool, project_id, &[u1, u2], owner)
        .await
        .unwrap();
    assert_eq!(outcome.added, vec![u1, u2]);
    assert!(outcome.skipped.is_empty());

    let members = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    assert_eq!(members.len(), 2);

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.kind == "MEMBER_ADDED"));

    // Display name falls back to the email local part when unset.
    let u2_log = logs
        .iter()
        .find(|l| l.metadata.as_ref().unwrap()["userId"] == u2)
        .unwrap();
    assert_eq!(u2_log.metadata.as_ref().unwrap()["userName"], "u2");
    let u1_log = logs
        .iter()
        .find(|l| l.metadata.as_ref().unwrap()["userId"] == u1)
        .unwrap();
    assert_eq!(u1_log.metadata.as_ref().unwrap()["userName"], "Luis");
    assert!(u1_log.metadata.as_ref().unwrap()["joinedAt"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn fully_overlapping_request_adds_nothing_and_logs_nothing(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    MemberRepo::add_members(&pool, project_id, &[u1], owner)
        .await
        .unwrap();
    let logs_before = ActivityLogRepo::count_for_project(&pool, project_id)
        .await
        .unwrap();

    let outcome = MemberRepo::add_members(&pool, project_id, &[u1], owner)
        .await
        .unwrap();
    assert!(outcome.added.is_empty());
    assert_eq!(outcome.skipped, vec![u1]);

    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        logs_before
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn partial_overlap_inserts_exactly_the_difference(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", None).await;
    let u2 = seed_user(&pool, "u2@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    MemberRepo::add_members(&pool, project_id, &[u1], owner)
        .await
        .unwrap();

    let outcome = MemberRepo::add_members(&pool, project_id, &[u1, u2], owner)
        .await
        .unwrap();
    assert_eq!(outcome.added, vec![u2]);
    assert_eq!(outcome.skipped, vec![u1]);

    let members = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    assert_eq!(members.len(), 2);

    // MEMBER_ADDED count equals rows actually inserted, not requested.
    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    let added_logs: Vec<_> = logs.iter().filter(|l| l.kind == "MEMBER_ADDED").collect();
    assert_eq!(added_logs.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn add_members_is_idempotent(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", None).await;
    let u2 = seed_user(&pool, "u2@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    let first = MemberRepo::add_members(&pool, project_id, &[u1, u2], owner)
        .await
        .unwrap();
    assert_eq!(first.added.len(), 2);
    let members_after_first = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    let logs_after_first = ActivityLogRepo::count_for_project(&pool, project_id)
        .await
        .unwrap();

    let second = MemberRepo::add_members(&pool, project_id, &[u1, u2], owner)
        .await
        .unwrap();
    assert!(second.added.is_empty());
    assert_eq!(second.skipped, vec![u1, u2]);

    let members_after_second = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    assert_eq!(members_after_first.len(), members_after_second.len());
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        logs_after_first
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_request_is_success_with_empty_outcome(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    let outcome = MemberRepo::add_members(&pool, project_id, &[], owner)
        .await
        .unwrap();
    assert!(outcome.added.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn adding_members_to_a_missing_project_is_not_found(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let err = MemberRepo::add_members(&pool, 9999, &[owner], owner)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Project", id: 9999 }));
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_user_id_is_a_validation_error_with_no_partial_insert(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    let err = MemberRepo::add_members(&pool, project_id, &[u1, 9999], owner)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    // Transaction rolled back: u1 was not inserted either.
    let members = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    assert!(members.is_empty());
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn removing_a_member_logs_member_removed_with_original_joined_at(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let u1 = seed_user(&pool, "u1@example.com", Some("Luis")).await;
    let project_id = seed_project(&pool, owner).await;

    MemberRepo::add_members(&pool, project_id, &[u1], owner)
        .await
        .unwrap();
    let member = MemberRepo::list_for_project(&pool, project_id).await.unwrap()[0].clone();

    let removed = MemberRepo::remove_member(&pool, member.id, owner)
        .await
        .unwrap();
    assert_eq!(removed.user_id, u1);

    let members = MemberRepo::list_for_project(&pool, project_id).await.unwrap();
    assert!(members.is_empty());

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    let removal = logs.iter().find(|l| l.kind == "MEMBER_REMOVED").unwrap();
    let metadata = removal.metadata.as_ref().unwrap();
    assert_eq!(metadata["userId"], u1);
    assert_eq!(metadata["userName"], "Luis");
    // joinedAt is the membership's join time, not the removal time.
    assert_eq!(
        metadata["joinedAt"].as_str().unwrap(),
        member.joined_at.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn removing_a_missing_membership_is_not_found_and_logs_nothing(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner).await;

    let err = MemberRepo::remove_member(&pool, 12345, owner).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "ProjectMember", id: 12345 })
    );
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        0
    );
}
