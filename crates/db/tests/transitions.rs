//! Integration tests for project/task status transitions and their audit
//! records, against a real database.

use assert_matches::assert_matches;
use sqlx::PgPool;
use tablero_core::error::CoreError;
use tablero_core::status::{ProjectStatus, TaskStatus};
use tablero_core::types::DbId;
use tablero_db::models::project::CreateProject;
use tablero_db::models::task::CreateTask;
use tablero_db::models::user::NewUser;
use tablero_db::repositories::{ActivityLogRepo, ProjectRepo, TaskRepo, UserRepo};
use tablero_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str, name: Option<&str>) -> DbId {
    let user = UserRepo::create(
        pool,
        &NewUser {
            email: email.to_string(),
            name: name.map(str::to_string),
            password_hash: "$argon2id$test".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap();
    user.id
}

async fn seed_project(pool: &PgPool, owner_id: DbId, name: &str) -> DbId {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
            description: None,
        },
        owner_id,
    )
    .await
    .unwrap();
    project.id
}

fn new_task(title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: None,
        priority: None,
        due_date: None,
        assignee_ids: vec![],
    }
}

// ---------------------------------------------------------------------------
// Project transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn complete_project_sets_status_timestamp_and_one_log(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", Some("Ana")).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let updated = ProjectRepo::transition(&pool, project_id, ProjectStatus::Completado, owner)
        .await
        .unwrap();

    assert_eq!(updated.status, "COMPLETADO");
    assert!(updated.completed_at.is_some());
    assert_eq!(updated.version, 1);

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "PROJECT_COMPLETE");
    assert_eq!(logs[0].project_id, project_id);
    assert_eq!(logs[0].user_id, owner);
    assert!(logs[0].metadata.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn recompleting_a_completed_project_is_rejected_without_side_effects(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let first = ProjectRepo::transition(&pool, project_id, ProjectStatus::Completado, owner)
        .await
        .unwrap();

    let err = ProjectRepo::transition(&pool, project_id, ProjectStatus::Completado, owner)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidTransition { entity: "Project", .. })
    );

    // No new log, completed_at unchanged.
    let count = ActivityLogRepo::count_for_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let reread = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
    assert_eq!(reread.completed_at, first.completed_at);
    assert_eq!(reread.version, first.version);
}

#[sqlx::test(migrations = "../../migrations")]
async fn same_status_transition_leaves_project_unmodified(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let err = ProjectRepo::transition(&pool, project_id, ProjectStatus::Pendiente, owner)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidTransition { .. }));

    let project = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
    assert_eq!(project.status, "PENDIENTE");
    assert_eq!(project.version, 0);
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn cancel_project_logs_project_cancel_without_completed_at(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let updated = ProjectRepo::transition(&pool, project_id, ProjectStatus::Cancelado, owner)
        .await
        .unwrap();
    assert_eq!(updated.status, "CANCELADO");
    assert!(updated.completed_at.is_none());

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "PROJECT_CANCEL");
}

#[sqlx::test(migrations = "../../migrations")]
async fn transition_to_en_progreso_appends_no_log(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let updated = ProjectRepo::transition(&pool, project_id, ProjectStatus::EnProgreso, owner)
        .await
        .unwrap();
    assert_eq!(updated.status, "EN_PROGRESO");
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn transitioning_a_missing_project_is_not_found(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let err = ProjectRepo::transition(&pool, 9999, ProjectStatus::Completado, owner)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "Project", id: 9999 }));
}

#[sqlx::test(migrations = "../../migrations")]
async fn successive_transitions_bump_the_version_counter(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let first = ProjectRepo::transition(&pool, project_id, ProjectStatus::EnProgreso, owner)
        .await
        .unwrap();
    assert_eq!(first.version, 1);

    let second = ProjectRepo::transition(&pool, project_id, ProjectStatus::Completado, owner)
        .await
        .unwrap();
    assert_eq!(second.version, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_version_bump_surfaces_a_conflict(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    // A competing writer bumps the version and holds the row lock.
    let mut competing = pool.begin().await.unwrap();
    sqlx::query("UPDATE projects SET version = version + 1, updated_at = NOW() WHERE id = $1")
        .bind(project_id)
        .execute(&mut *competing)
        .await
        .unwrap();

    // The transition's initial read sees the committed version 0; its
    // compare-and-swap then blocks on the held row lock until the
    // competing writer commits, re-evaluates against the bumped row, and
    // matches nothing.
    let transition_pool = pool.clone();
    let transition = tokio::spawn(async move {
        ProjectRepo::transition(&transition_pool, project_id, ProjectStatus::Completado, owner)
            .await
    });
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    competing.commit().await.unwrap();

    let err = transition.await.unwrap().unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));

    // The losing transition rolled back completely: only the competing
    // bump is visible, and no log was appended.
    let project = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
    assert_eq!(project.status, "PENDIENTE");
    assert!(project.completed_at.is_none());
    assert_eq!(project.version, 1);
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Task creation and transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_task_logs_task_created_with_actor_metadata(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", Some("Ana")).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let actor = tablero_core::activity::ActorRef {
        user_id: owner,
        user_name: "Ana".to_string(),
    };
    let task = TaskRepo::create(&pool, project_id, &new_task("t1"), &actor)
        .await
        .unwrap();
    assert_eq!(task.status, "PENDIENTE");
    assert_eq!(task.priority, "MEDIA");

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "TASK_CREATED");
    let metadata = logs[0].metadata.as_ref().unwrap();
    assert_eq!(metadata["userId"], owner);
    assert_eq!(metadata["userName"], "Ana");
}

#[sqlx::test(migrations = "../../migrations")]
async fn task_assignee_must_be_owner_or_member(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", None).await;
    let outsider = seed_user(&pool, "outsider@example.com", None).await;
    let project_id = seed_project(&pool, owner, "p1").await;

    let actor = tablero_core::activity::ActorRef {
        user_id: owner,
        user_name: "owner".to_string(),
    };

    let mut input = new_task("t1");
    input.assignee_ids = vec![outsider];
    let err = TaskRepo::create(&pool, project_id, &input, &actor)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    // The owner is always assignable.
    let mut input = new_task("t2");
    input.assignee_ids = vec![owner];
    let task = TaskRepo::create(&pool, project_id, &input, &actor)
        .await
        .unwrap();
    let assignees = TaskRepo::assignees(&pool, task.id).await.unwrap();
    assert_eq!(assignees.len(), 1);
    assert_eq!(assignees[0].user_id, owner);
}

#[sqlx::test(migrations = "../../migrations")]
async fn cancel_task_logs_task_status_cancel_once(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", Some("Ana")).await;
    let project_id = seed_project(&pool, owner, "p1").await;
    let actor = tablero_core::activity::ActorRef {
        user_id: owner,
        user_name: "Ana".to_string(),
    };
    let task = TaskRepo::create(&pool, project_id, &new_task("t1"), &actor)
        .await
        .unwrap();

    let updated = TaskRepo::transition(&pool, task.id, TaskStatus::Cancelada, owner)
        .await
        .unwrap();
    assert_eq!(updated.status, "CANCELADA");

    // One TASK_CREATED plus one TASK_STATUS_CANCEL.
    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].kind, "TASK_STATUS_CANCEL");
    assert!(logs[0].metadata.is_none());

    // Re-cancelling is rejected and logs nothing.
    let err = TaskRepo::transition(&pool, task.id, TaskStatus::Cancelada, owner)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::InvalidTransition { entity: "Task", .. }));
    assert_eq!(
        ActivityLogRepo::count_for_project(&pool, project_id).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn task_status_change_to_non_cancel_logs_nothing(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", Some("Ana")).await;
    let project_id = seed_project(&pool, owner, "p1").await;
    let actor = tablero_core::activity::ActorRef {
        user_id: owner,
        user_name: "Ana".to_string(),
    };
    let task = TaskRepo::create(&pool, project_id, &new_task("t1"), &actor)
        .await
        .unwrap();

    TaskRepo::transition(&pool, task.id, TaskStatus::Completada, owner)
        .await
        .unwrap();

    let logs = ActivityLogRepo::list_for_project(&pool, project_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "TASK_CREATED");
}
