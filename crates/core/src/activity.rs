//! Activity log event kinds and their metadata shapes.
//!
//! Every meaningful mutation appends exactly one activity log row per
//! affected subject. The kind set is closed; metadata is a tagged variant
//! per kind (not a free-form map) so each kind's field set is fixed at
//! compile time. Serialized metadata uses the camelCase field names the
//! history UI reads (`userId`, `userName`, `joinedAt`).

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Enumerated activity log kind, stored in the `activity_logs.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    ProjectComplete,
    ProjectCancel,
    TaskStatusCancel,
    TaskCreated,
    MemberAdded,
    MemberRemoved,
    CommentAdded,
}

impl ActivityKind {
    /// The TEXT value stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectComplete => "PROJECT_COMPLETE",
            Self::ProjectCancel => "PROJECT_CANCEL",
            Self::TaskStatusCancel => "TASK_STATUS_CANCEL",
            Self::TaskCreated => "TASK_CREATED",
            Self::MemberAdded => "MEMBER_ADDED",
            Self::MemberRemoved => "MEMBER_REMOVED",
            Self::CommentAdded => "COMMENT_ADDED",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor reference carried by actor-attributed metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRef {
    pub user_id: DbId,
    pub user_name: String,
}

/// Membership reference carried by MEMBER_ADDED / MEMBER_REMOVED metadata.
///
/// `joined_at` is the membership's join time -- for removals, the time the
/// member originally joined, not the removal time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRef {
    pub user_id: DbId,
    pub user_name: String,
    pub joined_at: Timestamp,
}

/// One variant per event kind, each with its fixed metadata field set.
#[derive(Debug, Clone)]
pub enum ActivityEvent {
    /// Project moved to COMPLETADO. No metadata; the timestamp is implicit
    /// in the log record.
    ProjectComplete,
    /// Project moved to CANCELADO. No metadata.
    ProjectCancel,
    /// Task moved to CANCELADA. No metadata.
    TaskStatusCancel,
    /// A task was created in the project.
    TaskCreated(ActorRef),
    /// A user was added to the project membership.
    MemberAdded(MembershipRef),
    /// A membership was removed from the project.
    MemberRemoved(MembershipRef),
    /// A note (comment) was added to the project.
    CommentAdded(ActorRef),
}

impl ActivityEvent {
    /// The kind this event is stored under.
    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::ProjectComplete => ActivityKind::ProjectComplete,
            Self::ProjectCancel => ActivityKind::ProjectCancel,
            Self::TaskStatusCancel => ActivityKind::TaskStatusCancel,
            Self::TaskCreated(_) => ActivityKind::TaskCreated,
            Self::MemberAdded(_) => ActivityKind::MemberAdded,
            Self::MemberRemoved(_) => ActivityKind::MemberRemoved,
            Self::CommentAdded(_) => ActivityKind::CommentAdded,
        }
    }

    /// Serialize the kind-specific metadata, or `None` for kinds that
    /// carry none.
    pub fn metadata_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::ProjectComplete | Self::ProjectCancel | Self::TaskStatusCancel => None,
            Self::TaskCreated(actor) | Self::CommentAdded(actor) => {
                Some(serde_json::to_value(actor).expect("ActorRef serialization cannot fail"))
            }
            Self::MemberAdded(m) | Self::MemberRemoved(m) => {
                Some(serde_json::to_value(m).expect("MembershipRef serialization cannot fail"))
            }
        }
    }
}
