//! Membership reconciliation helpers.
//!
//! The add-members endpoint accepts either a single user id or a list.
//! Normalization dedupes while preserving first-seen order and drops
//! non-positive ids before any database work happens.

use serde::Deserialize;

use crate::types::DbId;

/// Request body for the add-members endpoint: one id or many.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberIds {
    One(DbId),
    Many(Vec<DbId>),
}

/// Normalize a membership request into a deduplicated, ordered id list.
pub fn normalize_member_ids(request: &MemberIds) -> Vec<DbId> {
    let ids: &[DbId] = match request {
        MemberIds::One(id) => std::slice::from_ref(id),
        MemberIds::Many(ids) => ids,
    };

    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| *id > 0)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Placeholder shown when a user has neither a name nor a usable email.
pub const UNKNOWN_USER_NAME: &str = "Usuario";

/// Resolve the display name recorded in activity log metadata.
///
/// Falls back from the profile name to the local part of the email, then to
/// [`UNKNOWN_USER_NAME`].
pub fn display_name(name: Option<&str>, email: &str) -> String {
    if let Some(name) = name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => UNKNOWN_USER_NAME.to_string(),
    }
}
