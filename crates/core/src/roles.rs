//! Well-known role names stored in the `users.role` column.

/// Full access: user management plus every project operation.
pub const ROLE_ADMIN: &str = "admin";

/// Regular account. Project access is decided per project by ownership
/// or membership.
pub const ROLE_USER: &str = "user";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];
