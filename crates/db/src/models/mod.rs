//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `validator` rules where
//!   the request body needs shape checks)
//! - A `Deserialize` update DTO (all `Option` fields) where the entity is
//!   updatable

pub mod activity;
pub mod member;
pub mod note;
pub mod payment;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
