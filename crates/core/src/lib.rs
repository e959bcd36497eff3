//! Pure domain rules for the Tablero backend.
//!
//! This crate has no internal dependencies so its rules (status transition
//! legality, activity event shapes, member-request normalization) can be
//! used by both the repository layer and any future CLI tooling.

pub mod activity;
pub mod error;
pub mod member;
pub mod roles;
pub mod status;
pub mod types;
