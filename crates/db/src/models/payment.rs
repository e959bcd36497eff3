//! Project payment model and DTO.
//!
//! Payments are plain records: no activity kind is defined for them, so
//! creation does not touch the log.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};
use validator::Validate;

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub concept: String,
    pub amount_cents: i64,
    pub currency: String,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Request body for recording a payment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayment {
    #[validate(length(min = 1, max = 200))]
    pub concept: String,
    #[validate(range(min = 1))]
    pub amount_cents: i64,
    /// Defaults to EUR if omitted.
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub paid_at: Option<Timestamp>,
}
