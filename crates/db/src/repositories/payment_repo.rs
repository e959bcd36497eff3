//! Repository for the `payments` table. Plain CRUD: no activity kind is
//! defined for payments.

use sqlx::PgPool;
use tablero_core::types::DbId;

use crate::models::payment::{CreatePayment, Payment};

const COLUMNS: &str = "id, project_id, concept, amount_cents, currency, paid_at, created_at";

/// Payment recording and listing.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment against a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePayment,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (project_id, concept, amount_cents, currency, paid_at)
             VALUES ($1, $2, $3, COALESCE($4, 'EUR'), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .bind(&input.concept)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(input.paid_at)
            .fetch_one(pool)
            .await
    }

    /// List a project's payments, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
