//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use payments_types::{
    OrderId, Payment, PaymentId, PaymentRepository, PaymentRequest, PaymentStatus, RepoError,
};

use crate::types::{PgPaymentRow, map_insert_error};

const PAYMENT_COLUMNS: &str =
    "id, order_id, amount, method, status, reference, created_at, updated_at";

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository; status changes are single-row conditional updates.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn create_payment(&self, req: PaymentRequest) -> Result<Payment, RepoError> {
        let row: PgPaymentRow = sqlx::query_as(&format!(
            r#"INSERT INTO payments (order_id, amount, method, status, reference)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            PAYMENT_COLUMNS
        ))
        .bind(req.order_id.value())
        .bind(req.amount)
        .bind(req.method.as_ref())
        .bind(PaymentStatus::Pending.as_ref())
        .bind(&req.reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, req.order_id))?;

        row.into_domain()
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<PgPaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgPaymentRow::into_domain).transpose()
    }

    async fn get_payment_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<PgPaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE order_id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(order_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgPaymentRow::into_domain).transpose()
    }

    async fn update_payment_status(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<PgPaymentRow> = sqlx::query_as(&format!(
            r#"UPDATE payments SET status = $1, updated_at = NOW()
               WHERE id = $2 AND status = $3
               RETURNING {}"#,
            PAYMENT_COLUMNS
        ))
        .bind(status.as_ref())
        .bind(id.value())
        .bind(expected.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        match row {
            Some(row) => row.into_domain().map(Some),
            None => match self.get_payment(id).await? {
                None => Ok(None),
                Some(current) => Err(RepoError::Conflict(format!(
                    "Payment {} is {}, expected {}",
                    id, current.status, expected
                ))),
            },
        }
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<PgPaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments ORDER BY id ASC",
            PAYMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgPaymentRow::into_domain).collect()
    }
}
