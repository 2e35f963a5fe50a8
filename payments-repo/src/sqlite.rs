//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::str::FromStr;
use tokio::sync::Mutex;

use payments_types::{
    OrderId, Payment, PaymentId, PaymentRepository, PaymentRequest, PaymentStatus, RepoError,
};

use crate::types::{SqlitePaymentRow, map_insert_error};

const SELECT_PAYMENT: &str = r#"SELECT id, order_id, amount, method, status, reference, created_at, updated_at FROM payments"#;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
    /// Held open for `:memory:` databases, which vanish with their last connection.
    _memory_anchor: Option<Mutex<SqliteConnection>>,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let (pool, memory_anchor) = if database_url.contains(":memory:") {
            // Pool and anchor share one named in-memory database.
            let options = options.shared_cache(true);
            let anchor = options.connect().await?;
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            (pool, Some(Mutex::new(anchor)))
        } else {
            let pool = SqlitePoolOptions::new()
                .max_connections(10)
                .connect_with(options)
                .await?;
            (pool, None)
        };

        let repo = Self {
            pool,
            _memory_anchor: memory_anchor,
        };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn create_payment(&self, req: PaymentRequest) -> Result<Payment, RepoError> {
        let now = chrono::Utc::now();
        let now_str = now.to_rfc3339();
        let status = PaymentStatus::Pending;

        let result = sqlx::query(
            r#"INSERT INTO payments (order_id, amount, method, status, reference, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(req.order_id.value())
        .bind(req.amount)
        .bind(req.method.as_ref())
        .bind(status.as_ref())
        .bind(&req.reference)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, req.order_id))?;

        Ok(Payment {
            id: PaymentId::new(result.last_insert_rowid()),
            order_id: req.order_id,
            amount: req.amount,
            method: req.method,
            status,
            reference: req.reference,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<SqlitePaymentRow> =
            sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PAYMENT))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn get_payment_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<SqlitePaymentRow> =
            sqlx::query_as(&format!("{} WHERE order_id = ?", SELECT_PAYMENT))
                .bind(order_id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn update_payment_status(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, RepoError> {
        let now_str = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE payments SET status = ?, updated_at = ? WHERE id = ? AND status = ?"#,
        )
        .bind(status.as_ref())
        .bind(&now_str)
        .bind(id.value())
        .bind(expected.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return match self.get_payment(id).await? {
                None => Ok(None),
                Some(current) => Err(RepoError::Conflict(format!(
                    "Payment {} is {}, expected {}",
                    id, current.status, expected
                ))),
            };
        }

        self.get_payment(id).await
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<SqlitePaymentRow> =
            sqlx::query_as(&format!("{} ORDER BY id ASC", SELECT_PAYMENT))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqlitePaymentRow::into_domain).collect()
    }
}
