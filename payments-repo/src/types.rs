//! Database row types for the SQL adapters.

use sqlx::FromRow;

use payments_types::{OrderId, Payment, PaymentId, PaymentMethod, PaymentStatus, RepoError};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// Column decoding shared by both backends
// ─────────────────────────────────────────────────────────────────────────────

fn parse_status(s: &str) -> Result<PaymentStatus, RepoError> {
    s.parse()
        .map_err(|_| RepoError::Database(format!("Unknown payment status in database: {}", s)))
}

fn parse_method(s: &str) -> Result<PaymentMethod, RepoError> {
    s.parse()
        .map_err(|_| RepoError::Database(format!("Unknown payment method in database: {}", s)))
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows (timestamps stored as RFC 3339 text)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqlitePaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub reference: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(feature = "sqlite")]
impl SqlitePaymentRow {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let parse_ts = |s: &str| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| RepoError::Database(e.to_string()))
        };

        Ok(Payment {
            id: PaymentId::new(self.id),
            order_id: OrderId::new(self.order_id),
            amount: self.amount,
            method: parse_method(&self.method)?,
            status: parse_status(&self.status)?,
            reference: self.reference,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgPaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "postgres")]
impl PgPaymentRow {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        Ok(Payment {
            id: PaymentId::new(self.id),
            order_id: OrderId::new(self.order_id),
            amount: self.amount,
            method: parse_method(&self.method)?,
            status: parse_status(&self.status)?,
            reference: self.reference,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Maps a sqlx error, turning unique-key violations into conflicts.
pub fn map_insert_error(err: sqlx::Error, order_id: OrderId) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(format!("Payment already exists for order {}", order_id))
        }
        _ => RepoError::Database(err.to_string()),
    }
}
