//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{OrderId, Payment, PaymentId, PaymentStatus};
use crate::dto::PaymentRequest;
use crate::error::RepoError;

/// The repository port for payment records.
///
/// Identifiers are assigned here, never by callers. Listings are ordered by
/// ascending id.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Stores a new `PENDING` payment.
    ///
    /// Fails with `RepoError::Conflict` if the order already has a payment.
    async fn create_payment(&self, req: PaymentRequest) -> Result<Payment, RepoError>;

    /// Gets a payment by ID.
    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Gets the payment recorded for an order.
    async fn get_payment_by_order(&self, order_id: OrderId)
    -> Result<Option<Payment>, RepoError>;

    /// Atomically moves a payment from `expected` to `status`.
    ///
    /// Returns `Ok(None)` when the payment does not exist and
    /// `RepoError::Conflict` when its current status is no longer `expected`.
    async fn update_payment_status(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, RepoError>;

    /// Lists all payments.
    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError>;
}
