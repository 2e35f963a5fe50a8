//! Payment Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - validation and status rules only.

use payments_types::{
    AppError, DomainError, OrderId, PaymentId, PaymentRepository, PaymentRequest,
    PaymentResponse, PaymentStatus, RepoError,
};

/// Application service for payment records.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Records a new `PENDING` payment for an order.
    pub async fn create(&self, req: PaymentRequest) -> Result<PaymentResponse, AppError> {
        if req.order_id.value() <= 0 {
            return Err(DomainError::ValidationError("Order ID must be positive".into()).into());
        }

        if req.amount <= 0 {
            return Err(DomainError::ValidationError("Amount must be positive".into()).into());
        }

        let payment = self.repo.create_payment(req).await?;
        Ok(payment.into())
    }

    /// Gets a payment by ID.
    pub async fn get_by_id(&self, id: PaymentId) -> Result<PaymentResponse, AppError> {
        self.repo
            .get_payment(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Payment {} not found", id)))
    }

    /// Gets the payment recorded for an order.
    pub async fn get_by_order_id(&self, order_id: OrderId) -> Result<PaymentResponse, AppError> {
        self.repo
            .get_payment_by_order(order_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("No payment found for order {}", order_id)))
    }

    /// Moves a payment to a new status.
    ///
    /// `status` must name a known `PaymentStatus`. Re-applying the current
    /// status returns the record unchanged.
    pub async fn update_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<PaymentResponse, AppError> {
        let next: PaymentStatus = status.parse()?;

        let current = self
            .repo
            .get_payment(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {} not found", id)))?;

        if current.status == next {
            return Ok(current.into());
        }

        current.status.transition_to(next)?;

        match self
            .repo
            .update_payment_status(id, current.status, next)
            .await
        {
            Ok(Some(payment)) => Ok(payment.into()),
            Ok(None) => Err(AppError::NotFound(format!("Payment {} not found", id))),
            Err(RepoError::Conflict(msg)) => Err(AppError::Conflict(format!(
                "Payment {} changed concurrently: {}",
                id, msg
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all payments, ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<PaymentResponse>, AppError> {
        let payments = self.repo.list_payments().await?;
        Ok(payments.into_iter().map(Into::into).collect())
    }
}
