//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names are camelCase on the wire (`orderId`, `createdAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{OrderId, Payment, PaymentId, PaymentMethod, PaymentStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a payment for an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Order being paid for
    #[schema(value_type = i64, example = 42)]
    pub order_id: OrderId,
    /// Amount in smallest currency unit
    #[schema(example = 100)]
    pub amount: i64,
    #[serde(default)]
    pub method: PaymentMethod,
    /// Optional external reference for the payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PaymentRequest {
    /// Request with the default method and no reference.
    pub fn new(order_id: OrderId, amount: i64) -> Self {
        Self {
            order_id,
            amount,
            method: PaymentMethod::default(),
            reference: None,
        }
    }
}

/// Current state of a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Unique payment identifier
    #[schema(value_type = i64, example = 1)]
    pub id: PaymentId,
    #[schema(value_type = i64, example = 42)]
    pub order_id: OrderId,
    #[schema(example = 100)]
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            amount: p.amount,
            method: p.method,
            status: p.status,
            reference: p.reference,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query parameters for a status update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusParams {
    /// New status (PENDING, PAID, FAILED, REFUNDED)
    #[schema(example = "PAID")]
    pub status: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Payment 7 not found")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
}
