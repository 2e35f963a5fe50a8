//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{PaymentMethod, PaymentStatus};
use payments_types::dto::{ErrorResponse, PaymentRequest, PaymentResponse, UpdateStatusParams};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a payment for an order
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment created", body = PaymentResponse),
        (status = 400, description = "Malformed body, non-positive order ID or amount", body = ErrorResponse),
        (status = 409, description = "Order already has a payment", body = ErrorResponse)
    )
)]
async fn create_payment() {}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = i64, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 400, description = "Invalid payment ID", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
async fn get_payment() {}

/// Get the payment recorded for an order
#[utoipa::path(
    get,
    path = "/api/payments/order/{orderId}",
    tag = "payments",
    params(
        ("orderId" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 400, description = "Invalid order ID", body = ErrorResponse),
        (status = 404, description = "No payment for this order", body = ErrorResponse)
    )
)]
async fn get_payment_by_order() {}

/// Update payment status
#[utoipa::path(
    put,
    path = "/api/payments/admin/{id}/status",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Payment ID"),
        ("status" = String, Query, description = "New status: PENDING, PAID, FAILED or REFUNDED")
    ),
    responses(
        (status = 200, description = "Status updated", body = PaymentResponse),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed from the current status", body = ErrorResponse)
    )
)]
async fn update_payment_status() {}

/// List all payments
#[utoipa::path(
    get,
    path = "/api/payments/admin",
    tag = "admin",
    responses(
        (status = 200, description = "All payments ordered by ID", body = Vec<PaymentResponse>)
    )
)]
async fn list_payments() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments API",
        description = "Payment records for orders: create, look up and track status."
    ),
    paths(
        health,
        create_payment,
        get_payment,
        get_payment_by_order,
        update_payment_status,
        list_payments,
    ),
    components(
        schemas(
            PaymentRequest,
            PaymentResponse,
            PaymentStatus,
            PaymentMethod,
            UpdateStatusParams,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment creation and lookup"),
        (name = "admin", description = "Payment status management and listing"),
    )
)]
pub struct ApiDoc;
