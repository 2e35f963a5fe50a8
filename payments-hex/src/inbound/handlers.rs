//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payments_types::{
    AppError, ErrorResponse, OrderId, PaymentId, PaymentRepository, PaymentRequest,
    UpdateStatusParams,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository> {
    pub service: PaymentService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

fn parse_payment_id(raw: &str) -> Result<PaymentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid payment ID: {}", raw)))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Create a payment.
#[tracing::instrument(skip(state, payload))]
pub async fn create_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    tracing::info!(order_id = %req.order_id, amount = req.amount, "Received request to create payment");

    let order_id = req.order_id;
    let payment = state.service.create(req).await?;
    tracing::info!(payment_id = %payment.id, %order_id, "Payment created");
    Ok(Json(payment))
}

/// Get payment by payment ID.
#[tracing::instrument(skip(state, path), fields(payment_id))]
pub async fn get_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    tracing::Span::current().record("payment_id", id.as_str());
    let payment_id = parse_payment_id(&id)?;
    tracing::info!("Fetching payment");

    let payment = state.service.get_by_id(payment_id).await?;
    tracing::debug!(?payment, "Fetched payment details");
    Ok(Json(payment))
}

/// Get the payment recorded for an order.
#[tracing::instrument(skip(state, path), fields(order_id))]
pub async fn get_payment_by_order<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(order_id) = path?;
    tracing::Span::current().record("order_id", order_id.as_str());
    let order_id: OrderId = order_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid order ID: {}", order_id)))?;
    tracing::info!("Fetching payment for order");

    let payment = state.service.get_by_order_id(order_id).await?;
    tracing::debug!(?payment, "Fetched payment details for order");
    Ok(Json(payment))
}

/// Update payment status (admin).
#[tracing::instrument(skip(state, path, params), fields(payment_id))]
pub async fn update_payment_status<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
    params: Result<Query<UpdateStatusParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    tracing::Span::current().record("payment_id", id.as_str());
    let payment_id = parse_payment_id(&id)?;
    let Query(params) = params?;
    tracing::info!(status = %params.status, "Updating payment status");

    let payment = state
        .service
        .update_status(payment_id, &params.status)
        .await?;
    tracing::info!(status = %payment.status, "Payment status updated");
    Ok(Json(payment))
}

/// List all payments (admin).
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Fetching all payments");
    let payments = state.service.list_all().await?;
    tracing::debug!(count = payments.len(), "Total payments fetched");
    Ok(Json(payments))
}
