//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use payments_types::{OrderId, PaymentId, PaymentRequest, PaymentResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a payment for an order.
    pub async fn create_payment(&self, req: &PaymentRequest) -> Result<PaymentResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/payments"))
            .json(req)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/payments/{}", id)).await
    }

    /// Gets the payment recorded for an order.
    pub async fn get_payment_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/payments/order/{}", order_id)).await
    }

    /// Sets the status of a payment.
    pub async fn update_payment_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<PaymentResponse, ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/payments/admin/{}/status", id)))
            .query(&[("status", status)])
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Lists all payments.
    pub async fn list_payments(&self) -> Result<Vec<PaymentResponse>, ClientError> {
        self.get("/api/payments/admin").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentsClient::new("http://localhost:3000/");
        assert_eq!(client.url("/api/payments"), "http://localhost:3000/api/payments");
    }

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::Api {
            status: 404,
            message: "Payment 1 not found".into(),
        };
        assert!(err.is_not_found());

        let err = ClientError::Api {
            status: 409,
            message: "conflict".into(),
        };
        assert!(!err.is_not_found());
    }
}
