//! # Payments Hex
//!
//! Application service layer and HTTP adapter for the payments service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation and status rules)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated OpenAPI document
//!
//! The service is generic over `R: PaymentRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::PaymentService;
