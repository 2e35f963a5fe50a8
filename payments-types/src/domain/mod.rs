//! Domain models for the payment service.

pub mod payment;

pub use payment::{OrderId, Payment, PaymentId, PaymentMethod, PaymentStatus};
