//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Unique identifier for a Payment, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wraps a raw database identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of the order a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, waiting for settlement
    Pending,
    /// Settled successfully
    Paid,
    /// Settlement failed; may be retried
    Failed,
    /// Money returned to the customer
    Refunded,
}

impl PaymentStatus {
    /// Whether a payment in this status may move to `next`.
    ///
    /// Staying in the same status is always allowed.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;

        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (Pending, Paid) | (Pending, Failed) | (Failed, Pending) | (Paid, Refunded)
        )
    }

    /// Checks the transition, returning the target status on success.
    pub fn transition_to(self, next: PaymentStatus) -> Result<PaymentStatus, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl AsRef<str> for PaymentStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "FAILED" => Ok(Self::Failed),
            "REFUNDED" => Ok(Self::Refunded),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    NetBanking,
    Wallet,
    CashOnDelivery,
}

impl AsRef<str> for PaymentMethod {
    fn as_ref(&self) -> &str {
        match self {
            Self::Card => "CARD",
            Self::Upi => "UPI",
            Self::NetBanking => "NET_BANKING",
            Self::Wallet => "WALLET",
            Self::CashOnDelivery => "CASH_ON_DELIVERY",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "CARD" => Ok(Self::Card),
            "UPI" => Ok(Self::Upi),
            "NET_BANKING" => Ok(Self::NetBanking),
            "WALLET" => Ok(Self::Wallet),
            "CASH_ON_DELIVERY" => Ok(Self::CashOnDelivery),
            _ => Err(DomainError::ValidationError(format!(
                "Unknown payment method: {}",
                s
            ))),
        }
    }
}

/// A payment recorded against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Order this payment settles
    pub order_id: OrderId,
    /// Amount in smallest currency unit
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// External reference (e.g., gateway transaction id)
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(
            " Refunded ".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Refunded
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "SHIPPED".parse::<PaymentStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(s) if s == "SHIPPED"));
    }

    #[test]
    fn test_status_display_matches_wire_format() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(PaymentStatus::Failed.can_transition_to(PaymentStatus::Pending));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));
    }

    #[test]
    fn test_same_status_is_always_allowed() {
        assert!(PaymentStatus::Refunded.can_transition_to(PaymentStatus::Refunded));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Paid));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Failed));

        let err = PaymentStatus::Pending
            .transition_to(PaymentStatus::Refunded)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: PaymentStatus::Pending,
                to: PaymentStatus::Refunded
            }
        ));
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(
            "net-banking".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::NetBanking
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_ids_parse_from_path_segments() {
        assert_eq!("42".parse::<OrderId>().unwrap(), OrderId::new(42));
        assert_eq!("7".parse::<PaymentId>().unwrap().value(), 7);
        assert!("abc".parse::<PaymentId>().is_err());
    }
}
