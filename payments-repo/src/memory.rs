//! In-memory repository adapter backed by concurrent hash maps.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use payments_types::{
    OrderId, Payment, PaymentId, PaymentRepository, PaymentRequest, PaymentStatus, RepoError,
};

/// Non-persistent repository for development and tests.
#[derive(Default)]
pub struct MemoryRepo {
    payments: DashMap<PaymentId, Payment>,
    by_order: DashMap<OrderId, PaymentId>,
    last_id: AtomicI64,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for MemoryRepo {
    async fn create_payment(&self, req: PaymentRequest) -> Result<Payment, RepoError> {
        // The order entry stays locked until the payment is stored.
        match self.by_order.entry(req.order_id) {
            Entry::Occupied(_) => Err(RepoError::Conflict(format!(
                "Payment already exists for order {}",
                req.order_id
            ))),
            Entry::Vacant(slot) => {
                let id = PaymentId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
                let now = chrono::Utc::now();
                let payment = Payment {
                    id,
                    order_id: req.order_id,
                    amount: req.amount,
                    method: req.method,
                    status: PaymentStatus::Pending,
                    reference: req.reference,
                    created_at: now,
                    updated_at: now,
                };
                self.payments.insert(id, payment.clone());
                slot.insert(id);
                Ok(payment)
            }
        }
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(&id).map(|p| p.value().clone()))
    }

    async fn get_payment_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepoError> {
        let Some(id) = self.by_order.get(&order_id).map(|id| *id) else {
            return Ok(None);
        };
        self.get_payment(id).await
    }

    async fn update_payment_status(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, RepoError> {
        let Some(mut payment) = self.payments.get_mut(&id) else {
            return Ok(None);
        };

        if payment.status != expected {
            return Err(RepoError::Conflict(format!(
                "Payment {} is {}, expected {}",
                id, payment.status, expected
            )));
        }

        payment.status = status;
        payment.updated_at = chrono::Utc::now();
        Ok(Some(payment.value().clone()))
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, RepoError> {
        let mut payments: Vec<Payment> = self.payments.iter().map(|p| p.value().clone()).collect();
        payments.sort_by_key(|p| p.id);
        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(order_id: i64, amount: i64) -> PaymentRequest {
        PaymentRequest::new(OrderId::new(order_id), amount)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryRepo::new();

        let first = repo.create_payment(request(42, 100)).await.unwrap();
        let second = repo.create_payment(request(43, 250)).await.unwrap();

        assert_eq!(first.id, PaymentId::new(1));
        assert_eq!(second.id, PaymentId::new(2));
        assert_eq!(first.status, PaymentStatus::Pending);
        assert_eq!(first.order_id, OrderId::new(42));
    }

    #[tokio::test]
    async fn test_duplicate_order_conflicts() {
        let repo = MemoryRepo::new();
        repo.create_payment(request(42, 100)).await.unwrap();

        let result = repo.create_payment(request(42, 100)).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
        assert_eq!(repo.list_payments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_order() {
        let repo = MemoryRepo::new();
        let created = repo.create_payment(request(7, 500)).await.unwrap();

        let found = repo.get_payment_by_order(OrderId::new(7)).await.unwrap();
        let missing = repo.get_payment_by_order(OrderId::new(8)).await.unwrap();

        assert_eq!(found, Some(created));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_status_checks_expected() {
        let repo = MemoryRepo::new();
        let created = repo.create_payment(request(1, 100)).await.unwrap();

        let updated = repo
            .update_payment_status(created.id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, PaymentStatus::Paid);

        let stale = repo
            .update_payment_status(created.id, PaymentStatus::Pending, PaymentStatus::Failed)
            .await;
        assert!(matches!(stale, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_payment() {
        let repo = MemoryRepo::new();

        let result = repo
            .update_payment_status(PaymentId::new(99), PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = MemoryRepo::new();
        for order in [30, 10, 20] {
            repo.create_payment(request(order, 100)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .list_payments()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.value())
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }
}
