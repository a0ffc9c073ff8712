//! Payment records, the authorization decision, and the payment authority's
//! idempotency-guarded store.

use chrono::{DateTime, Utc};
use common::{IdempotencyKey, OrderId, PaymentId};
use idempotency::{Fingerprint, IdempotencyStore, Record, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a payment authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Declined,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Authorized => write!(f, "Authorized"),
            PaymentStatus::Declined => write!(f, "Declined"),
        }
    }
}

/// Authorization decision for a requested amount.
///
/// This is a policy stub standing in for a real risk engine, isolated here
/// as the single substitutable decision point: positive amounts are
/// authorized, everything else is declined.
pub fn decide(amount: Decimal) -> PaymentStatus {
    if amount > Decimal::ZERO {
        PaymentStatus::Authorized
    } else {
        PaymentStatus::Declined
    }
}

/// Wire body of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: Decimal,
}

impl PaymentRequest {
    /// Canonical fingerprint of the request.
    ///
    /// Amounts are normalized so `6.25` and `6.250` fingerprint identically.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(format!(
            "{}:{}",
            self.order_id.as_uuid().simple(),
            self.amount.normalize()
        ))
    }
}

/// A recorded payment authorization. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        self.id
    }
}

/// The payment authority's store: idempotency-guarded payment creation.
#[derive(Debug, Clone, Default)]
pub struct PaymentStore {
    store: IdempotencyStore<Payment>,
}

impl PaymentStore {
    /// Creates an empty payment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorizes the requested amount, creating at most one payment per
    /// distinct idempotency key.
    ///
    /// Replays with an equal request return the original payment with the
    /// created flag unset; reuse with a different request is a
    /// [`idempotency::IdempotencyError::KeyConflict`].
    #[tracing::instrument(skip(self), fields(order_id = %request.order_id))]
    pub async fn authorize(
        &self,
        key: &IdempotencyKey,
        request: &PaymentRequest,
    ) -> Result<(Payment, bool)> {
        let fingerprint = request.fingerprint();
        let (payment, created) = self
            .store
            .resolve_or_create(key, fingerprint, || {
                let status = decide(request.amount);
                Payment {
                    id: PaymentId::new(),
                    order_id: request.order_id,
                    amount: request.amount,
                    status,
                    created_at: Utc::now(),
                }
            })
            .await?;

        if created {
            match payment.status {
                PaymentStatus::Authorized => {
                    metrics::counter!("payments_authorized_total").increment(1);
                }
                PaymentStatus::Declined => {
                    metrics::counter!("payments_declined_total").increment(1);
                }
            }
            tracing::info!(payment_id = %payment.id, status = %payment.status, "payment created");
        } else {
            metrics::counter!("payments_replayed_total").increment(1);
        }

        Ok((payment, created))
    }

    /// Looks up a payment by id.
    pub async fn get(&self, id: PaymentId) -> Option<Payment> {
        self.store.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use idempotency::IdempotencyError;
    use rust_decimal_macros::dec;

    use super::*;

    fn key(s: &str) -> IdempotencyKey {
        IdempotencyKey::new(s).unwrap()
    }

    #[test]
    fn positive_amounts_are_authorized() {
        assert_eq!(decide(dec!(0.01)), PaymentStatus::Authorized);
        assert_eq!(decide(dec!(6.25)), PaymentStatus::Authorized);
    }

    #[test]
    fn zero_and_negative_amounts_are_declined() {
        assert_eq!(decide(dec!(0)), PaymentStatus::Declined);
        assert_eq!(decide(dec!(-1.00)), PaymentStatus::Declined);
    }

    #[test]
    fn fingerprint_normalizes_amount() {
        let order_id = OrderId::new();
        let a = PaymentRequest {
            order_id,
            amount: dec!(6.25),
        };
        let b = PaymentRequest {
            order_id,
            amount: dec!(6.250),
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_amounts_and_orders() {
        let order_id = OrderId::new();
        let base = PaymentRequest {
            order_id,
            amount: dec!(6.25),
        };
        let other_amount = PaymentRequest {
            order_id,
            amount: dec!(6.26),
        };
        let other_order = PaymentRequest {
            order_id: OrderId::new(),
            amount: dec!(6.25),
        };
        assert_ne!(base.fingerprint(), other_amount.fingerprint());
        assert_ne!(base.fingerprint(), other_order.fingerprint());
    }

    #[tokio::test]
    async fn authorize_creates_payment_once_per_key() {
        let store = PaymentStore::new();
        let request = PaymentRequest {
            order_id: OrderId::new(),
            amount: dec!(6.25),
        };
        let k = key("K1");

        let (first, created) = store.authorize(&k, &request).await.unwrap();
        assert!(created);
        assert_eq!(first.status, PaymentStatus::Authorized);
        assert_eq!(first.amount, dec!(6.25));

        let (replayed, created) = store.authorize(&k, &request).await.unwrap();
        assert!(!created);
        assert_eq!(replayed, first);

        assert_eq!(store.get(first.id).await, Some(first));
    }

    #[tokio::test]
    async fn authorize_rejects_key_reuse_with_different_request() {
        let store = PaymentStore::new();
        let k = key("K1");
        let request = PaymentRequest {
            order_id: OrderId::new(),
            amount: dec!(6.25),
        };
        store.authorize(&k, &request).await.unwrap();

        let different = PaymentRequest {
            amount: dec!(9.99),
            ..request
        };
        let result = store.authorize(&k, &different).await;
        assert!(matches!(result, Err(IdempotencyError::KeyConflict { .. })));
    }

    #[tokio::test]
    async fn declined_payment_is_still_recorded() {
        let store = PaymentStore::new();
        let request = PaymentRequest {
            order_id: OrderId::new(),
            amount: dec!(0),
        };

        let (payment, created) = store.authorize(&key("K1"), &request).await.unwrap();
        assert!(created);
        assert_eq!(payment.status, PaymentStatus::Declined);
        assert_eq!(store.get(payment.id).await, Some(payment));
    }

    #[test]
    fn payment_serializes_camel_case() {
        let payment = Payment {
            id: PaymentId::new(),
            order_id: OrderId::new(),
            amount: dec!(6.25),
            status: PaymentStatus::Authorized,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&payment).unwrap();
        assert!(json.get("orderId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "Authorized");
        assert_eq!(json["amount"], "6.25");
    }
}
