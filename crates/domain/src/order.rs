//! Order records and fingerprinting for create-order requests.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId, PaymentId};
use idempotency::{Fingerprint, IdempotencyStore, Record};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payment::PaymentStatus;

/// Terminal state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Recorded before any payment resolution. Not produced by the current
    /// workflow, which always resolves payment before persisting.
    Created,
    /// The payment authority authorized the full amount.
    PaymentAuthorized,
    /// Payment was declined or the payment call failed outright.
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "Created"),
            OrderStatus::PaymentAuthorized => write!(f, "PaymentAuthorized"),
            OrderStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// One line of an order: a snapshot of the catalog item at order time, not
/// a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Decimal,
}

/// Reference to the payment outcome attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayment {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
}

/// A persisted order. Immutable once recorded; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub payment: Option<OrderPayment>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds the terminal record for one workflow run.
    ///
    /// The total is computed from the lines so it always equals their sum,
    /// and the status is derived from the payment outcome: authorized
    /// payments yield `PaymentAuthorized`, everything else (declined or no
    /// outcome at all) yields `Failed`.
    pub fn record(
        id: OrderId,
        lines: Vec<OrderLine>,
        payment: Option<OrderPayment>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_amount = lines.iter().map(|line| line.unit_price).sum();
        let status = match payment {
            Some(p) if p.status == PaymentStatus::Authorized => OrderStatus::PaymentAuthorized,
            _ => OrderStatus::Failed,
        };
        Self {
            id,
            lines,
            total_amount,
            payment,
            status,
            created_at,
        }
    }
}

impl Record for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// The order service's idempotency-guarded store.
pub type OrderStore = IdempotencyStore<Order>;

/// Canonical fingerprint of a create-order request.
///
/// The item list is order-insensitive for dedup purposes, so ids are
/// sorted before encoding; the recorded order still preserves the request's
/// item order in its lines.
pub fn items_fingerprint(item_ids: &[ItemId]) -> Fingerprint {
    let mut ids: Vec<String> = item_ids
        .iter()
        .map(|id| id.as_uuid().simple().to_string())
        .collect();
    ids.sort();
    Fingerprint::new(ids.join(","))
}
