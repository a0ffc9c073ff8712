//! The order orchestration workflow.

use chrono::Utc;
use common::{IdempotencyKey, ItemId, OrderId};
use domain::{Order, OrderLine, OrderPayment, OrderStore, PaymentRequest, items_fingerprint};

use crate::error::{Result, WorkflowError};
use crate::gateways::{CatalogGateway, PaymentGateway};

/// Orchestrates create-order requests.
///
/// One run: dedup check, catalog resolution, a single payment authorization
/// with the caller's idempotency key propagated, then the terminal write
/// through the idempotency-guarded order store. No lock is held across a
/// collaborator round trip; atomicity lives inside the store.
pub struct OrderWorkflow<C, P> {
    orders: OrderStore,
    catalog: C,
    payment: P,
}

impl<C, P> OrderWorkflow<C, P>
where
    C: CatalogGateway,
    P: PaymentGateway,
{
    /// Creates a workflow with a fresh order store.
    pub fn new(catalog: C, payment: P) -> Self {
        Self {
            orders: OrderStore::new(),
            catalog,
            payment,
        }
    }

    /// The order store, for lookups by order id.
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// Runs one create-order attempt.
    ///
    /// Returns the persisted order and a flag that is true when this call
    /// created it and false on an idempotent replay. A replay re-executes
    /// no collaborator calls.
    ///
    /// Once a payment call has failed, the failed order is the durable
    /// result for the key: later retries replay it rather than re-attempt
    /// payment.
    #[tracing::instrument(skip(self, item_ids), fields(%key, items = item_ids.len()))]
    pub async fn place_order(
        &self,
        key: &IdempotencyKey,
        item_ids: &[ItemId],
    ) -> Result<(Order, bool)> {
        if item_ids.is_empty() {
            return Err(WorkflowError::EmptyItems);
        }

        let fingerprint = items_fingerprint(item_ids);

        // Dedup before any collaborator call: a completed run under this
        // key short-circuits the whole workflow.
        if let Some(existing) = self.orders.replay(key, &fingerprint).await? {
            metrics::counter!("orders_replayed_total").increment(1);
            tracing::info!(order_id = %existing.id, "idempotent replay, skipping collaborators");
            return Ok((existing, false));
        }

        // Resolve every item; an unknown id or a catalog outage aborts
        // before anything is written, so the key stays unbound.
        let mut lines = Vec::with_capacity(item_ids.len());
        for &item_id in item_ids {
            let item = self
                .catalog
                .item(item_id)
                .await
                .map_err(WorkflowError::Catalog)?
                .ok_or(WorkflowError::UnknownItem(item_id))?;
            lines.push(OrderLine {
                item_id,
                name: item.name,
                unit_price: item.price,
            });
        }
        let total_amount = lines.iter().map(|line| line.unit_price).sum();

        let order_id = OrderId::new();
        let request = PaymentRequest {
            order_id,
            amount: total_amount,
        };

        let order = match self.payment.authorize(&request, key).await {
            Ok(payment) => Order::record(
                order_id,
                lines,
                Some(OrderPayment {
                    payment_id: payment.id,
                    status: payment.status,
                }),
                Utc::now(),
            ),
            Err(source) => {
                // The order id has already been communicated to the payment
                // authority, so the failure is recorded rather than
                // discarded; this failed order becomes the durable result
                // for the key.
                tracing::error!(%order_id, error = %source, "payment authorization failed");
                let failed = Order::record(order_id, lines, None, Utc::now());
                let (recorded, created) = self
                    .orders
                    .resolve_or_create(key, fingerprint, || failed)
                    .await?;
                if !created {
                    // A concurrent duplicate completed first; its outcome
                    // wins and this call behaves as a replay.
                    return Ok((recorded, false));
                }
                metrics::counter!("orders_payment_failures_total").increment(1);
                return Err(WorkflowError::PaymentFailed { order_id, source });
            }
        };

        let (recorded, created) = self
            .orders
            .resolve_or_create(key, fingerprint, || order)
            .await?;
        if created {
            metrics::counter!("orders_created_total").increment(1);
            tracing::info!(order_id = %recorded.id, status = %recorded.status, "order recorded");
        } else {
            metrics::counter!("orders_replayed_total").increment(1);
        }
        Ok((recorded, created))
    }
}
