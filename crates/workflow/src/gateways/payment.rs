//! Payment collaborator gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::IdempotencyKey;
use domain::{Payment, PaymentRequest, PaymentStore};
use idempotency::IdempotencyError;

use super::GatewayError;

/// Header carrying the idempotency key on authorization requests.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Payment authorization against the payment authority.
///
/// The idempotency key is propagated so the authority can dedup retries
/// independently of the order service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Requests authorization for the given amount, exactly-once per key.
    async fn authorize(
        &self,
        request: &PaymentRequest,
        key: &IdempotencyKey,
    ) -> Result<Payment, GatewayError>;
}

/// HTTP client for the payment authority.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentGateway {
    /// Creates a gateway talking to the payment authority at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn authorize(
        &self,
        request: &PaymentRequest,
        key: &IdempotencyKey,
    ) -> Result<Payment, GatewayError> {
        let url = format!("{}/payments", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(IDEMPOTENCY_KEY_HEADER, key.as_str())
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let payment = response.json::<Payment>().await?;
        Ok(payment)
    }
}

/// In-memory payment gateway over a real [`PaymentStore`], for tests and
/// local single-process wiring.
///
/// Because it wraps the authority's actual store, replays and key conflicts
/// behave exactly as they would over HTTP.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    store: PaymentStore,
    unavailable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryPaymentGateway {
    /// Creates a gateway over the given payment store.
    pub fn new(store: PaymentStore) -> Self {
        Self {
            store,
            unavailable: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes every subsequent authorization fail with a transport error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of authorization attempts so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn authorize(
        &self,
        request: &PaymentRequest,
        key: &IdempotencyKey,
    ) -> Result<Payment, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport(
                "payment authority unavailable".to_string(),
            ));
        }

        match self.store.authorize(key, request).await {
            Ok((payment, _created)) => Ok(payment),
            Err(IdempotencyError::KeyConflict { .. }) => {
                Err(GatewayError::UnexpectedStatus { status: 409 })
            }
        }
    }
}
