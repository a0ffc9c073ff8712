//! Order orchestration: turns one create-order request into a persisted
//! order via catalog lookups and a single payment authorization, guarded by
//! the idempotency store so retries never double-charge or double-create.

mod error;
pub mod gateways;
mod orchestrator;

pub use error::{Result, WorkflowError};
pub use gateways::{
    CatalogGateway, GatewayError, HttpCatalogGateway, HttpPaymentGateway, InMemoryCatalogGateway,
    InMemoryPaymentGateway, PaymentGateway,
};
pub use orchestrator::OrderWorkflow;
