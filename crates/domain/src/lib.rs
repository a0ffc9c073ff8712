//! Domain layer: order and payment records, the payment authorization
//! decision, request fingerprinting, and the in-process stores built on the
//! idempotency-guarded store.

pub mod catalog;
pub mod order;
pub mod payment;

pub use catalog::{CatalogItem, CatalogStore};
pub use order::{Order, OrderLine, OrderPayment, OrderStatus, OrderStore, items_fingerprint};
pub use payment::{Payment, PaymentRequest, PaymentStatus, PaymentStore, decide};
