//! Shared identifier types used across the order system crates.

mod types;

pub use types::{BlankIdempotencyKey, IdempotencyKey, ItemId, OrderId, PaymentId};
