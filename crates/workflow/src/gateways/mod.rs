//! Collaborator gateway traits with HTTP and in-memory implementations.

pub mod catalog;
pub mod payment;

use thiserror::Error;

pub use catalog::{CatalogGateway, HttpCatalogGateway, InMemoryCatalogGateway};
pub use payment::{HttpPaymentGateway, InMemoryPaymentGateway, PaymentGateway};

/// Errors from a collaborator round trip.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator answered with an unexpected status code.
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16 },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GatewayError::UnexpectedStatus {
                status: status.as_u16(),
            },
            None => GatewayError::Transport(err.to_string()),
        }
    }
}
