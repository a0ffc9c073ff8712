use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for an order. Generated server-side, never reused.
    OrderId
}

uuid_id! {
    /// Unique identifier for a payment authorization.
    PaymentId
}

uuid_id! {
    /// Identifier of a catalog item.
    ItemId
}

/// Error returned when an idempotency key is empty or whitespace-only.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("idempotency key must not be blank")]
pub struct BlankIdempotencyKey;

/// Client-chosen opaque token identifying one logical request attempt.
///
/// Keys are compared by exact byte equality. Construction rejects blank
/// strings so downstream code can rely on a key being meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Creates a key from a client-supplied string, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Result<Self, BlankIdempotencyKey> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(BlankIdempotencyKey);
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for IdempotencyKey {
    type Error = BlankIdempotencyKey;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
