//! Idempotency-guarded key-value store.
//!
//! Maps a domain key to a domain record and, separately, a client-supplied
//! idempotency key to the fingerprint of the request that first used it plus
//! the domain key it produced. Reusing a key with an equal fingerprint
//! replays the stored record; reusing it with a different fingerprint is a
//! [`IdempotencyError::KeyConflict`].
//!
//! Both the order service and the payment authority run their own instance
//! of this store over their own record type.

mod error;
mod fingerprint;
mod store;

pub use error::{IdempotencyError, Result};
pub use fingerprint::Fingerprint;
pub use store::{IdempotencyStore, Record};
