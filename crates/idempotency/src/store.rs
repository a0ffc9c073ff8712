use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use common::IdempotencyKey;
use tokio::sync::RwLock;

use crate::{Fingerprint, IdempotencyError, Result};

/// A domain record that can be stored and addressed by its own id.
pub trait Record: Clone + Send + Sync {
    /// The domain key type (order id, payment id).
    type Id: Copy + Eq + Hash + Send + Sync + std::fmt::Debug + std::fmt::Display;

    /// Returns the record's domain key.
    fn id(&self) -> Self::Id;
}

/// What an idempotency key was bound to on first use.
#[derive(Debug, Clone)]
struct Binding<I> {
    fingerprint: Fingerprint,
    target: I,
}

#[derive(Debug)]
struct Inner<R: Record> {
    records: HashMap<R::Id, R>,
    bindings: HashMap<IdempotencyKey, Binding<R::Id>>,
}

/// In-memory store providing exactly-once semantics for create operations.
///
/// Holds two maps: domain key → record, and idempotency key → (fingerprint,
/// domain key). Both are guarded by a single lock so the three-way branch in
/// [`resolve_or_create`](IdempotencyStore::resolve_or_create) is atomic with
/// respect to concurrent calls on the same key. The lock is never held
/// across an await point, so callers must not run collaborator round trips
/// inside the factory.
///
/// State lives for the lifetime of the process; bindings are permanent once
/// written.
#[derive(Debug, Clone)]
pub struct IdempotencyStore<R: Record> {
    inner: Arc<RwLock<Inner<R>>>,
}

impl<R: Record> Default for IdempotencyStore<R> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: HashMap::new(),
                bindings: HashMap::new(),
            })),
        }
    }
}

impl<R: Record> IdempotencyStore<R> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally stores the record under its own id.
    ///
    /// Used for terminal writes that are not themselves idempotency-keyed.
    /// Visible to all subsequent [`get`](IdempotencyStore::get) calls.
    pub async fn put(&self, record: R) {
        let mut inner = self.inner.write().await;
        inner.records.insert(record.id(), record);
    }

    /// Looks up a record by domain key. No side effects.
    pub async fn get(&self, id: R::Id) -> Option<R> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Pre-flight dedup check: returns the record previously bound to `key`.
    ///
    /// - `Ok(Some(record))` — the key was seen before with an equal
    ///   fingerprint; the caller should replay this record without
    ///   re-executing any side effects.
    /// - `Ok(None)` — the key is unseen (or its record is not yet visible);
    ///   the caller may proceed.
    /// - `Err(KeyConflict)` — the key was bound to a different fingerprint.
    pub async fn replay(
        &self,
        key: &IdempotencyKey,
        fingerprint: &Fingerprint,
    ) -> Result<Option<R>> {
        let inner = self.inner.read().await;
        match inner.bindings.get(key) {
            Some(binding) if binding.fingerprint == *fingerprint => {
                Ok(inner.records.get(&binding.target).cloned())
            }
            Some(_) => Err(IdempotencyError::KeyConflict { key: key.clone() }),
            None => Ok(None),
        }
    }

    /// Resolves `key` to its bound record, creating one via `factory` on
    /// first use.
    ///
    /// Returns the record plus a flag that is true only for the call whose
    /// factory result was stored. If two calls race on the same new key,
    /// exactly one factory invocation wins; the loser observes the winner's
    /// record as if it had arrived second. Reuse with a different
    /// fingerprint fails with [`IdempotencyError::KeyConflict`] and creates
    /// nothing.
    pub async fn resolve_or_create<F>(
        &self,
        key: &IdempotencyKey,
        fingerprint: Fingerprint,
        factory: F,
    ) -> Result<(R, bool)>
    where
        F: FnOnce() -> R,
    {
        let mut inner = self.inner.write().await;

        if let Some(binding) = inner.bindings.get(key) {
            if binding.fingerprint != fingerprint {
                return Err(IdempotencyError::KeyConflict { key: key.clone() });
            }
            if let Some(existing) = inner.records.get(&binding.target) {
                tracing::debug!(%key, id = %existing.id(), "idempotent replay");
                return Ok((existing.clone(), false));
            }
        }

        let record = factory();
        let id = record.id();
        inner.bindings.insert(
            key.clone(),
            Binding {
                fingerprint,
                target: id,
            },
        );
        inner.records.insert(id, record.clone());
        tracing::debug!(%key, %id, "bound idempotency key");
        Ok((record, true))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Receipt {
        id: u64,
        note: String,
    }

    impl Record for Receipt {
        type Id = u64;

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn key(s: &str) -> IdempotencyKey {
        IdempotencyKey::new(s).unwrap()
    }

    fn receipt(id: u64, note: &str) -> Receipt {
        Receipt {
            id,
            note: note.to_string(),
        }
    }

    #[tokio::test]
    async fn put_then_get_returns_record() {
        let store = IdempotencyStore::new();
        store.put(receipt(1, "first")).await;

        assert_eq!(store.get(1).await, Some(receipt(1, "first")));
        assert_eq!(store.get(2).await, None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_record() {
        let store = IdempotencyStore::new();
        store.put(receipt(1, "first")).await;
        store.put(receipt(1, "second")).await;

        assert_eq!(store.get(1).await, Some(receipt(1, "second")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn first_use_of_key_invokes_factory() {
        let store = IdempotencyStore::new();

        let (record, created) = store
            .resolve_or_create(&key("K1"), Fingerprint::new("a"), || receipt(7, "fresh"))
            .await
            .unwrap();

        assert!(created);
        assert_eq!(record.id, 7);
        assert_eq!(store.get(7).await, Some(record));
    }

    #[tokio::test]
    async fn replay_with_equal_fingerprint_returns_same_record() {
        let store = IdempotencyStore::new();
        let k = key("K1");

        let (first, _) = store
            .resolve_or_create(&k, Fingerprint::new("a"), || receipt(7, "fresh"))
            .await
            .unwrap();

        let calls = AtomicUsize::new(0);
        let (second, created) = store
            .resolve_or_create(&k, Fingerprint::new("a"), || {
                calls.fetch_add(1, Ordering::SeqCst);
                receipt(8, "should not exist")
            })
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reuse_with_different_fingerprint_is_conflict() {
        let store = IdempotencyStore::new();
        let k = key("K1");

        store
            .resolve_or_create(&k, Fingerprint::new("a"), || receipt(7, "fresh"))
            .await
            .unwrap();

        let result = store
            .resolve_or_create(&k, Fingerprint::new("b"), || receipt(8, "other"))
            .await;

        assert_eq!(
            result,
            Err(IdempotencyError::KeyConflict { key: k.clone() })
        );
        // The original binding is untouched.
        let (record, created) = store
            .resolve_or_create(&k, Fingerprint::new("a"), || receipt(9, "third"))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(record.id, 7);
    }

    #[tokio::test]
    async fn replay_check_sees_bound_record() {
        let store = IdempotencyStore::new();
        let k = key("K1");

        assert_eq!(store.replay(&k, &Fingerprint::new("a")).await, Ok(None));

        store
            .resolve_or_create(&k, Fingerprint::new("a"), || receipt(7, "fresh"))
            .await
            .unwrap();

        assert_eq!(
            store.replay(&k, &Fingerprint::new("a")).await,
            Ok(Some(receipt(7, "fresh")))
        );
        assert_eq!(
            store.replay(&k, &Fingerprint::new("b")).await,
            Err(IdempotencyError::KeyConflict { key: k })
        );
    }

    #[tokio::test]
    async fn distinct_keys_are_independent() {
        let store = IdempotencyStore::new();

        let (a, _) = store
            .resolve_or_create(&key("K1"), Fingerprint::new("a"), || receipt(1, "one"))
            .await
            .unwrap();
        let (b, _) = store
            .resolve_or_create(&key("K2"), Fingerprint::new("a"), || receipt(2, "two"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_calls_on_same_key_create_exactly_once() {
        let store: IdempotencyStore<Receipt> = IdempotencyStore::new();
        let factory_calls = Arc::new(AtomicUsize::new(0));
        let k = key("RACE");

        let mut handles = Vec::new();
        for i in 0..16u64 {
            let store = store.clone();
            let k = k.clone();
            let factory_calls = factory_calls.clone();
            handles.push(tokio::spawn(async move {
                store
                    .resolve_or_create(&k, Fingerprint::new("a"), || {
                        factory_calls.fetch_add(1, Ordering::SeqCst);
                        receipt(100 + i, "racer")
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut winners = 0;
        let mut ids = Vec::new();
        for handle in handles {
            let (record, created) = handle.await.unwrap();
            if created {
                winners += 1;
            }
            ids.push(record.id);
        }

        assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(winners, 1);
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len().await, 1);
    }
}
