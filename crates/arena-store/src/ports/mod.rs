//! The document-store port.
//!
//! Workflows hold an `Arc<dyn DocumentStore>` and never see an adapter
//! type. The trait surface is the store's native primitive set and nothing
//! more; cross-key atomicity in particular is *not* offered, because the
//! backing store does not have it.

use crate::domain::path::StorePath;
use async_trait::async_trait;
use serde_json::{Map, Value};
use shared_types::StoreError;

/// Sentinel value understood by [`DocumentStore::append_child`]: any field
/// whose value is exactly this string is replaced with the generated child
/// key at write time, letting a record embed its own key in a single write.
pub const CHILD_KEY: &str = "$key";

/// Result of applying the caller's closure inside a conditional update.
pub enum TxnDecision {
    /// Write this value if the node is unchanged since the read.
    Commit(Value),
    /// Leave the node untouched and stop.
    Abort,
}

/// Outcome of a conditional update that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxnOutcome {
    /// The value was committed.
    Committed { new_value: Value },
    /// The caller's closure aborted; nothing was written.
    Aborted,
}

/// Closure applied to the current node value inside a conditional update.
/// May run more than once if the commit loses the compare-and-set race.
pub type UpdateFn<'a> = &'a (dyn Fn(Option<&Value>) -> TxnDecision + Send + Sync);

/// The injected storage-port interface.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read. `None` for an absent (or null) node.
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError>;

    /// Partial-field update: merge `fields` into the object at `path`,
    /// creating it if absent. Server-value placeholders (`{".sv": ...}`)
    /// are resolved by the store.
    async fn patch(&self, path: &StorePath, fields: Map<String, Value>)
        -> Result<(), StoreError>;

    /// Atomic commutative increment of the numeric leaf at `path`
    /// (absent counts as 0). Safe under arbitrary concurrent increments.
    async fn increment(&self, path: &StorePath, delta: i64) -> Result<(), StoreError>;

    /// Append `value` under a freshly generated, time-ordered child key of
    /// `path` and return that key. See [`CHILD_KEY`] for key embedding.
    async fn append_child(&self, path: &StorePath, value: Value) -> Result<String, StoreError>;

    /// Single-key optimistic read-modify-write: read the node, apply the
    /// closure, and commit only if the stored value has not changed since
    /// the read; retry on conflict up to the configured bound.
    async fn conditional_update(
        &self,
        path: &StorePath,
        apply: UpdateFn<'_>,
    ) -> Result<TxnOutcome, StoreError>;

    /// Indexed equality query: children of `path` whose `child_key` field
    /// equals `equals`, in key order.
    async fn query_equal(
        &self,
        path: &StorePath,
        child_key: &str,
        equals: &str,
    ) -> Result<Vec<(String, Value)>, StoreError>;

    /// Placeholder the store resolves to its own clock at write time.
    /// Callers use this instead of their local clock for every persisted
    /// timestamp, avoiding clock-skew ordering bugs.
    fn server_timestamp(&self) -> Value;
}
