//! In-memory implementation of `DocumentStore` for testing.
//!
//! Holds the whole document tree as one `serde_json::Value` behind an
//! `RwLock`. The write lock is held across a conditional update, which
//! makes the read-modify-write genuinely atomic: interleaved tasks observe
//! the same semantics the hosted store's transaction primitive provides,
//! minus the retries.

use crate::adapters::{now_millis, push_key, substitute_child_key};
use crate::domain::path::StorePath;
use crate::ports::{DocumentStore, TxnDecision, TxnOutcome, UpdateFn};
use async_trait::async_trait;
use serde_json::{Map, Value};
use shared_types::StoreError;
use std::sync::RwLock;

/// In-memory document tree.
pub struct MemoryStore {
    tree: RwLock<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(Value::Object(Map::new())),
        }
    }

    /// Test helper: place `value` at `path`, resolving server values.
    pub fn seed(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        let mut tree = self.tree.write().map_err(|_| lock_poisoned())?;
        let node = entry(&mut tree, path);
        let mut value = value;
        resolve_server_values(&mut value, Some(&*node), now_millis());
        *node = value;
        Ok(())
    }

    /// Test helper: snapshot of the node at `path`.
    pub fn snapshot(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let tree = self.tree.read().map_err(|_| lock_poisoned())?;
        Ok(lookup(&tree, path).cloned())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let tree = self.tree.read().map_err(|_| lock_poisoned())?;
        Ok(lookup(&tree, path).cloned())
    }

    async fn patch(
        &self,
        path: &StorePath,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut tree = self.tree.write().map_err(|_| lock_poisoned())?;
        let node = entry(&mut tree, path);
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let now = now_millis();
        // Take the target map apart so each incoming field can be resolved
        // against the value it replaces.
        if let Value::Object(target) = node {
            for (key, mut value) in fields {
                resolve_server_values(&mut value, target.get(&key), now);
                target.insert(key, value);
            }
        }
        Ok(())
    }

    async fn increment(&self, path: &StorePath, delta: i64) -> Result<(), StoreError> {
        let mut tree = self.tree.write().map_err(|_| lock_poisoned())?;
        let node = entry(&mut tree, path);
        let current = node.as_i64().unwrap_or(0);
        *node = Value::from(current + delta);
        Ok(())
    }

    async fn append_child(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        let key = push_key();
        let mut value = value;
        substitute_child_key(&mut value, &key);
        resolve_server_values(&mut value, None, now_millis());

        let child_path = path.clone().child(&key)?;
        let mut tree = self.tree.write().map_err(|_| lock_poisoned())?;
        *entry(&mut tree, &child_path) = value;
        Ok(key)
    }

    async fn conditional_update(
        &self,
        path: &StorePath,
        apply: UpdateFn<'_>,
    ) -> Result<TxnOutcome, StoreError> {
        // The write lock spans read + apply + commit, so the compare-and-set
        // can never lose a race here; one attempt always suffices.
        let mut tree = self.tree.write().map_err(|_| lock_poisoned())?;
        let current = lookup(&tree, path).cloned();
        match apply(current.as_ref()) {
            TxnDecision::Abort => Ok(TxnOutcome::Aborted),
            TxnDecision::Commit(new_value) => {
                *entry(&mut tree, path) = new_value.clone();
                Ok(TxnOutcome::Committed { new_value })
            }
        }
    }

    async fn query_equal(
        &self,
        path: &StorePath,
        child_key: &str,
        equals: &str,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let tree = self.tree.read().map_err(|_| lock_poisoned())?;
        let Some(Value::Object(children)) = lookup(&tree, path) else {
            return Ok(Vec::new());
        };
        Ok(children
            .iter()
            .filter(|(_, child)| {
                child.get(child_key).and_then(Value::as_str) == Some(equals)
            })
            .map(|(key, child)| (key.clone(), child.clone()))
            .collect())
    }

    fn server_timestamp(&self) -> Value {
        serde_json::json!({ ".sv": "timestamp" })
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".into())
}

/// Resolve the node at `path`, treating null as absent.
fn lookup<'a>(root: &'a Value, path: &StorePath) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = node.get(segment)?;
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

/// Resolve the node at `path` for writing, creating intermediate objects.
fn entry<'a>(root: &'a mut Value, path: &StorePath) -> &'a mut Value {
    let mut node = root;
    for segment in path.segments() {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map.entry(segment.as_str()).or_insert(Value::Null),
            _ => unreachable!("coerced to object above"),
        };
    }
    node
}

/// Resolve `{".sv": ...}` placeholders the way the hosted store would:
/// `"timestamp"` becomes the store clock, `{"increment": n}` becomes the
/// existing numeric value plus n.
fn resolve_server_values(value: &mut Value, existing: Option<&Value>, now: i64) {
    if let Some(marker) = server_value(value) {
        *value = match marker {
            ServerValue::Timestamp => Value::from(now),
            ServerValue::Increment(delta) => {
                let base = existing.and_then(Value::as_i64).unwrap_or(0);
                Value::from(base + delta)
            }
        };
        return;
    }
    if let Value::Object(map) = value {
        for (key, child) in map.iter_mut() {
            resolve_server_values(child, existing.and_then(|e| e.get(key)), now);
        }
    }
}

enum ServerValue {
    Timestamp,
    Increment(i64),
}

fn server_value(value: &Value) -> Option<ServerValue> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    match map.get(".sv")? {
        Value::String(s) if s == "timestamp" => Some(ServerValue::Timestamp),
        Value::Object(inner) => inner
            .get("increment")
            .and_then(Value::as_i64)
            .map(ServerValue::Increment),
        _ => None,
    }
}
