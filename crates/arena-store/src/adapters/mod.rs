//! Store adapters.
//!
//! `FirebaseRtdb` speaks the RTDB REST protocol and is the production
//! backend; `MemoryStore` implements the same port over an in-process JSON
//! tree for tests.

pub mod firebase;
pub mod memory;

pub use firebase::FirebaseRtdb;
pub use memory::MemoryStore;

use crate::ports::CHILD_KEY;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current epoch milliseconds. Clock-before-epoch returns 0 rather than
/// panicking; this should never happen in practice.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Generate a push key: a millisecond timestamp prefix keeps keys sortable
/// by creation time (the property tournament/history listings rely on), a
/// random suffix keeps them unique. Both adapters generate keys client-side,
/// the same way the hosted store's SDK does.
pub(crate) fn push_key() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("-{:011x}{}", now_millis(), &suffix[..8])
}

/// Replace every field equal to the [`CHILD_KEY`] sentinel with the
/// generated key, at any depth.
pub(crate) fn substitute_child_key(value: &mut Value, key: &str) {
    match value {
        Value::String(s) if s == CHILD_KEY => *value = Value::String(key.to_string()),
        Value::Object(map) => {
            for child in map.values_mut() {
                substitute_child_key(child, key);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                substitute_child_key(child, key);
            }
        }
        _ => {}
    }
}
