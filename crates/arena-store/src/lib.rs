//! # Arena Store
//!
//! Port and adapters for the hosted real-time document store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  arena-core workflows                │
//! └───────────────────────────┬──────────────────────────┘
//!                             │ Arc<dyn DocumentStore>
//!                 ┌───────────┴───────────┐
//!                 ▼                       ▼
//!          FirebaseRtdb              MemoryStore
//!        (REST, production)         (tests, fakes)
//! ```
//!
//! The port exposes exactly the primitives the store provides natively:
//! point reads, partial-field patches, atomic numeric increments, push-key
//! appends, a single-key optimistic read-modify-write transaction, and an
//! indexed equality query. Everything richer (workflow sequencing, invariant
//! enforcement) belongs to the callers.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{FirebaseRtdb, MemoryStore};
pub use domain::config::{ConfigError, StoreConfig};
pub use domain::path::StorePath;
pub use ports::{DocumentStore, TxnDecision, TxnOutcome, UpdateFn, CHILD_KEY};
