//! # Diamond Arena Test Suite
//!
//! End-to-end flows driving the real router over the in-memory store
//! adapter, covering the wallet/referral/tournament consistency properties
//! the service guarantees.

pub mod integration;
