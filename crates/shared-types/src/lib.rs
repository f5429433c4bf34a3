//! # Shared Types Crate
//!
//! This crate contains the domain entities and error types shared across
//! the Diamond Arena service crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Wire Fidelity**: Serde renames match the camelCase field names of the
//!   hosted store tree (`referCode`, `greenDiamondBalance`, `joinedAt`, ...),
//!   so a struct round-trips against production data unchanged.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
