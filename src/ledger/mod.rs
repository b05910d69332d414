//! Ledger state machine.
//!
//! - `core`: the `Ledger` struct, slot addressing and non-mutating reads
//! - `ops`: the mutating operations and their invariants

pub mod core;
pub mod ops;

pub use core::{FcdInitPolicy, Ledger};
