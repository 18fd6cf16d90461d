//! # por_adapter
//!
//! Pinned read-only interface to the AurumGate Proof-of-Reserve adapter
//! contract, plus the reserve-status reducer and display derivation. All
//! call targets are hardcoded signatures — no user-supplied selectors or
//! arbitrary call forwarding.

pub mod calls;
pub mod constants;
pub mod status;

pub use constants::*;
