//! # consent
//!
//! Cookie-consent record, persistent store, and the banner/panel state
//! machine for the AurumGate front end. The store is an explicit object
//! injected into the controller, so the state machine is testable against
//! the in-memory implementation.

mod controller;
mod store;

pub use controller::{BannerState, ConsentController};
pub use store::{ConsentRecord, ConsentStore, FileStore, MemoryStore, StoreError, CONSENT_KEY};
