//! # site_shell
//!
//! Navigation shell for the AurumGate front end: wallet display state,
//! status pills, the fixed route table with its static page registry, and
//! header/footer view models. Everything here is pure rendering of
//! supplied state; wallet and reserve data arrive from outside.

pub mod routes;
pub mod views;
pub mod wallet;

pub use routes::Route;
pub use views::{FooterView, HeaderView, NavLink, PorBadge, StatusPill, WalletControl};
pub use wallet::{truncate_address, WalletDisplayState, WalletMode};

/// Brand name shown in the header and footer.
pub const APP_NAME: &str = "AurumGate";

/// Footer tagline under the brand.
pub const TAGLINE: &str = "Private placement • Gold-backed • Vault audited";
