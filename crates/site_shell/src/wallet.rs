//! Wallet-connection display state.
//!
//! The shell never owns wallet state; a connection collaborator supplies
//! it and this module only formats it.

/// Externally supplied wallet state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletDisplayState {
    pub address: Option<String>,
    pub is_connected: bool,
    pub is_authenticated: bool,
}

/// `0x1234567890abcdef1234567890abcdef12345678` → `0x1234...5678`.
/// Anything ten characters or shorter is returned unchanged.
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => address.to_string(),
    }
}

/// The three mutually exclusive wallet UI modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletMode {
    /// No wallet: show the connect control.
    Disconnected,

    /// Connected but not signed in: truncated address plus sign-in.
    ConnectedUnauthenticated { address: String },

    /// Signed in: wallet menu keyed by the truncated address.
    ConnectedAuthenticated { address: String },
}

impl WalletMode {
    pub fn from_state(state: &WalletDisplayState) -> Self {
        if !state.is_connected {
            return WalletMode::Disconnected;
        }
        let address = truncate_address(state.address.as_deref().unwrap_or(""));
        if state.is_authenticated {
            WalletMode::ConnectedAuthenticated { address }
        } else {
            WalletMode::ConnectedUnauthenticated { address }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────
