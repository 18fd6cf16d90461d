//! Header and footer view models.
//!
//! Plain serializable structs so any rendering layer can consume them;
//! composition happens here, state arrives from outside.

use serde::Serialize;

use crate::routes::{Route, COMMUNITY_URL, STATUS_PAGE_URL};
use crate::wallet::{WalletDisplayState, WalletMode};
use crate::{APP_NAME, TAGLINE};

/// One navigation entry; `external` marks links that leave the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub external: bool,
}

impl NavLink {
    fn internal(label: &str, route: Route) -> Self {
        Self {
            label: label.to_string(),
            href: route.path().to_string(),
            external: false,
        }
    }

    fn external(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            external: true,
        }
    }
}

/// Compact status indicator, rendered as `"<label>: <text>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPill {
    pub label: String,
    pub ok: bool,
    pub text: String,
}

impl StatusPill {
    pub fn new(label: &str, ok: bool, ok_text: &str, bad_text: &str) -> Self {
        Self {
            label: label.to_string(),
            ok,
            text: if ok { ok_text } else { bad_text }.to_string(),
        }
    }

    /// Proof-of-Reserve pill.
    pub fn por(healthy: bool) -> Self {
        Self::new("PoR", healthy, "Verified", "Degraded")
    }

    /// Network pill, labeled with the chain name.
    pub fn network(chain_name: &str, online: bool) -> Self {
        Self::new(chain_name, online, "Online", "Down")
    }

    /// Wallet pill; a guest session is labeled as such.
    pub fn wallet(connected: bool) -> Self {
        let label = if connected { "Wallet" } else { "Guest" };
        Self::new(label, connected, "Connected", "Not Connected")
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.label, self.text)
    }
}

/// PoR badge beside the header brand, shown when reserve data exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PorBadge {
    pub healthy: bool,
    pub text: String,
}

impl PorBadge {
    pub fn new(healthy: bool, coverage_ratio_percent: f64) -> Self {
        Self {
            healthy,
            text: format!("PoR: {coverage_ratio_percent:.1}%"),
        }
    }
}

/// Wallet control in the header, one per wallet mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalletControl {
    /// Disconnected: a single connect button.
    Connect,
    /// Connected, not signed in: address beside a sign-in button.
    SignIn { address: String },
    /// Signed in: dropdown menu with account actions.
    Menu {
        address: String,
        actions: Vec<String>,
    },
}

impl WalletControl {
    fn from_mode(mode: WalletMode) -> Self {
        match mode {
            WalletMode::Disconnected => WalletControl::Connect,
            WalletMode::ConnectedUnauthenticated { address } => WalletControl::SignIn { address },
            WalletMode::ConnectedAuthenticated { address } => WalletControl::Menu {
                address,
                actions: vec!["Copy Address".to_string(), "Disconnect".to_string()],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub brand: String,
    pub por_badge: Option<PorBadge>,
    pub nav: Vec<NavLink>,
    pub wallet: WalletControl,
}

/// Compose the header from supplied reserve and wallet state.
pub fn header(por_badge: Option<PorBadge>, wallet: &WalletDisplayState) -> HeaderView {
    HeaderView {
        brand: APP_NAME.to_string(),
        por_badge,
        nav: vec![
            NavLink::internal("Dashboard", Route::Dashboard),
            NavLink::internal("Docs", Route::Docs),
        ],
        wallet: WalletControl::from_mode(WalletMode::from_state(wallet)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterView {
    pub brand: String,
    pub tagline: String,
    pub pills: Vec<StatusPill>,
    pub links: Vec<NavLink>,
    pub fine_print: String,
}

/// Compose the footer: status pills, the legal/privacy link grid, and
/// the fine-print line.
pub fn footer(por_healthy: bool, chain_name: &str, wallet_connected: bool, year: u32) -> FooterView {
    FooterView {
        brand: APP_NAME.to_string(),
        tagline: TAGLINE.to_string(),
        pills: vec![
            StatusPill::por(por_healthy),
            StatusPill::network(chain_name, true),
            StatusPill::wallet(wallet_connected),
        ],
        links: vec![
            NavLink::internal("Terms", Route::Terms),
            NavLink::internal("Privacy", Route::Privacy),
            NavLink::internal("Security", Route::Security),
            NavLink::external("Status", STATUS_PAGE_URL),
            NavLink::external("Community", COMMUNITY_URL),
            NavLink::internal("Docs", Route::Docs),
            NavLink::internal("Contact", Route::Contact),
            NavLink::internal("Manage cookies", Route::Cookies),
            NavLink::internal(
                "Do not sell/share my personal information",
                Route::DoNotSell,
            ),
        ],
        fine_print: format!(
            "© {year} {APP_NAME}. Tokens are offered by private invitation to \
             qualified participants only and are not available to retail investors."
        ),
    }
}

// ── Tests ───────────────────────────────────────────────────────
