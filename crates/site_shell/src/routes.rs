//! Fixed navigation surface: internal routes, their static page
//! structure, and the external links surfaced in the footer.
//!
//! The route set is part of the shell's contract and MUST NOT be
//! configurable at runtime.

/// Status page link in the footer.
pub const STATUS_PAGE_URL: &str = "https://status.aurumgate.io";

/// Source/community link in the footer.
pub const COMMUNITY_URL: &str = "https://github.com/aurumgate/aurumgate";

/// Internal routes served by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Terms,
    Privacy,
    Security,
    Cookies,
    DoNotSell,
    Contact,
    Dashboard,
    Docs,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Home,
        Route::Terms,
        Route::Privacy,
        Route::Security,
        Route::Cookies,
        Route::DoNotSell,
        Route::Contact,
        Route::Dashboard,
        Route::Docs,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Terms => "/legal/terms",
            Route::Privacy => "/legal/privacy",
            Route::Security => "/legal/security",
            Route::Cookies => "/privacy/cookies",
            Route::DoNotSell => "/privacy/do-not-sell",
            Route::Contact => "/contact",
            Route::Dashboard => "/dashboard",
            Route::Docs => "/docs",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|r| r.path() == path)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "AurumGate",
            Route::Terms => "Terms of Service",
            Route::Privacy => "Privacy Policy",
            Route::Security => "Security",
            Route::Cookies => "Cookie Preferences",
            Route::DoNotSell => "Do Not Sell or Share My Personal Information",
            Route::Contact => "Contact",
            Route::Dashboard => "Dashboard",
            Route::Docs => "Documentation",
        }
    }

    /// Section headings of the prerendered page behind this route.
    /// Application routes (home, dashboard, docs) carry no static
    /// sections.
    pub fn sections(&self) -> &'static [&'static str] {
        match self {
            Route::Terms => &[
                "Private Placement Offering",
                "Risks and Disclaimers",
                "Platform Usage",
                "Compliance and Regulations",
                "Limitation of Liability",
                "Termination and Modifications",
                "Governing Law and Disputes",
                "Contact Information",
            ],
            Route::Privacy => &[
                "Information Collection",
                "Information Use",
                "Information Sharing",
                "Data Protection",
                "Your Rights",
                "Cookies and Tracking",
                "International Transfers",
                "Contact Information",
            ],
            Route::Security => &[
                "Platform Security Architecture",
                "Custody and Asset Protection",
                "Access Controls and Authentication",
                "Data Protection and Privacy",
                "Incident Response",
                "Compliance and Auditing",
                "User Security Best Practices",
                "Security Contact",
            ],
            Route::Cookies => &[
                "How We Use Cookies",
                "Cookie Details",
                "Third-Party Cookies",
                "Browser Controls",
                "Data Protection",
                "Contact Information",
            ],
            Route::DoNotSell => &[
                "Data Practices",
                "Your California Privacy Rights",
                "Sensitive Personal Information",
                "How to Exercise Your Rights",
                "Third-Party Cookies and Tracking",
                "Authorized Agents",
                "Non-Discrimination",
                "Contact Information",
            ],
            Route::Contact => &[
                "Primary Contact",
                "Specialized Support",
                "Regulatory and Legal",
                "Platform Access",
                "Response Times",
            ],
            Route::Home | Route::Dashboard | Route::Docs => &[],
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────
