//! Reserve-status reduction and display derivation.
//!
//! The poller owns a single [`ReserveStatus`] and folds each settled tick
//! in through [`ReserveStatus::begin_poll`] / [`ReserveStatus::apply`].
//! A failed tick keeps the last successfully read values: a transient
//! read failure must not flash a false "unhealthy" state.

/// One settled poll tick: either all three reads succeeded, or the first
/// failure's message (read order: vaulted quantity, health flag,
/// timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Success {
        vaulted_kg: u128,
        is_healthy: bool,
        last_update: u64,
    },
    Failure {
        message: String,
    },
}

/// Derived reserve state, recomputed from live reads and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveStatus {
    /// Vaulted reserve quantity in kilograms.
    pub vaulted_kg: u128,

    /// Feed health flag from the adapter.
    pub is_healthy: bool,

    /// Seconds-since-epoch of the last feed update.
    pub last_update: u64,

    /// Two-decimal coverage percentage against the outstanding quantity.
    pub coverage_ratio_percent: f64,

    /// True while a poll tick is in flight.
    pub loading: bool,

    /// First failure message of the most recent tick, if any.
    pub error: Option<String>,
}

impl Default for ReserveStatus {
    fn default() -> Self {
        Self {
            vaulted_kg: 0,
            is_healthy: false,
            last_update: 0,
            coverage_ratio_percent: 0.0,
            loading: true,
            error: None,
        }
    }
}

/// Mutually exclusive display label for a [`ReserveStatus`], in
/// precedence order: loading, then error, then the health flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Error,
    Healthy,
    Unhealthy,
}

impl DisplayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Loading => "loading",
            DisplayState::Error => "error",
            DisplayState::Healthy => "healthy",
            DisplayState::Unhealthy => "unhealthy",
        }
    }
}

/// Coverage as a two-decimal percentage. Integer basis-point division
/// first, so 98 500 kg over 100 000 kg is exactly 98.5.
pub fn coverage_ratio_percent(vaulted_kg: u128, outstanding_kg: u128) -> f64 {
    if outstanding_kg == 0 {
        return 0.0;
    }
    (vaulted_kg.saturating_mul(10_000) / outstanding_kg) as f64 / 100.0
}

impl ReserveStatus {
    /// Marks a tick in flight. The previous values stay visible behind
    /// the loading flag until the tick settles.
    pub fn begin_poll(&mut self) {
        self.loading = true;
    }

    /// Fold one settled tick in. Success replaces all three read values,
    /// recomputes coverage, and clears the error; failure records the
    /// message and keeps the last good values.
    pub fn apply(&mut self, outcome: PollOutcome, outstanding_kg: u128) {
        match outcome {
            PollOutcome::Success {
                vaulted_kg,
                is_healthy,
                last_update,
            } => {
                self.vaulted_kg = vaulted_kg;
                self.is_healthy = is_healthy;
                self.last_update = last_update;
                self.coverage_ratio_percent = coverage_ratio_percent(vaulted_kg, outstanding_kg);
                self.error = None;
            }
            PollOutcome::Failure { message } => {
                self.error = Some(message);
            }
        }
        self.loading = false;
    }

    pub fn display_state(&self) -> DisplayState {
        if self.loading {
            DisplayState::Loading
        } else if self.error.is_some() {
            DisplayState::Error
        } else if self.is_healthy {
            DisplayState::Healthy
        } else {
            DisplayState::Unhealthy
        }
    }

    /// Human-readable status line for badges and logs.
    pub fn display_text(&self) -> String {
        match self.display_state() {
            DisplayState::Loading => "Loading...".to_string(),
            DisplayState::Error => "Error".to_string(),
            DisplayState::Healthy | DisplayState::Unhealthy => {
                format!("{:.1}% Coverage", self.coverage_ratio_percent)
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────
