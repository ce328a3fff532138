//! Provider catalog types and the dynamic state snapshot the state store
//! hands back to callers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A prompt specialty a provider may be strong at. Only affects scoring
/// in the selection strategy, never eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    /// Source code generation, debugging, or explanation.
    Code,
    /// Prose: essays, blog posts, emails, summaries.
    Writing,
    /// Everything else: analysis, reasoning, general Q&A.
    Analysis,
}

/// Static specification of an upstream provider, loaded once from the
/// provider catalog at startup.
///
/// All numeric fields are validated by the catalog loader
/// (`gateway-config`) against the bounds documented on each field; this
/// type itself makes no attempt to re-validate, trusting the loader's
/// boundary check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Unique provider name, used as the key everywhere in the state
    /// store and the wire format.
    pub name: String,
    /// Upstream model identifier (e.g. `"gpt-5"`, `"gemini-3-pro"`).
    pub model: String,
    /// Cost per token in USD. Must be `> 0`.
    pub cost_per_token: f64,
    /// Nominal latency in milliseconds. Must be `> 0`.
    pub latency_ms: u32,
    /// Requests-per-minute rate limit. Must be `> 0`.
    pub rate_limit_rpm: u32,
    /// Prompt types this provider specializes in.
    pub specialties: HashSet<Specialty>,
    /// Quality score in `[0, 1]`.
    pub quality_score: f64,
}

impl ProviderSpec {
    /// Validate the bounds documented on each field.
    ///
    /// # Errors
    /// Returns a message describing the first violated bound.
    pub fn validate(&self) -> Result<(), String> {
        if self.cost_per_token <= 0.0 {
            return Err(format!(
                "provider {}: cost_per_token must be > 0",
                self.name
            ));
        }
        if self.latency_ms == 0 {
            return Err(format!("provider {}: latency_ms must be > 0", self.name));
        }
        if self.rate_limit_rpm == 0 {
            return Err(format!(
                "provider {}: rate_limit_rpm must be > 0",
                self.name
            ));
        }
        if !(0.0..=1.0).contains(&self.quality_score) {
            return Err(format!(
                "provider {}: quality_score must be in [0, 1]",
                self.name
            ));
        }
        Ok(())
    }
}

/// Breaker status as observed by a read-only query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitStatus {
    /// Healthy, admitting all requests.
    Closed,
    /// Tripped, admitting none.
    Open,
    /// Cooldown elapsed, admitting a single probe.
    HalfOpen,
}

impl std::fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
            Self::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// A point-in-time copy of a single provider's mutable state, as
/// returned by the state store. Never mutated in place by callers —
/// all mutation goes back through the store's API.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProviderDynamicState {
    /// Administratively marked down via `/simulate/failure`.
    pub is_down: bool,
    /// Consecutive failures since the last success.
    pub consecutive_failures: u32,
    /// Wall-clock instant (unix seconds) at which the OPEN phase ends.
    /// `0.0` means not open.
    pub open_until_ts: f64,
    /// At-most-one probe token for the HALF_OPEN state.
    pub half_open_probe_in_flight: bool,
}

/// Provider specification enriched with live status, returned by
/// `GET /providers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// The static catalog entry.
    #[serde(flatten)]
    pub spec: ProviderSpec,
    /// Administratively marked down.
    pub is_down: bool,
    /// Current circuit-breaker status.
    pub circuit_status: CircuitStatus,
    /// Success rate over all recorded requests (`1.0` if none yet).
    pub success_rate: f64,
}
