//! Inbound request shapes.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// Which dimension the caller wants the selection strategy to optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Minimize estimated dollar cost.
    Cost,
    /// Minimize nominal latency.
    Speed,
    /// Maximize quality score.
    Quality,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Cost
    }
}

/// Per-request routing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreference {
    /// Which dimension to optimize when ranking candidates.
    #[serde(default)]
    pub priority: Priority,
    /// Reject any provider whose estimated cost for this prompt would
    /// exceed this value. `None` disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost_per_request: Option<f64>,
    /// Per-call timeout passed through to the provider's `chat` call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,
}

const fn default_timeout_ms() -> u32 {
    5000
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            priority: Priority::default(),
            max_cost_per_request: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UserPreference {
    /// Validate preference bounds.
    ///
    /// # Errors
    /// Returns [`GatewayError::Validation`] if `max_cost_per_request` is
    /// present but not positive, or `timeout_ms` is zero.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if let Some(cap) = self.max_cost_per_request {
            if cap <= 0.0 {
                return Err(GatewayError::validation(
                    "max_cost_per_request",
                    "must be > 0 when present",
                ));
            }
        }
        if self.timeout_ms == 0 {
            return Err(GatewayError::validation("timeout_ms", "must be > 0"));
        }
        Ok(())
    }
}

/// A chat-completion request as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The prompt to route and send upstream.
    pub prompt: String,
    /// Routing preferences; defaults apply if omitted.
    #[serde(default)]
    pub preferences: UserPreference,
    /// Optional user identifier, used for per-user budget enforcement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ChatRequest {
    /// Validate the request body.
    ///
    /// # Errors
    /// Returns [`GatewayError::Validation`] if the prompt is empty or the
    /// preferences fail their own validation.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.prompt.trim().is_empty() {
            return Err(GatewayError::validation("prompt", "must not be empty"));
        }
        self.preferences.validate()
    }
}
