//! The gateway's configuration shape and its defaults.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_positive_f64(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

fn validate_positive_u32(value: u32) -> Result<(), ValidationError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

fn validate_positive_u64(value: u64) -> Result<(), ValidationError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// The gateway's full runtime configuration, assembled by [`crate::load_config`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server settings.
    #[validate(nested)]
    pub server: ServerConfig,

    /// Per-user dollar spend ceiling, checked before routing. Must be `> 0`.
    #[validate(custom(function = "validate_positive_f64"))]
    pub user_budget_cap: f64,

    /// Consecutive failures before the circuit breaker trips. Must be `> 0`.
    #[validate(custom(function = "validate_positive_u32"))]
    pub circuit_breaker_failure_threshold: u32,

    /// Seconds the breaker stays open before allowing a probe. Must be `> 0`.
    #[validate(custom(function = "validate_positive_u64"))]
    pub circuit_breaker_open_duration_s: u64,

    /// Specialty-boost multiplier applied under quality priority.
    pub strategy_quality_boost: f64,

    /// Specialty-boost multiplier applied under cost/speed priority.
    pub strategy_cost_speed_boost: f64,

    /// Whether providers are simulated rather than calling a real upstream.
    pub mock: bool,

    /// Probability, in `[0, 1]`, that a mock provider call fails.
    #[validate(range(min = 0.0, max = 1.0))]
    pub mock_failure_rate: f64,

    /// Path to the provider catalog file.
    pub provider_catalog_path: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            user_budget_cap: 1.00,
            circuit_breaker_failure_threshold: 3,
            circuit_breaker_open_duration_s: 60,
            strategy_quality_boost: 1.1,
            strategy_cost_speed_boost: 0.9,
            mock: true,
            mock_failure_rate: 0.1,
            provider_catalog_path: "providers.yaml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_cleanly() {
        assert!(GatewayConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_budget_cap() {
        let mut config = GatewayConfig::default();
        config.user_budget_cap = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let mut config = GatewayConfig::default();
        config.mock_failure_rate = 1.5;
        assert!(config.validate().is_err());
    }
}
