//! Layered configuration loading: defaults, then an optional file, then
//! environment variables, then validation.

use std::env;
use std::path::Path;

use gateway_core::{GatewayError, GatewayResult};
use validator::Validate;

use crate::settings::GatewayConfig;

const CONFIG_PATH_VAR: &str = "GATEWAY_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "gateway.toml";

/// Load the gateway's configuration.
///
/// Resolution order, each layer overriding the previous:
/// 1. [`GatewayConfig::default`].
/// 2. The TOML file at `GATEWAY_CONFIG_PATH` (default `./gateway.toml`),
///    if it exists. A missing file is not an error; a malformed one is.
/// 3. Environment variables, one per field (see the module-level table
///    below).
///
/// The assembled configuration is validated before being returned.
///
/// # Errors
/// Returns [`GatewayError::Config`] if the file exists but fails to parse,
/// if an environment variable holds a value of the wrong type, or if the
/// final configuration fails validation.
pub fn load_config() -> GatewayResult<GatewayConfig> {
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_from_file(Path::new(&config_path))?;
    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| GatewayError::config(format!("invalid configuration: {e}")))?;

    Ok(config)
}

fn load_from_file(path: &Path) -> GatewayResult<GatewayConfig> {
    if !path.exists() {
        return Ok(GatewayConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GatewayError::config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&raw)
        .map_err(|e| GatewayError::config(format!("failed to parse {}: {e}", path.display())))
}

fn apply_env_overrides(config: &mut GatewayConfig) -> GatewayResult<()> {
    if let Some(v) = env_value("SERVER_HOST") {
        config.server.host = v;
    }
    if let Some(v) = parse_env::<u16>("SERVER_PORT")? {
        config.server.port = v;
    }
    if let Some(v) = parse_env::<f64>("USER_BUDGET_CAP")? {
        config.user_budget_cap = v;
    }
    if let Some(v) = parse_env::<u32>("CIRCUIT_BREAKER_FAILURE_THRESHOLD")? {
        config.circuit_breaker_failure_threshold = v;
    }
    if let Some(v) = parse_env::<u64>("CIRCUIT_BREAKER_OPEN_DURATION_S")? {
        config.circuit_breaker_open_duration_s = v;
    }
    if let Some(v) = parse_env::<f64>("STRATEGY_QUALITY_BOOST")? {
        config.strategy_quality_boost = v;
    }
    if let Some(v) = parse_env::<f64>("STRATEGY_COST_SPEED_BOOST")? {
        config.strategy_cost_speed_boost = v;
    }
    if let Some(v) = parse_env::<bool>("MOCK")? {
        config.mock = v;
    }
    if let Some(v) = parse_env::<f64>("MOCK_FAILURE_RATE")? {
        config.mock_failure_rate = v;
    }
    if let Some(v) = env_value("PROVIDERS_CATALOG_PATH") {
        config.provider_catalog_path = v;
    }

    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str) -> GatewayResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_value(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| GatewayError::config(format!("invalid value for {key}: {e}"))),
    }
}
