//! Gateway-wide error type.
//!
//! Store-level operations are infallible by construction (everything is
//! in-memory); the only "expected" failure signal is [`GatewayError::RateLimited`],
//! which is normal control flow rather than an exceptional condition.

use thiserror::Error;

/// Convenience alias for fallible gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// The gateway's error taxonomy.
///
/// Provider-level errors ([`RateLimited`](Self::RateLimited),
/// [`ProviderFailure`](Self::ProviderFailure),
/// [`ContextWindowExceeded`](Self::ContextWindowExceeded)) are recovered
/// locally by the router's fallback loop. [`BudgetExceeded`](Self::BudgetExceeded)
/// and [`ServiceUnavailable`](Self::ServiceUnavailable) are surfaced to the
/// client.
#[derive(Debug, Error, Clone)]
pub enum GatewayError {
    /// The provider (or the rate limiter guarding it) rejected the call
    /// because its rolling quota was exhausted. Does not trip the circuit
    /// breaker.
    #[error("provider {provider} is rate limited")]
    RateLimited {
        /// Name of the rate-limited provider.
        provider: String,
    },

    /// Any upstream error that is not rate limiting: network failure,
    /// 5xx, timeout, or an unexpected exception from the provider client.
    /// Feeds the circuit breaker.
    #[error("provider {provider} failed: {message}")]
    ProviderFailure {
        /// Name of the failing provider.
        provider: String,
        /// Human-readable failure detail.
        message: String,
    },

    /// The prompt exceeds the provider's context window. Treated as a
    /// [`ProviderFailure`](Self::ProviderFailure) for circuit-breaker purposes
    /// unless the caller chooses to special-case it.
    #[error("prompt exceeds context window for provider {provider}")]
    ContextWindowExceeded {
        /// Name of the provider whose context window was exceeded.
        provider: String,
    },

    /// Pre-flight refusal: the requesting user has already exceeded their
    /// spending cap. Surfaced as HTTP 402.
    #[error("user {user_id} has exceeded the budget cap (spend={spend:.4})")]
    BudgetExceeded {
        /// The user whose spend exceeded the cap.
        user_id: String,
        /// The user's current total spend in USD.
        spend: f64,
    },

    /// Every candidate provider was exhausted, or none was ever eligible.
    /// Surfaced as HTTP 503.
    #[error("no provider is available to handle this request")]
    ServiceUnavailable,

    /// Request schema or field validation failure. Surfaced as HTTP 422.
    #[error("validation failed for field {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Human-readable validation detail.
        message: String,
    },

    /// An administrative operation referenced an unknown provider.
    /// Surfaced as HTTP 404.
    #[error("unknown provider: {name}")]
    NotFound {
        /// The unrecognized provider name.
        name: String,
    },

    /// Configuration failed to load or failed validation at startup.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable configuration problem.
        message: String,
    },
}

impl GatewayError {
    /// Build a [`GatewayError::RateLimited`].
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Build a [`GatewayError::ProviderFailure`].
    #[must_use]
    pub fn provider_failure(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderFailure {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Build a [`GatewayError::Validation`].
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a [`GatewayError::NotFound`].
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Build a [`GatewayError::Config`].
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is a rate-limit signal rather than a health
    /// signal — callers must not feed it to the circuit breaker.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
