//! # Gateway Resilience
//!
//! Resilience patterns for the LLM routing gateway:
//! - Circuit breaker for preventing cascading failures on an ailing provider
//! - Rolling per-provider rate limiter

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod circuit_breaker;
pub mod rate_limiter;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
pub use rate_limiter::RateLimiter;
