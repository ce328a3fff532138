//! # Gateway Providers
//!
//! The provider capability contract, the catalog loader, and the
//! built-in simulated provider for the LLM routing gateway.
//!
//! Real upstream HTTP clients (OpenAI, Google, ...) are outside this
//! crate's scope by design: the gateway only ever depends on
//! [`ProviderClient`], so swapping the mock for a real implementation
//! means adding a new type here, not touching any caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod mock;
pub mod registry;

pub use client::ProviderClient;
pub use mock::MockProvider;
pub use registry::{ProviderCatalog, ProviderRegistry};
