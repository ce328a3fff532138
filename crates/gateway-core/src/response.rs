//! Outbound response shapes.

use serde::{Deserialize, Serialize};

/// Successful chat-completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Name of the provider that produced this response.
    pub provider_used: String,
    /// Generated content.
    pub content: String,
    /// Observed latency in milliseconds.
    pub latency_ms: u32,
    /// Dollar cost charged for this call.
    pub cost: f64,
}
