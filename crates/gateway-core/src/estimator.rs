//! Token counting and per-provider cost estimation.
//!
//! `estimate_tokens` prefers a real BPE tokenizer (`tiktoken-rs`, matched
//! to the provider's model where possible) and falls back to the
//! `ceil(len / 4)` heuristic when no encoder can be built for that model
//! — an unknown or synthetic model name (e.g. a mock provider's
//! `"mock-model"`) shouldn't make estimation fail.

use crate::provider::ProviderSpec;

/// Estimate the token count of `text` for `model`.
///
/// Tries to resolve a tokenizer for the exact model name first, then
/// falls back to the `cl100k_base` encoding, and finally to
/// `ceil(char_len / 4)` if no encoder can be built at all — an unknown
/// or synthetic model name (e.g. a mock provider's `"mock-model"`)
/// should degrade, not fail estimation.
#[must_use]
pub fn estimate_tokens(text: &str, model: &str) -> u64 {
    if let Ok(bpe) = tiktoken_rs::get_bpe_from_model(model) {
        return bpe.encode_ordinary(text).len() as u64;
    }
    if let Ok(bpe) = tiktoken_rs::cl100k_base() {
        return bpe.encode_ordinary(text).len() as u64;
    }
    char_len_fallback(text)
}

fn char_len_fallback(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

/// `estimate_tokens(prompt, spec.model) * spec.cost_per_token`.
#[must_use]
pub fn estimate_cost(spec: &ProviderSpec, prompt: &str) -> f64 {
    estimate_tokens(prompt, &spec.model) as f64 * spec.cost_per_token
}
