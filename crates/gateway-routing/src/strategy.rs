//! Multi-criteria provider selection.
//!
//! [`select_providers`] filters the catalog down to eligible providers
//! and ranks them by the user's priority, with a specialty boost for
//! providers that match the classified prompt type.

use gateway_core::{estimate_cost, Priority, ProviderSpec, UserPreference};
use gateway_resilience::CircuitBreaker;
use gateway_state::StateStore;

use crate::classifier::Classifier;

/// Strategy tuning knobs — the specialty-boost multipliers. Defaults
/// match the original service: quality amplifies (boosts toward a more
/// negative score), cost/speed shrink (boosts toward a lower score).
#[derive(Debug, Clone, Copy)]
pub struct StrategyConfig {
    /// Multiplier applied to a quality-priority score for a matching specialty.
    pub quality_boost: f64,
    /// Multiplier applied to a cost- or speed-priority score for a matching specialty.
    pub cost_speed_boost: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            quality_boost: 1.1,
            cost_speed_boost: 0.9,
        }
    }
}

/// Ranks the catalog for a single request.
pub struct SelectionStrategy {
    classifier: Classifier,
    config: StrategyConfig,
}

impl SelectionStrategy {
    /// Build a strategy with the given boost configuration.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            classifier: Classifier::new(),
            config,
        }
    }

    /// Filter `catalog` to providers that are up, circuit-available, and
    /// within the caller's cost cap, then sort ascending by score.
    ///
    /// Ties are broken by catalog iteration order (the sort is stable).
    /// May return an empty vector — that's a legitimate "no eligible
    /// provider" outcome, not an error.
    #[must_use]
    pub fn select_providers(
        &self,
        prompt: &str,
        preferences: &UserPreference,
        catalog: &[ProviderSpec],
        store: &StateStore,
        breaker: &CircuitBreaker,
    ) -> Vec<ProviderSpec> {
        let request_type = self.classifier.classify(prompt);

        let mut candidates: Vec<(ProviderSpec, f64)> = catalog
            .iter()
            .filter(|spec| !store.get_provider_state(&spec.name).is_down)
            .filter(|spec| breaker.is_available(&spec.name))
            .filter_map(|spec| {
                let cost = estimate_cost(spec, prompt);
                match preferences.max_cost_per_request {
                    Some(cap) if cost > cap => None,
                    _ => Some((spec.clone(), cost)),
                }
            })
            .collect();

        candidates.sort_by(|(a, a_cost), (b, b_cost)| {
            self.score(a, *a_cost, preferences.priority, request_type)
                .partial_cmp(&self.score(b, *b_cost, preferences.priority, request_type))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates.into_iter().map(|(spec, _)| spec).collect()
    }

    fn score(
        &self,
        spec: &ProviderSpec,
        cost: f64,
        priority: Priority,
        request_type: gateway_core::Specialty,
    ) -> f64 {
        let mut score = match priority {
            Priority::Cost => cost,
            Priority::Speed => f64::from(spec.latency_ms),
            Priority::Quality => -spec.quality_score,
        };

        if spec.specialties.contains(&request_type) {
            score *= match priority {
                Priority::Quality => self.config.quality_boost,
                Priority::Cost | Priority::Speed => self.config.cost_speed_boost,
            };
        }

        score
    }
}
