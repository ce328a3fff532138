//! Provider catalog loading and the per-process client factory cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;

use gateway_core::{GatewayError, GatewayResult, ProviderSpec};
use gateway_state::StateStore;

use crate::client::ProviderClient;
use crate::mock::MockProvider;

/// A catalog entry as it appears in `providers.yaml` — identical to
/// [`ProviderSpec`] but deserialized separately so catalog-file shape
/// and the in-memory type can drift without coupling serde attributes
/// onto the core type.
#[derive(Debug, Clone, Deserialize)]
struct ProviderSpecFile {
    model: String,
    cost_per_token: f64,
    latency_ms: u32,
    rate_limit_rpm: u32,
    #[serde(default)]
    specialties: Vec<gateway_core::Specialty>,
    quality_score: f64,
}

/// The loaded provider catalog, in file order (selection ties break on
/// this order).
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    order: Vec<ProviderSpec>,
}

impl ProviderCatalog {
    /// Load a catalog from a YAML file mapping provider name to spec.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if the file is missing,
    /// malformed, or any entry fails [`ProviderSpec::validate`]. A
    /// missing catalog is fatal — the gateway has nothing to route to.
    pub fn load_from_path(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::config(format!("failed to read provider catalog {}: {e}", path.display()))
        })?;

        let raw: HashMap<String, ProviderSpecFile> = serde_yaml::from_str(&contents)
            .map_err(|e| GatewayError::config(format!("failed to parse provider catalog: {e}")))?;

        let mut order: Vec<(String, ProviderSpecFile)> = raw.into_iter().collect();
        order.sort_by(|a, b| a.0.cmp(&b.0));

        let mut specs = Vec::with_capacity(order.len());
        for (name, file) in order {
            let spec = ProviderSpec {
                name,
                model: file.model,
                cost_per_token: file.cost_per_token,
                latency_ms: file.latency_ms,
                rate_limit_rpm: file.rate_limit_rpm,
                specialties: file.specialties.into_iter().collect(),
                quality_score: file.quality_score,
            };
            spec.validate()
                .map_err(|e| GatewayError::config(format!("invalid provider {}: {e}", spec.name)))?;
            specs.push(spec);
        }

        if specs.is_empty() {
            return Err(GatewayError::config("provider catalog is empty"));
        }

        Ok(Self { order: specs })
    }

    /// All providers, in catalog (load) order.
    #[must_use]
    pub fn all(&self) -> &[ProviderSpec] {
        &self.order
    }

    /// Look up a single provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProviderSpec> {
        self.order.iter().find(|spec| spec.name == name)
    }
}

/// Factory cache of provider clients, keyed by name. Every catalog
/// entry currently resolves to a [`MockProvider`] — the gateway's
/// pluggable-provider seam is [`ProviderClient`]; this registry is
/// where a real HTTP-backed implementation would be wired in instead.
pub struct ProviderRegistry {
    catalog: ProviderCatalog,
    clients: DashMap<String, Arc<dyn ProviderClient>>,
    store: Arc<StateStore>,
    mock_failure_rate: f64,
}

impl ProviderRegistry {
    /// Build a registry over `catalog`, creating clients lazily.
    #[must_use]
    pub fn new(catalog: ProviderCatalog, store: Arc<StateStore>, mock_failure_rate: f64) -> Self {
        Self {
            catalog,
            clients: DashMap::new(),
            store,
            mock_failure_rate,
        }
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Get or lazily create the client for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ProviderClient>> {
        if let Some(client) = self.clients.get(name) {
            return Some(client.clone());
        }
        let spec = self.catalog.get(name)?.clone();
        let client: Arc<dyn ProviderClient> = Arc::new(MockProvider::new(
            spec,
            self.store.clone(),
            self.mock_failure_rate,
        ));
        self.clients.insert(name.to_string(), client.clone());
        Some(client)
    }
}
