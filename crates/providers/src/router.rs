//! Provider selection from configuration.
//!
//! Each `[providers.<name>]` table becomes one OpenAI-compatible client keyed
//! by its table name. The assistants only ever talk to the default one; the
//! rest exist so `doctor` and a config switch can reach them.

use crate::openai_compat::OpenAiCompatProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uniassist_config::{AppConfig, ProviderConfig};
use uniassist_core::provider::Provider;

/// Endpoints for providers that can be named without an `api_url`.
const KNOWN_ENDPOINTS: &[(&str, &str)] = &[
    ("groq", "https://api.groq.com/openai/v1"),
    ("openai", "https://api.openai.com/v1"),
    ("openrouter", "https://openrouter.ai/api/v1"),
    ("together", "https://api.together.xyz/v1"),
    ("ollama", "http://localhost:11434/v1"),
    ("vllm", "http://localhost:8000/v1"),
];

/// Named providers plus the one assistants use by default.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.get(&self.default_provider)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Build a router holding every configured provider.
///
/// The default provider is registered even without its own table, using the
/// global `api_key` and its well-known endpoint.
pub fn build_from_config(config: &AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);
    let fallback = ProviderConfig::default();

    let default_entry = (!config.providers.contains_key(&config.default_provider))
        .then_some((&config.default_provider, &fallback));

    for (name, table) in config.providers.iter().chain(default_entry) {
        let Some(base_url) = table.api_url.as_deref().or_else(|| known_endpoint(name)) else {
            warn!(provider = %name, "No api_url and no known endpoint; skipping");
            continue;
        };
        let api_key = table
            .api_key
            .as_deref()
            .or(config.api_key.as_deref())
            .unwrap_or_default();

        debug!(provider = %name, base_url, "Registering provider");
        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, base_url, api_key)),
        );
    }

    router
}

/// Model requested from the default provider; a provider table's
/// `default_model` wins over the global one.
pub fn resolve_model(config: &AppConfig) -> String {
    config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

fn known_endpoint(name: &str) -> Option<&'static str> {
    KNOWN_ENDPOINTS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, url)| *url)
}
