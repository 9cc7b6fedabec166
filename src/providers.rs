use crate::api::ServicesApi;
use crate::error::BuilderError;
use log::{info, warn};
use serde::Deserialize;

/// An LLM provider as reported by the backend status endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderStatus {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Pick the provider to generate with.
///
/// The preferred provider wins when the backend has it enabled, otherwise the
/// first enabled provider is used.
pub fn select_provider<'a>(
    providers: &'a [ProviderStatus],
    preferred: &str,
) -> Option<&'a ProviderStatus> {
    let enabled = move || providers.iter().filter(|p| p.enabled);

    if let Some(provider) = enabled().find(|p| p.key == preferred) {
        return Some(provider);
    }

    let fallback = enabled().next();
    if let Some(provider) = fallback {
        warn!(
            "Provider '{}' is not available, using '{}'",
            preferred, provider.key
        );
    }
    fallback
}

/// Ask the backend which providers are enabled and resolve `preferred` against them.
pub async fn resolve_provider(
    api: &dyn ServicesApi,
    preferred: &str,
) -> Result<ProviderStatus, BuilderError> {
    let providers = api.llm_status().await?;
    let provider = select_provider(&providers, preferred).ok_or_else(|| {
        BuilderError::Builder("No LLM providers are enabled on the backend".to_string())
    })?;
    info!("Using provider '{}' ({})", provider.key, provider.name);
    Ok(provider.clone())
}
