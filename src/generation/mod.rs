mod page;

pub use page::{
    build_page_content, AftercareSection, BenefitsSection, CtaSection, FaqSection, HeroSection,
    OverviewSection, PageContent, ProcedureSection,
};

use crate::api::{CreatePageRequest, ServicesApi};
use crate::config::GenerationConfig;
use crate::error::BuilderError;
use crate::model::{
    ContentBundle, EditableBundle, GenerationRequest, ServiceRecord, SlotKey, SlotResult,
};
use crate::parsers::{parse_seo_meta, ParserSet, SeoFallback};
use futures::future::join_all;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeSet;

/// User-chosen generation settings shared by every slot of a run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub provider: String,
    pub temperature: f32,
    /// Comma-separated keywords as typed by the user
    pub keywords: String,
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        GenerationSettings {
            provider: config.provider.clone(),
            temperature: config.temperature,
            keywords: config.keywords.clone(),
        }
    }
}

/// Split a comma-separated keyword string, dropping empty entries.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

impl GenerationSettings {
    /// The backend request for one slot
    pub fn request_for(&self, slot: SlotKey) -> GenerationRequest {
        GenerationRequest {
            slot,
            content_type: slot.content_type(),
            provider: self.provider.clone(),
            temperature: self.temperature.clamp(0.0, 1.0),
            keywords: parse_keywords(&self.keywords),
        }
    }
}

/// Generate every enabled slot concurrently.
///
/// Each slot settles independently: a failed call is recorded as
/// [`SlotResult::Failure`] and never affects its siblings. The bundle is
/// returned once every call has finished.
pub async fn generate_all(
    api: &dyn ServicesApi,
    service_id: &str,
    slots: &[SlotKey],
    settings: &GenerationSettings,
) -> ContentBundle {
    let slots: BTreeSet<SlotKey> = slots.iter().copied().collect();
    info!(
        "Generating {} slot(s) for service {} with {}",
        slots.len(),
        service_id,
        settings.provider
    );

    let calls = slots.into_iter().map(|slot| {
        let request = settings.request_for(slot);
        async move {
            let result = match api.generate_content(service_id, &request).await {
                Ok(text) => {
                    debug!("Slot '{}' generated {} bytes", slot, text.len());
                    SlotResult::Success { text }
                }
                Err(e) => {
                    warn!("Slot '{}' failed: {}", slot, e);
                    SlotResult::Failure {
                        message: e.to_string(),
                    }
                }
            };
            (slot, result)
        }
    });

    let mut bundle = ContentBundle::default();
    for (slot, result) in join_all(calls).await {
        bundle.insert(slot, result);
    }

    let failed = bundle.failures().count();
    info!(
        "Generation finished: {} succeeded, {} failed",
        bundle.len() - failed,
        failed
    );
    bundle
}

/// Build the page and SEO metadata from the edited bundle and submit it.
pub async fn save_page(
    api: &dyn ServicesApi,
    website_id: &str,
    service: &ServiceRecord,
    editable: &EditableBundle,
    parsers: &ParserSet,
) -> Result<Value, BuilderError> {
    if website_id.trim().is_empty() {
        return Err(BuilderError::Builder(
            "A website id is required to save a service page".to_string(),
        ));
    }

    let request = CreatePageRequest {
        website_id: website_id.to_string(),
        service_id: service.id.clone(),
        content: build_page_content(editable, service, parsers),
        seo: parse_seo_meta(editable.get(SlotKey::Seo), &SeoFallback::from(service)),
        auto_generate: true,
    };

    let page = api.create_page(&request).await?;
    info!("Saved service page for '{}' on website {}", service.name, website_id);
    Ok(page)
}
