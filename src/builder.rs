use serde_json::Value;

use crate::api::ServicesApi;
use crate::config::GenerationConfig;
use crate::generation::{build_page_content, generate_all, save_page, GenerationSettings};
use crate::{BuilderError, ContentBundle, EditableBundle, PageContent, ParserSet, ServiceRecord, SlotKey};

/// Builder for configuring a service page generation run
#[derive(Default)]
pub struct PageGeneratorBuilder {
    service: Option<ServiceRecord>,
    website_id: Option<String>,
    slots: Option<Vec<SlotKey>>,
    provider: Option<String>,
    temperature: Option<f32>,
    keywords: Option<String>,
    parsers: Option<ParserSet>,
}

impl PageGeneratorBuilder {
    /// Set the service the page is generated for
    ///
    /// # Example
    /// ```
    /// use service_page_builder::{PageGenerator, ServiceRecord};
    ///
    /// let service = ServiceRecord {
    ///     id: "svc-1".to_string(),
    ///     name: "Dental Implants".to_string(),
    ///     ..Default::default()
    /// };
    /// let builder = PageGenerator::builder().service(service);
    /// ```
    pub fn service(mut self, service: ServiceRecord) -> Self {
        self.service = Some(service);
        self
    }

    /// Set the website the page is saved to
    pub fn website_id(mut self, website_id: impl Into<String>) -> Self {
        self.website_id = Some(website_id.into());
        self
    }

    /// Choose which slots to generate
    ///
    /// # Example
    /// ```
    /// use service_page_builder::{PageGenerator, SlotKey};
    ///
    /// let builder = PageGenerator::builder()
    ///     .slots([SlotKey::Benefits, SlotKey::Faq]);
    /// ```
    pub fn slots(mut self, slots: impl IntoIterator<Item = SlotKey>) -> Self {
        self.slots = Some(slots.into_iter().collect());
        self
    }

    /// Set the backend LLM provider key
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the generation temperature (0.0-1.0)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the comma-separated keywords passed to every slot
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Replace the parsers used when the page is composed
    pub fn parsers(mut self, parsers: ParserSet) -> Self {
        self.parsers = Some(parsers);
        self
    }

    /// Fill unset options from configuration
    pub fn config(mut self, config: &GenerationConfig) -> Self {
        self.slots.get_or_insert_with(|| config.slots.clone());
        self.provider.get_or_insert_with(|| config.provider.clone());
        self.temperature.get_or_insert(config.temperature);
        self.keywords.get_or_insert_with(|| config.keywords.clone());
        self
    }

    /// Validate the options and create the generator
    ///
    /// # Errors
    /// Returns `BuilderError::Builder` if:
    /// - No service was specified, or it has no id
    /// - The temperature is outside 0.0-1.0
    pub fn build(self) -> Result<PageGenerator, BuilderError> {
        let service = self.service.ok_or_else(|| {
            BuilderError::Builder("No service specified. Use .service()".to_string())
        })?;
        if service.id.trim().is_empty() {
            return Err(BuilderError::Builder(
                "The service has no id to generate content for".to_string(),
            ));
        }

        let defaults = GenerationConfig::default();
        let temperature = self.temperature.unwrap_or(defaults.temperature);
        if !(0.0..=1.0).contains(&temperature) {
            return Err(BuilderError::Builder(format!(
                "Temperature must be between 0.0 and 1.0, got {}",
                temperature
            )));
        }

        Ok(PageGenerator {
            service,
            website_id: self.website_id,
            slots: self.slots.unwrap_or(defaults.slots),
            settings: GenerationSettings {
                provider: self.provider.unwrap_or(defaults.provider),
                temperature,
                keywords: self.keywords.unwrap_or(defaults.keywords),
            },
            parsers: self.parsers.unwrap_or_default(),
        })
    }
}

/// A configured generation run for one service page
pub struct PageGenerator {
    service: ServiceRecord,
    website_id: Option<String>,
    slots: Vec<SlotKey>,
    settings: GenerationSettings,
    parsers: ParserSet,
}

impl PageGenerator {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use service_page_builder::PageGenerator;
    ///
    /// let builder = PageGenerator::builder();
    /// ```
    pub fn builder() -> PageGeneratorBuilder {
        PageGeneratorBuilder::default()
    }

    pub fn service(&self) -> &ServiceRecord {
        &self.service
    }

    pub fn slots(&self) -> &[SlotKey] {
        &self.slots
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate every configured slot
    ///
    /// # Example
    /// ```no_run
    /// # use service_page_builder::{AppConfig, HttpServicesApi, PageGenerator, ServiceRecord};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let api = HttpServicesApi::new(&AppConfig::default())?;
    /// let generator = PageGenerator::builder()
    ///     .service(ServiceRecord { id: "svc-1".into(), name: "Veneers".into(), ..Default::default() })
    ///     .build()?;
    /// let bundle = generator.generate(&api).await;
    /// let editable = bundle.to_editable();
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, api: &dyn ServicesApi) -> ContentBundle {
        generate_all(api, &self.service.id, &self.slots, &self.settings).await
    }

    /// Compose the page without submitting it
    pub fn preview(&self, editable: &EditableBundle) -> PageContent {
        build_page_content(editable, &self.service, &self.parsers)
    }

    /// Submit the edited bundle as a service page
    pub async fn save(
        &self,
        api: &dyn ServicesApi,
        editable: &EditableBundle,
    ) -> Result<Value, BuilderError> {
        let website_id = self.website_id.as_deref().ok_or_else(|| {
            BuilderError::Builder("No website specified. Use .website_id()".to_string())
        })?;
        save_page(api, website_id, &self.service, editable, &self.parsers).await
    }
}
