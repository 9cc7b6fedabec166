pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod generation;
pub mod model;
pub mod parsers;
pub mod providers;
pub mod widget;

use std::sync::Arc;

// Re-export commonly used types
pub use api::{CreatePageRequest, HttpServicesApi, ServicesApi};
pub use builder::{PageGenerator, PageGeneratorBuilder};
pub use config::AppConfig;
pub use error::BuilderError;
pub use generation::{
    build_page_content, generate_all, parse_keywords, save_page, GenerationSettings, PageContent,
};
pub use model::{
    ContentBundle, EditableBundle, GenerationRequest, ParsedBenefit, ParsedFaq, ParsedInstruction,
    ParsedStep, SeoMeta, ServiceRecord, ServiceSummary, SlotKey, SlotResult,
};
pub use parsers::{
    parse_aftercare_instructions, parse_benefits, parse_faqs, parse_procedure_steps,
    parse_seo_meta, ContentParser, ParsedSection, ParserSet, SeoFallback,
};
pub use providers::{resolve_provider, select_provider, ProviderStatus};
pub use widget::{LoadOutcome, LoadPhase, ServiceListLoader, WidgetAction, WidgetHost, WidgetView};

/// Convenience function to generate content for a service using configuration
///
/// The configured provider is checked against the backend first; slots
/// default to the configured list when `slots` is empty.
///
/// # Example
/// ```no_run
/// # use service_page_builder::{generate_service_content, AppConfig, SlotKey};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AppConfig::load()?;
/// let bundle = generate_service_content(&config, "svc-1", &[SlotKey::Faq]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn generate_service_content(
    config: &AppConfig,
    service_id: &str,
    slots: &[SlotKey],
) -> Result<ContentBundle, BuilderError> {
    let api = HttpServicesApi::new(config)?;
    let provider = resolve_provider(&api, &config.generation.provider).await?;

    let mut settings = GenerationSettings::from(&config.generation);
    settings.provider = provider.key;

    let slots = if slots.is_empty() {
        config.generation.slots.as_slice()
    } else {
        slots
    };
    Ok(generate_all(&api, service_id, slots, &settings).await)
}

/// Convenience function to load the service menu once and return its HTML
///
/// # Errors
/// Returns `BuilderError::MenuLoad` when the listing request fails.
///
/// # Example
/// ```no_run
/// # use service_page_builder::{load_service_menu, AppConfig, WidgetHost};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let host = WidgetHost::default().with_global_website_id("site-1");
/// let html = load_service_menu(&AppConfig::default(), host).await?;
/// println!("{}", html);
/// # Ok(())
/// # }
/// ```
pub async fn load_service_menu(config: &AppConfig, host: WidgetHost) -> Result<String, BuilderError> {
    let api: Arc<dyn ServicesApi> = Arc::new(HttpServicesApi::new(config)?);
    let loader = ServiceListLoader::from_config(api, host, config);
    match loader.init().await {
        LoadOutcome::Failed => match loader.view() {
            WidgetView::Error { message } => Err(BuilderError::MenuLoad(message)),
            _ => Err(BuilderError::MenuLoad("unknown error".to_string())),
        },
        _ => Ok(loader.render_html()),
    }
}
