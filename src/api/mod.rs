mod http;

pub use http::HttpServicesApi;

use crate::error::BuilderError;
use crate::model::{GenerationRequest, SeoMeta};
use crate::generation::PageContent;
use crate::providers::ProviderStatus;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded::byte_serialize;

/// Percent-encode one URL path segment.
///
/// Form encoding writes a literal `+` as `%2B`, so every `+` it produces
/// stands for a space.
pub(crate) fn path_segment(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Body of the page-creation call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub website_id: String,
    pub service_id: String,
    pub content: PageContent,
    pub seo: SeoMeta,
    pub auto_generate: bool,
}

/// The services backend as seen by the page generator and the menu widget
#[async_trait]
pub trait ServicesApi: Send + Sync {
    /// LLM providers the backend can generate with
    async fn llm_status(&self) -> Result<Vec<ProviderStatus>, BuilderError>;

    /// Generate the text for one slot of one service
    async fn generate_content(
        &self,
        service_id: &str,
        request: &GenerationRequest,
    ) -> Result<String, BuilderError>;

    /// Persist a service page, returning the created page
    async fn create_page(&self, page: &CreatePageRequest) -> Result<Value, BuilderError>;

    /// Fetch a service listing; `endpoint` is a path with its query string
    async fn list_services(&self, endpoint: &str) -> Result<Value, BuilderError>;
}
