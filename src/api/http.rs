use super::{path_segment, CreatePageRequest, ServicesApi};
use crate::config::AppConfig;
use crate::error::BuilderError;
use crate::model::GenerationRequest;
use crate::providers::ProviderStatus;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// [`ServicesApi`] over JSON/HTTP with cookie-based credentials
pub struct HttpServicesApi {
    client: Client,
    base_url: String,
}

impl HttpServicesApi {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> Result<Self, BuilderError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(HttpServicesApi {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        HttpServicesApi {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read a JSON body, turning non-2xx statuses into [`BuilderError::Status`].
async fn json_body(response: Response) -> Result<Value, BuilderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v["error"]
                    .as_str()
                    .or_else(|| v["message"].as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        return Err(BuilderError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body: Value = response.json().await?;
    debug!("{:?}", body);
    Ok(body)
}

#[async_trait]
impl ServicesApi for HttpServicesApi {
    async fn llm_status(&self) -> Result<Vec<ProviderStatus>, BuilderError> {
        let response = self
            .client
            .get(self.url("/api/services/llm/status"))
            .send()
            .await?;
        let body = json_body(response).await?;

        let providers = body["data"]["providers"].clone();
        if !providers.is_array() {
            return Err(BuilderError::MalformedResponse(
                "missing data.providers list".to_string(),
            ));
        }
        Ok(serde_json::from_value(providers)?)
    }

    async fn generate_content(
        &self,
        service_id: &str,
        request: &GenerationRequest,
    ) -> Result<String, BuilderError> {
        debug!(
            "Generating {} for service {} with {}",
            request.slot, service_id, request.provider
        );
        let response = self
            .client
            .post(self.url(&format!(
                "/api/services/{}/generate-content",
                path_segment(service_id)
            )))
            .json(request)
            .send()
            .await?;
        let body = json_body(response).await?;

        body["data"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BuilderError::MalformedResponse("missing data.content".to_string()))
    }

    async fn create_page(&self, page: &CreatePageRequest) -> Result<Value, BuilderError> {
        let response = self
            .client
            .post(self.url("/api/services/pages"))
            .json(page)
            .send()
            .await?;
        let body = json_body(response).await?;

        match body.get("data") {
            Some(page) => Ok(page.clone()),
            None => Err(BuilderError::MalformedResponse("missing data".to_string())),
        }
    }

    async fn list_services(&self, endpoint: &str) -> Result<Value, BuilderError> {
        let response = self.client.get(self.url(endpoint)).send().await?;
        json_body(response).await
    }
}
