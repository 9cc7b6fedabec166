//! Header widget controller that loads and renders the site's service menu.
//!
//! One [`ServiceListLoader`] owns the cache, the in-flight flag and the current
//! view for one mounted widget. Fetches are single-flight unless forced, and a
//! response that arrives after a newer request was issued is discarded.

mod target;
mod view;

pub use target::{services_endpoint, service_href, WidgetHost, WEBSITE_ID_ATTRIBUTE};
pub use view::{group_services, MenuGroup, MenuItem, WidgetAction, WidgetView, EMPTY_MENU_TEXT};

use crate::api::ServicesApi;
use crate::config::AppConfig;
use crate::model::ServiceSummary;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// What a call to [`ServiceListLoader::request`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A fetch was already in flight
    Skipped,
    /// Rendered from a fresh cache without fetching
    Cached,
    /// Fetched and rendered this many services
    Fetched(usize),
    /// The fetch failed and the error view is shown
    Failed,
    /// A newer request was issued while this one was in flight
    Superseded,
}

/// Last successful fetch
#[derive(Debug, Clone)]
pub struct ServiceListCache {
    pub items: Vec<ServiceSummary>,
    pub fetched_at: Instant,
}

struct LoaderState {
    phase: LoadPhase,
    cache: Option<ServiceListCache>,
    generation: u64,
    view: WidgetView,
}

/// Pull the service list out of any of the accepted response shapes.
///
/// Accepts `{servicePages: [..]}`, `{services: [..]}` or a bare list, either at
/// the top level or inside a `data` envelope. Anything else is an empty list.
pub fn extract_services(body: &Value) -> Vec<ServiceSummary> {
    let candidates = [body, &body["data"]];
    let list = candidates.iter().find_map(|value| {
        value["servicePages"]
            .as_array()
            .or_else(|| value["services"].as_array())
            .or_else(|| value.as_array())
    });

    match list {
        Some(items) => items.iter().filter_map(ServiceSummary::from_value).collect(),
        None => {
            warn!("Unrecognized service list response, treating as empty");
            Vec::new()
        }
    }
}

pub struct ServiceListLoader {
    api: Arc<dyn ServicesApi>,
    website_id: Option<String>,
    endpoint: String,
    ttl: Duration,
    state: Mutex<LoaderState>,
}

impl ServiceListLoader {
    pub fn new(api: Arc<dyn ServicesApi>, host: &WidgetHost) -> Self {
        let website_id = host.resolve_website_id();
        let endpoint = services_endpoint(website_id.as_deref());
        debug!("Service menu endpoint: {}", endpoint);

        ServiceListLoader {
            api,
            website_id,
            endpoint,
            ttl: DEFAULT_CACHE_TTL,
            state: Mutex::new(LoaderState {
                phase: LoadPhase::Idle,
                cache: None,
                generation: 0,
                view: WidgetView::Idle,
            }),
        }
    }

    /// Build a loader using the configured TTL and fallback website id.
    pub fn from_config(api: Arc<dyn ServicesApi>, host: WidgetHost, config: &AppConfig) -> Self {
        let host = match (&host.global_website_id, &config.widget.website_id) {
            (None, Some(website_id)) => host.with_global_website_id(website_id.clone()),
            _ => host,
        };
        Self::new(api, &host).with_ttl(Duration::from_secs(config.widget.cache_ttl_secs))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn website_id(&self) -> Option<&str> {
        self.website_id.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock().phase
    }

    pub fn view(&self) -> WidgetView {
        self.lock().view.clone()
    }

    pub fn render_html(&self) -> String {
        self.lock().view.render_html()
    }

    /// Mount entry point; repeated calls inside the TTL are cache reads.
    pub async fn init(&self) -> LoadOutcome {
        self.request(false).await
    }

    /// Reload entry point used by the host page.
    pub async fn reload(&self, force: bool) -> LoadOutcome {
        self.request(force).await
    }

    /// A service was created elsewhere in the app: drop the cache and refetch.
    pub async fn on_service_created(&self) -> LoadOutcome {
        info!("Service created, invalidating service menu cache");
        self.lock().cache = None;
        self.request(true).await
    }

    /// Handle a `data-action` emitted by the rendered view.
    pub async fn dispatch(&self, action: WidgetAction) -> LoadOutcome {
        match action {
            WidgetAction::Retry => self.request(true).await,
        }
    }

    pub async fn request(&self, force: bool) -> LoadOutcome {
        let generation = {
            let mut state = self.lock();

            if state.phase == LoadPhase::Loading && !force {
                debug!("Service list fetch already in flight");
                return LoadOutcome::Skipped;
            }

            if !force {
                let fresh = state
                    .cache
                    .as_ref()
                    .filter(|cache| cache.fetched_at.elapsed() < self.ttl)
                    .map(|cache| group_services(&cache.items, self.website_id.as_deref()));
                if let Some(groups) = fresh {
                    debug!("Rendering service menu from cache");
                    state.phase = LoadPhase::Ready;
                    state.view = WidgetView::Menu(groups);
                    return LoadOutcome::Cached;
                }
            }

            state.generation += 1;
            state.phase = LoadPhase::Loading;
            state.view = WidgetView::Loading;
            state.generation
        };

        let result = self.api.list_services(&self.endpoint).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Discarding service list response {} (latest is {})",
                generation, state.generation
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(body) => {
                let items = extract_services(&body);
                let count = items.len();
                info!("Loaded {} service(s) for the menu", count);

                state.view = WidgetView::Menu(group_services(&items, self.website_id.as_deref()));
                state.cache = Some(ServiceListCache {
                    items,
                    fetched_at: Instant::now(),
                });
                state.phase = LoadPhase::Ready;
                LoadOutcome::Fetched(count)
            }
            Err(e) => {
                warn!("Failed to load services: {}", e);
                state.view = WidgetView::Error {
                    message: e.to_string(),
                };
                state.phase = LoadPhase::Error;
                LoadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CreatePageRequest;
    use crate::error::BuilderError;
    use crate::model::GenerationRequest;
    use crate::providers::ProviderStatus;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    /// Serves `body` for every listing call; the first call can be held back
    /// until the test releases it through `gate`.
    struct FakeListing {
        body: Value,
        calls: AtomicUsize,
        gate: Mutex<Option<oneshot::Receiver<Value>>>,
        fail: bool,
    }

    impl FakeListing {
        fn new(body: Value) -> Self {
            FakeListing {
                body,
                calls: AtomicUsize::new(0),
                gate: Mutex::new(None),
                fail: false,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ServicesApi for FakeListing {
        async fn llm_status(&self) -> Result<Vec<ProviderStatus>, BuilderError> {
            Ok(Vec::new())
        }

        async fn generate_content(
            &self,
            _service_id: &str,
            _request: &GenerationRequest,
        ) -> Result<String, BuilderError> {
            Ok(String::new())
        }

        async fn create_page(&self, _page: &CreatePageRequest) -> Result<Value, BuilderError> {
            Ok(Value::Null)
        }

        async fn list_services(&self, _endpoint: &str) -> Result<Value, BuilderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                return gate
                    .await
                    .map_err(|_| BuilderError::MalformedResponse("gate dropped".to_string()));
            }
            if self.fail {
                return Err(BuilderError::Status {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                });
            }
            Ok(self.body.clone())
        }
    }

    fn listing() -> Value {
        json!({"servicePages": [
            {"id": 1, "name": "Cleaning", "category": "general", "slug": "cleaning"},
            {"id": 2, "name": "Veneers", "category": "cosmetic"}
        ]})
    }

    fn loader(api: &Arc<FakeListing>) -> ServiceListLoader {
        let host = WidgetHost::default().with_global_website_id("w1");
        ServiceListLoader::new(api.clone(), &host)
    }

    #[test]
    fn test_extract_services_shapes() {
        let item = json!({"id": 1, "name": "Cleaning"});
        assert_eq!(extract_services(&json!({"servicePages": [item.clone()]})).len(), 1);
        assert_eq!(extract_services(&json!({"services": [item.clone(), item.clone()]})).len(), 2);
        assert_eq!(extract_services(&json!([item.clone()])).len(), 1);
        assert_eq!(extract_services(&json!({"data": {"services": [item.clone()]}})).len(), 1);
        assert_eq!(extract_services(&json!({"data": [item.clone()]})).len(), 1);
        assert!(extract_services(&json!({"items": [item]})).is_empty());
        assert!(extract_services(&Value::Null).is_empty());
    }

    #[test]
    fn test_items_need_only_a_name() {
        let body = json!({"services": [
            {"name": "Whitening", "slug": "whitening"},
            {"name": "Mystery"},
            {"id": 3, "slug": "nameless"}
        ]});
        let services = extract_services(&body);
        assert_eq!(services.len(), 2);

        let groups = group_services(&services, None);
        assert_eq!(groups[0].items[0].href, "/services/whitening");
        assert_eq!(groups[0].items[1].href, "#");
    }

    #[test]
    fn test_service_pages_shape_wins() {
        let body = json!({
            "servicePages": [{"id": 1, "name": "From pages"}],
            "services": [{"id": 2, "name": "From services"}]
        });
        let services = extract_services(&body);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "From pages");
    }

    #[tokio::test]
    async fn test_requests_within_ttl_fetch_once() {
        let api = Arc::new(FakeListing::new(listing()));
        let loader = loader(&api);

        assert_eq!(loader.phase(), LoadPhase::Idle);
        assert_eq!(loader.init().await, LoadOutcome::Fetched(2));
        assert_eq!(loader.init().await, LoadOutcome::Cached);
        assert_eq!(loader.reload(false).await, LoadOutcome::Cached);
        assert_eq!(api.calls(), 1);
        assert_eq!(loader.phase(), LoadPhase::Ready);

        assert_eq!(loader.reload(true).await, LoadOutcome::Fetched(2));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_ttl() {
        let api = Arc::new(FakeListing::new(listing()));
        let loader = loader(&api);

        loader.init().await;
        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(loader.init().await, LoadOutcome::Cached);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(loader.init().await, LoadOutcome::Fetched(2));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_in_flight_request_is_single_flight() {
        let api = Arc::new(FakeListing::new(listing()));
        let (release, gate) = oneshot::channel();
        *api.gate.lock().unwrap() = Some(gate);
        let loader = loader(&api);

        let (first, second) = tokio::join!(loader.request(false), async {
            let second = loader.request(false).await;
            assert_eq!(loader.view(), WidgetView::Loading);
            release.send(listing()).unwrap();
            second
        });

        assert_eq!(second, LoadOutcome::Skipped);
        assert_eq!(first, LoadOutcome::Fetched(2));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(FakeListing::new(listing()));
        let (release, gate) = oneshot::channel();
        *api.gate.lock().unwrap() = Some(gate);
        let loader = loader(&api);

        let (first, forced) = tokio::join!(loader.request(false), async {
            let forced = loader.request(true).await;
            release
                .send(json!({"services": [{"id": 9, "name": "Stale"}]}))
                .unwrap();
            forced
        });

        assert_eq!(forced, LoadOutcome::Fetched(2));
        assert_eq!(first, LoadOutcome::Superseded);
        match loader.view() {
            WidgetView::Menu(groups) => {
                let names: Vec<_> = groups
                    .iter()
                    .flat_map(|g| g.items.iter().map(|i| i.name.as_str()))
                    .collect();
                assert_eq!(names, vec!["Cleaning", "Veneers"]);
            }
            other => panic!("Expected menu, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_shows_error_and_retry_recovers() {
        let mut fake = FakeListing::new(listing());
        fake.fail = true;
        let api = Arc::new(fake);
        let loader = loader(&api);

        assert_eq!(loader.init().await, LoadOutcome::Failed);
        assert_eq!(loader.phase(), LoadPhase::Error);
        assert!(loader.render_html().contains(r#"data-action="retry""#));

        // A failed fetch leaves nothing cached, so a plain init refetches
        assert_eq!(loader.init().await, LoadOutcome::Failed);
        assert_eq!(loader.dispatch(WidgetAction::Retry).await, LoadOutcome::Failed);
        assert_eq!(api.calls(), 3);
    }

    #[tokio::test]
    async fn test_service_created_invalidates_cache() {
        let api = Arc::new(FakeListing::new(listing()));
        let loader = loader(&api);

        loader.init().await;
        assert_eq!(loader.on_service_created().await, LoadOutcome::Fetched(2));
        assert_eq!(loader.init().await, LoadOutcome::Cached);
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_links_are_scoped_to_website() {
        let api = Arc::new(FakeListing::new(listing()));
        let loader = loader(&api);
        loader.init().await;

        let html = loader.render_html();
        assert!(html.contains(r#"href="/websites/w1/services/cleaning""#));
        assert!(html.contains(r#"href="/websites/w1/services/2""#));
        assert_eq!(loader.endpoint(), "/api/services/pages?websiteId=w1&isIntegrated=true");
    }

    #[test]
    fn test_from_config_uses_configured_website() {
        let api: Arc<dyn ServicesApi> = Arc::new(FakeListing::new(listing()));
        let mut config = AppConfig::default();
        config.widget.website_id = Some("cfg-site".to_string());
        config.widget.cache_ttl_secs = 10;

        let loader = ServiceListLoader::from_config(api.clone(), WidgetHost::default(), &config);
        assert_eq!(loader.website_id(), Some("cfg-site"));
        assert_eq!(loader.ttl, Duration::from_secs(10));

        let host = WidgetHost::default().with_global_website_id("page-site");
        let loader = ServiceListLoader::from_config(api, host, &config);
        assert_eq!(loader.website_id(), Some("page-site"));
    }
}
