use crate::api::path_segment;
use crate::model::ServiceSummary;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::form_urlencoded::byte_serialize;
use url::Url;

pub const WEBSITE_ID_ATTRIBUTE: &str = "data-website-id";

static WEBSITE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|/)websites?/([^/?#]+)").unwrap());

/// Where the widget is mounted, and every place a website id may come from
#[derive(Debug, Clone, Default)]
pub struct WidgetHost {
    /// Value set by the hosting application for the whole page
    pub global_website_id: Option<String>,
    /// `data-website-id` of the widget root element
    pub root_website_id: Option<String>,
    /// URL of the page the widget is rendered into
    pub page_url: Option<Url>,
}

impl WidgetHost {
    /// Describe a host page from its markup and URL.
    pub fn from_html(html: &str, page_url: Option<&str>) -> Self {
        let document = Html::parse_document(html);
        let selector = Selector::parse(&format!("[{}]", WEBSITE_ID_ATTRIBUTE)).unwrap();
        let root_website_id = document
            .select(&selector)
            .next()
            .and_then(|root| root.value().attr(WEBSITE_ID_ATTRIBUTE))
            .map(String::from);

        WidgetHost {
            global_website_id: None,
            root_website_id,
            page_url: page_url.and_then(|u| Url::parse(u).ok()),
        }
    }

    pub fn with_global_website_id(mut self, website_id: impl Into<String>) -> Self {
        self.global_website_id = Some(website_id.into());
        self
    }

    /// Resolve the website id: global value, root attribute, query
    /// parameter, then a `/websites/<id>` path segment.
    pub fn resolve_website_id(&self) -> Option<String> {
        let from_query = || {
            self.page_url.as_ref().and_then(|url| {
                url.query_pairs()
                    .find(|(key, value)| {
                        (key == "websiteId" || key == "website_id") && !value.trim().is_empty()
                    })
                    .map(|(_, value)| value.into_owned())
            })
        };
        let from_path = || {
            self.page_url.as_ref().and_then(|url| {
                WEBSITE_PATH
                    .captures(url.path())
                    .map(|caps| caps[1].to_string())
            })
        };

        non_blank(self.global_website_id.as_deref())
            .or_else(|| non_blank(self.root_website_id.as_deref()))
            .or_else(|| non_blank(from_query().as_deref()))
            .or_else(|| non_blank(from_path().as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// The listing endpoint for a website, or the generic active-services listing.
pub fn services_endpoint(website_id: Option<&str>) -> String {
    match website_id {
        Some(id) => format!(
            "/api/services/pages?websiteId={}&isIntegrated=true",
            byte_serialize(id.as_bytes()).collect::<String>()
        ),
        None => "/api/services?isActive=true&limit=50".to_string(),
    }
}

/// Link for a menu entry, preferring slugs and website-scoped paths.
///
/// Website ids, slugs and ids are percent-encoded as path segments.
pub fn service_href(service: &ServiceSummary, website_id: Option<&str>) -> String {
    let target = service
        .slug
        .as_deref()
        .or_else(|| Some(service.id.as_str()).filter(|id| !id.is_empty()));

    match (website_id, target) {
        (Some(website), Some(target)) => format!(
            "/websites/{}/services/{}",
            path_segment(website),
            path_segment(target)
        ),
        (None, Some(target)) => format!("/services/{}", path_segment(target)),
        (_, None) => "#".to_string(),
    }
}
