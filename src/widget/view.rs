use super::target::service_href;
use crate::model::ServiceSummary;
use html_escape::{encode_double_quoted_attribute, encode_text};

pub const EMPTY_MENU_TEXT: &str = "No services available";

/// User actions the rendered widget can emit through `data-action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    Retry,
}

impl WidgetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetAction::Retry => "retry",
        }
    }

    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "retry" => Some(WidgetAction::Retry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuGroup {
    pub category: String,
    pub label: String,
    pub items: Vec<MenuItem>,
}

/// What the widget currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    Idle,
    Loading,
    Error { message: String },
    Menu(Vec<MenuGroup>),
}

/// Group services by category, in order of each category's first appearance.
pub fn group_services(services: &[ServiceSummary], website_id: Option<&str>) -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Vec::new();

    for service in services {
        let item = MenuItem {
            name: service.name.clone(),
            href: service_href(service, website_id),
        };
        match groups.iter_mut().find(|g| g.category == service.category) {
            Some(group) => group.items.push(item),
            None => groups.push(MenuGroup {
                category: service.category.clone(),
                label: category_label(&service.category),
                items: vec![item],
            }),
        }
    }

    groups
}

/// `cosmetic-dentistry` -> `Cosmetic Dentistry`
fn category_label(category: &str) -> String {
    category
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl WidgetView {
    pub fn render_html(&self) -> String {
        match self {
            WidgetView::Idle => String::new(),
            WidgetView::Loading => {
                r#"<div class="service-menu__loading" role="status">Loading services...</div>"#
                    .to_string()
            }
            WidgetView::Error { message } => format!(
                r#"<div class="service-menu__error" role="alert"><span title="{}">Unable to load services</span><button type="button" data-action="{}">Retry</button></div>"#,
                encode_double_quoted_attribute(message),
                WidgetAction::Retry.as_str()
            ),
            WidgetView::Menu(groups) if groups.is_empty() => format!(
                r#"<ul class="service-menu"><li class="service-menu__empty">{}</li></ul>"#,
                EMPTY_MENU_TEXT
            ),
            WidgetView::Menu(groups) => {
                let mut html = String::from(r#"<ul class="service-menu">"#);
                for group in groups {
                    html.push_str(&format!(
                        r#"<li class="service-menu__group" data-category="{}"><span class="service-menu__category">{}</span><ul>"#,
                        encode_double_quoted_attribute(&group.category),
                        encode_text(&group.label)
                    ));
                    for item in &group.items {
                        html.push_str(&format!(
                            r#"<li class="service-menu__item"><a href="{}">{}</a></li>"#,
                            encode_double_quoted_attribute(&item.href),
                            encode_text(&item.name)
                        ));
                    }
                    html.push_str("</ul></li>");
                }
                html.push_str("</ul>");
                html
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn service(id: &str, name: &str, category: &str) -> ServiceSummary {
        ServiceSummary {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            slug: None,
        }
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let services = vec![
            service("1", "Veneers", "cosmetic"),
            service("2", "Cleaning", "general"),
            service("3", "Whitening", "cosmetic"),
            service("4", "Fillings", "general"),
        ];

        let groups = group_services(&services, None);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "cosmetic");
        assert_eq!(groups[0].items[0].name, "Veneers");
        assert_eq!(groups[0].items[1].name, "Whitening");
        assert_eq!(groups[1].label, "General");
        assert_eq!(groups[1].items[1].href, "/services/4");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("cosmetic-dentistry"), "Cosmetic Dentistry");
        assert_eq!(category_label("oral_surgery"), "Oral Surgery");
    }

    #[test]
    fn test_menu_html_is_escaped() {
        let groups = group_services(&[service("1", "Crowns & <Bridges>", "general")], Some("w1"));
        let html = WidgetView::Menu(groups).render_html();

        let document = Html::parse_fragment(&html);
        let links = Selector::parse("a").unwrap();
        let link = document.select(&links).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("/websites/w1/services/1"));
        assert_eq!(link.text().collect::<String>(), "Crowns & <Bridges>");
    }

    #[test]
    fn test_empty_menu_has_placeholder_and_no_links() {
        let html = WidgetView::Menu(Vec::new()).render_html();
        let document = Html::parse_fragment(&html);

        let items = Selector::parse("li").unwrap();
        let links = Selector::parse("a").unwrap();
        assert_eq!(document.select(&items).count(), 1);
        assert_eq!(document.select(&links).count(), 0);
        assert!(html.contains(EMPTY_MENU_TEXT));
    }

    #[test]
    fn test_error_view_has_retry_action() {
        let html = WidgetView::Error {
            message: "status 502".to_string(),
        }
        .render_html();
        let document = Html::parse_fragment(&html);
        let button = Selector::parse("button[data-action]").unwrap();
        let action = document
            .select(&button)
            .next()
            .and_then(|b| b.value().attr("data-action"))
            .and_then(WidgetAction::parse);
        assert_eq!(action, Some(WidgetAction::Retry));
    }
}
