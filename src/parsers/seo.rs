use crate::model::{SeoMeta, ServiceRecord};

/// Service values used for SEO fields the generated text does not provide
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeoFallback {
    pub name: String,
    pub short_description: String,
    pub keywords: Vec<String>,
}

impl From<&ServiceRecord> for SeoFallback {
    fn from(service: &ServiceRecord) -> Self {
        SeoFallback {
            name: service.name.clone(),
            short_description: service.short_description.clone(),
            keywords: service.keywords.clone(),
        }
    }
}

impl SeoFallback {
    fn title(&self) -> String {
        format!("{} | Professional Dental Care", self.name)
    }
}

/// Read `Meta Title:`, `Meta Description:` and `Keywords:` lines.
///
/// Missing or empty fields fall back to the service values.
pub fn parse_seo_meta(text: Option<&str>, fallback: &SeoFallback) -> SeoMeta {
    let mut meta_title = None;
    let mut meta_description = None;
    let mut keywords = None;

    for line in text.unwrap_or_default().lines().map(str::trim) {
        let lower = line.to_lowercase();
        let value = match line.split_once(':') {
            Some((_, value)) => value.trim(),
            None => continue,
        };
        if value.is_empty() {
            continue;
        }

        if lower.starts_with("meta title:") {
            meta_title = Some(value.to_string());
        } else if lower.starts_with("meta description:") {
            meta_description = Some(value.to_string());
        } else if lower.starts_with("keywords:") {
            let parsed: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
            if !parsed.is_empty() {
                keywords = Some(parsed);
            }
        }
    }

    SeoMeta {
        meta_title: meta_title.unwrap_or_else(|| fallback.title()),
        meta_description: meta_description.unwrap_or_else(|| fallback.short_description.clone()),
        keywords: keywords.unwrap_or_else(|| fallback.keywords.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> SeoFallback {
        SeoFallback {
            name: "Teeth Whitening".to_string(),
            short_description: "A brighter smile in one visit".to_string(),
            keywords: vec!["whitening".to_string()],
        }
    }

    #[test]
    fn test_partial_fields_fall_back() {
        let meta = parse_seo_meta(Some("Meta Title: Foo\nKeywords: a, b, c"), &fallback());
        assert_eq!(meta.meta_title, "Foo");
        assert_eq!(meta.keywords, vec!["a", "b", "c"]);
        assert_eq!(meta.meta_description, "A brighter smile in one visit");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let meta = parse_seo_meta(
            Some("META DESCRIPTION: Fast results: guaranteed\nkeywords: ,teeth, ,smile,"),
            &fallback(),
        );
        assert_eq!(meta.meta_title, "Teeth Whitening | Professional Dental Care");
        assert_eq!(meta.meta_description, "Fast results: guaranteed");
        assert_eq!(meta.keywords, vec!["teeth", "smile"]);
    }

    #[test]
    fn test_absent_text_is_full_fallback() {
        let meta = parse_seo_meta(None, &fallback());
        assert_eq!(
            meta,
            SeoMeta {
                meta_title: "Teeth Whitening | Professional Dental Care".to_string(),
                meta_description: "A brighter smile in one visit".to_string(),
                keywords: vec!["whitening".to_string()],
            }
        );
    }

    #[test]
    fn test_keywords_may_be_empty() {
        let meta = parse_seo_meta(Some("Meta Title: Foo"), &SeoFallback::default());
        assert!(meta.keywords.is_empty());
    }
}
