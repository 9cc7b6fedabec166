use super::{split_title, strip_bullet};
use crate::model::ParsedBenefit;

/// Parse a bulleted benefit list.
///
/// Empty or absent text falls back to the service's own benefits with empty
/// descriptions. Text without any bullet line becomes a single benefit titled
/// with the whole text.
pub fn parse_benefits(text: Option<&str>, service_benefits: &[String]) -> Vec<ParsedBenefit> {
    let text = match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => text,
        None => {
            return service_benefits
                .iter()
                .map(|benefit| ParsedBenefit {
                    title: benefit.clone(),
                    description: String::new(),
                })
                .collect()
        }
    };

    let benefits: Vec<ParsedBenefit> = text
        .lines()
        .filter_map(strip_bullet)
        .filter(|rest| !rest.is_empty())
        .map(|rest| {
            let (title, description) = split_title(rest);
            ParsedBenefit { title, description }
        })
        .collect();

    if benefits.is_empty() {
        return vec![ParsedBenefit {
            title: text.to_string(),
            description: String::new(),
        }];
    }

    benefits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benefit(title: &str, description: &str) -> ParsedBenefit {
        ParsedBenefit {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_mixed_markers_in_source_order() {
        let text = "Here is why patients love it:\n\
                    • Natural Look: Blends with your smile\n\
                    - Durable: Lasts 15 years: often longer\n\
                    3. Comfort\n\
                    Closing remark";

        assert_eq!(
            parse_benefits(Some(text), &[]),
            vec![
                benefit("Natural Look", "Blends with your smile"),
                benefit("Durable", "Lasts 15 years: often longer"),
                benefit("Comfort", ""),
            ]
        );
    }

    #[test]
    fn test_no_bullets_wraps_whole_text() {
        let text = "Implants restore chewing and confidence.";
        assert_eq!(parse_benefits(Some(text), &[]), vec![benefit(text, "")]);
    }

    #[test]
    fn test_empty_text_uses_service_benefits() {
        let service_benefits = vec!["Permanent".to_string(), "Bone preserving".to_string()];

        assert_eq!(
            parse_benefits(Some(""), &service_benefits),
            vec![benefit("Permanent", ""), benefit("Bone preserving", "")]
        );
        assert_eq!(parse_benefits(None, &service_benefits).len(), 2);
        assert!(parse_benefits(None, &[]).is_empty());
        assert!(parse_benefits(Some("  \n "), &[]).is_empty());
    }

    #[test]
    fn test_bare_markers_are_skipped() {
        assert_eq!(
            parse_benefits(Some("-\n- Quick"), &[]),
            vec![benefit("Quick", "")]
        );
    }
}
