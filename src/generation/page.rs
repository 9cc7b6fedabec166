use crate::model::{
    EditableBundle, ParsedBenefit, ParsedFaq, ParsedInstruction, ParsedStep, ServiceRecord,
    SlotKey,
};
use crate::parsers::{ParsedSection, ParserSet};
use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitsSection {
    pub title: String,
    pub items: Vec<ParsedBenefit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcedureSection {
    pub title: String,
    pub steps: Vec<ParsedStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqSection {
    pub title: String,
    pub items: Vec<ParsedFaq>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AftercareSection {
    pub title: String,
    pub instructions: Vec<ParsedInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSection {
    pub title: String,
    pub description: String,
    pub button_text: String,
}

/// The page document submitted when a generated service page is saved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    pub hero: HeroSection,
    pub overview: OverviewSection,
    pub benefits: BenefitsSection,
    pub procedure: ProcedureSection,
    pub faq: FaqSection,
    pub aftercare: AftercareSection,
    pub cta: CtaSection,
}

/// Compose the page document from edited slot texts.
///
/// Empty or missing slots fall back to the service record where one applies.
pub fn build_page_content(
    editable: &EditableBundle,
    service: &ServiceRecord,
    parsers: &ParserSet,
) -> PageContent {
    let parse = |slot: SlotKey| parsers.parse(slot, editable.get(slot), service);

    let overview = match parse(SlotKey::Overview) {
        ParsedSection::Text(Some(text)) => text,
        ParsedSection::Text(None) => service.description.clone(),
        other => mismatched(SlotKey::Overview, &other, service.description.clone()),
    };

    let benefits = match parse(SlotKey::Benefits) {
        ParsedSection::Benefits(items) => items,
        other => mismatched(SlotKey::Benefits, &other, Vec::new()),
    };

    let steps = match parse(SlotKey::Procedure) {
        ParsedSection::Steps(steps) => steps,
        other => mismatched(SlotKey::Procedure, &other, Vec::new()),
    };

    let faqs = match parse(SlotKey::Faq) {
        ParsedSection::Faqs(faqs) => faqs,
        other => mismatched(SlotKey::Faq, &other, Vec::new()),
    };

    let instructions = match parse(SlotKey::Aftercare) {
        ParsedSection::Instructions(instructions) => instructions,
        other => mismatched(SlotKey::Aftercare, &other, Vec::new()),
    };

    PageContent {
        hero: HeroSection {
            title: service.name.clone(),
            subtitle: service.short_description.clone(),
            description: overview.clone(),
        },
        overview: OverviewSection {
            title: format!("About {}", service.name),
            content: overview,
        },
        benefits: BenefitsSection {
            title: format!("Benefits of {}", service.name),
            items: benefits,
        },
        procedure: ProcedureSection {
            title: "What to Expect".to_string(),
            steps,
        },
        faq: FaqSection {
            title: "Frequently Asked Questions".to_string(),
            items: faqs,
        },
        aftercare: AftercareSection {
            title: "Aftercare Instructions".to_string(),
            instructions,
        },
        cta: CtaSection {
            title: format!("Ready to Schedule Your {}?", service.name),
            description: "Contact our office today to book your appointment.".to_string(),
            button_text: "Book Appointment".to_string(),
        },
    }
}

fn mismatched<T>(slot: SlotKey, section: &ParsedSection, fallback: T) -> T {
    warn!("Parser for '{}' returned an unexpected section: {:?}", slot, section);
    fallback
}
