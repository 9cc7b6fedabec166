//! Heuristic parsers that turn free-form LLM output into structured page sections.
//!
//! Every parser is total: unstructured input degrades to a documented fallback
//! instead of an error. Each slot's parser sits behind [`ContentParser`] so a
//! structured-output implementation can replace a heuristic one through
//! [`ParserSet::with`] without touching the generation code.

mod aftercare;
mod benefits;
mod faq;
mod procedure;
mod seo;

pub use aftercare::{parse_aftercare_instructions, DEFAULT_TIMEFRAME};
pub use benefits::parse_benefits;
pub use faq::{parse_faqs, FALLBACK_QUESTION};
pub use procedure::parse_procedure_steps;
pub use seo::{parse_seo_meta, SeoFallback};

use crate::model::{
    ParsedBenefit, ParsedFaq, ParsedInstruction, ParsedStep, SeoMeta, ServiceRecord, SlotKey,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:•|-|\d+\.)\s*").unwrap());

/// Returns the text after a leading `•`, `-` or `<digits>.` marker.
pub(crate) fn strip_bullet(line: &str) -> Option<&str> {
    let line = line.trim();
    BULLET_MARKER
        .find(line)
        .map(|marker| line[marker.end()..].trim())
}

/// Splits `title: description` at the first colon.
pub(crate) fn split_title(line: &str) -> (String, String) {
    match line.split_once(':') {
        Some((title, description)) => (title.trim().to_string(), description.trim().to_string()),
        None => (line.trim().to_string(), String::new()),
    }
}

/// A parsed slot, one variant per section shape
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSection {
    Text(Option<String>),
    Benefits(Vec<ParsedBenefit>),
    Steps(Vec<ParsedStep>),
    Faqs(Vec<ParsedFaq>),
    Instructions(Vec<ParsedInstruction>),
    Seo(SeoMeta),
}

/// Converts one slot's text into its structured shape
pub trait ContentParser: Send + Sync {
    /// The slot this parser handles
    fn slot(&self) -> SlotKey;

    /// Parse the slot text; `None` means the slot is absent from the bundle.
    fn parse(&self, text: Option<&str>, service: &ServiceRecord) -> ParsedSection;
}

pub struct OverviewParser;

impl ContentParser for OverviewParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Overview
    }

    fn parse(&self, text: Option<&str>, _service: &ServiceRecord) -> ParsedSection {
        ParsedSection::Text(
            text.map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        )
    }
}

pub struct BenefitsParser;

impl ContentParser for BenefitsParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Benefits
    }

    fn parse(&self, text: Option<&str>, service: &ServiceRecord) -> ParsedSection {
        ParsedSection::Benefits(parse_benefits(text, &service.benefits))
    }
}

pub struct ProcedureParser;

impl ContentParser for ProcedureParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Procedure
    }

    fn parse(&self, text: Option<&str>, _service: &ServiceRecord) -> ParsedSection {
        ParsedSection::Steps(parse_procedure_steps(text.unwrap_or_default()))
    }
}

pub struct FaqParser;

impl ContentParser for FaqParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Faq
    }

    fn parse(&self, text: Option<&str>, _service: &ServiceRecord) -> ParsedSection {
        match text.filter(|t| !t.trim().is_empty()) {
            Some(text) => ParsedSection::Faqs(parse_faqs(text)),
            None => ParsedSection::Faqs(Vec::new()),
        }
    }
}

pub struct AftercareParser;

impl ContentParser for AftercareParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Aftercare
    }

    fn parse(&self, text: Option<&str>, _service: &ServiceRecord) -> ParsedSection {
        ParsedSection::Instructions(parse_aftercare_instructions(text.unwrap_or_default()))
    }
}

pub struct SeoParser;

impl ContentParser for SeoParser {
    fn slot(&self) -> SlotKey {
        SlotKey::Seo
    }

    fn parse(&self, text: Option<&str>, service: &ServiceRecord) -> ParsedSection {
        ParsedSection::Seo(parse_seo_meta(text, &SeoFallback::from(service)))
    }
}

/// The parser used for each slot
pub struct ParserSet {
    parsers: HashMap<SlotKey, Box<dyn ContentParser>>,
}

impl ParserSet {
    /// The line-oriented heuristics for all six slots
    pub fn heuristic() -> Self {
        ParserSet {
            parsers: HashMap::new(),
        }
        .with(Box::new(OverviewParser))
        .with(Box::new(BenefitsParser))
        .with(Box::new(ProcedureParser))
        .with(Box::new(FaqParser))
        .with(Box::new(AftercareParser))
        .with(Box::new(SeoParser))
    }

    /// Replace the parser for the slot `parser` handles.
    pub fn with(mut self, parser: Box<dyn ContentParser>) -> Self {
        self.parsers.insert(parser.slot(), parser);
        self
    }

    pub fn parse(&self, slot: SlotKey, text: Option<&str>, service: &ServiceRecord) -> ParsedSection {
        match self.parsers.get(&slot) {
            Some(parser) => parser.parse(text, service),
            // Unreachable for sets built from `heuristic()`
            None => ParsedSection::Text(text.map(String::from)),
        }
    }
}

impl Default for ParserSet {
    fn default() -> Self {
        Self::heuristic()
    }
}
