use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One named content area of a generated service page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Overview,
    Benefits,
    Procedure,
    Faq,
    Aftercare,
    Seo,
}

impl SlotKey {
    pub const ALL: [SlotKey; 6] = [
        SlotKey::Overview,
        SlotKey::Benefits,
        SlotKey::Procedure,
        SlotKey::Faq,
        SlotKey::Aftercare,
        SlotKey::Seo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Overview => "overview",
            SlotKey::Benefits => "benefits",
            SlotKey::Procedure => "procedure",
            SlotKey::Faq => "faq",
            SlotKey::Aftercare => "aftercare",
            SlotKey::Seo => "seo",
        }
    }

    /// The `contentType` the generation endpoint expects for this slot
    pub fn content_type(&self) -> &'static str {
        match self {
            SlotKey::Overview => "serviceOverview",
            SlotKey::Benefits => "serviceBenefits",
            SlotKey::Procedure => "procedureSteps",
            SlotKey::Faq => "faqGeneration",
            SlotKey::Aftercare => "aftercareInstructions",
            SlotKey::Seo => "seoContent",
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SlotKey::ALL
            .into_iter()
            .find(|slot| slot.as_str() == wanted)
            .ok_or_else(|| format!("Unknown content slot: {}", s))
    }
}

/// Body of one content-generation call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(skip)]
    pub slot: SlotKey,
    pub content_type: &'static str,
    pub provider: String,
    pub temperature: f32,
    pub keywords: Vec<String>,
}

/// Outcome of generating a single slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlotResult {
    Success { text: String },
    Failure { message: String },
}

impl SlotResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SlotResult::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SlotResult::Success { text } => Some(text),
            SlotResult::Failure { .. } => None,
        }
    }
}

/// Results of one generation run, keyed by slot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContentBundle {
    results: BTreeMap<SlotKey, SlotResult>,
}

impl ContentBundle {
    pub fn insert(&mut self, slot: SlotKey, result: SlotResult) {
        self.results.insert(slot, result);
    }

    pub fn get(&self, slot: SlotKey) -> Option<&SlotResult> {
        self.results.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &SlotResult)> {
        self.results.iter().map(|(slot, result)| (*slot, result))
    }

    pub fn failures(&self) -> impl Iterator<Item = (SlotKey, &str)> {
        self.iter().filter_map(|(slot, result)| match result {
            SlotResult::Failure { message } => Some((slot, message.as_str())),
            SlotResult::Success { .. } => None,
        })
    }

    /// Copy the successful slots into a bundle the user can edit.
    pub fn to_editable(&self) -> EditableBundle {
        let mut editable = EditableBundle::default();
        for (slot, result) in self.iter() {
            if let Some(text) = result.text() {
                editable.set(slot, text);
            }
        }
        editable
    }
}

/// User-editable slot texts, owned independently of the generated bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditableBundle {
    texts: BTreeMap<SlotKey, String>,
}

impl EditableBundle {
    pub fn get(&self, slot: SlotKey) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn set(&mut self, slot: SlotKey, text: impl Into<String>) {
        self.texts.insert(slot, text.into());
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedBenefit {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStep {
    pub step_number: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFaq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedInstruction {
    pub title: String,
    pub description: String,
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

/// The service a page is generated for, as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub keywords: Vec<String>,
    pub category: Option<String>,
}

/// One entry of the site service menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    /// Empty when the backend item carries no id
    pub id: String,
    pub name: String,
    pub category: String,
    pub slug: Option<String>,
}

pub const DEFAULT_CATEGORY: &str = "general";

impl ServiceSummary {
    /// Read a menu entry from a loosely shaped backend item.
    ///
    /// Only a name is required; items without one are skipped by returning
    /// `None`. A missing id is kept as an empty string.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = id_string(&value["id"]).unwrap_or_default();
        let name = non_empty(&value["name"]).or_else(|| non_empty(&value["title"]))?;
        let category = non_empty(&value["category"]).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let slug = non_empty(&value["slug"]);

        Some(ServiceSummary {
            id,
            name,
            category,
            slug,
        })
    }
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Backend ids are strings for pages and integers for legacy services
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(id_string(&value).unwrap_or_default())
}
