use super::{split_title, strip_bullet};
use crate::model::ParsedInstruction;

pub const DEFAULT_TIMEFRAME: &str = "As directed";

const FALLBACK_TITLE: &str = "Follow Instructions";

/// Parse bulleted aftercare instructions.
///
/// Uses the same bullet and colon rules as benefits. Unbulleted text becomes
/// a single "Follow Instructions" entry; empty text yields nothing.
pub fn parse_aftercare_instructions(text: &str) -> Vec<ParsedInstruction> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let instructions: Vec<ParsedInstruction> = text
        .lines()
        .filter_map(strip_bullet)
        .filter(|rest| !rest.is_empty())
        .map(|rest| {
            let (title, description) = split_title(rest);
            ParsedInstruction {
                title,
                description,
                timeframe: DEFAULT_TIMEFRAME.to_string(),
            }
        })
        .collect();

    if instructions.is_empty() {
        return vec![ParsedInstruction {
            title: FALLBACK_TITLE.to_string(),
            description: text.to_string(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
        }];
    }

    instructions
}
