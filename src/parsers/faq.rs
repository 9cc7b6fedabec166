use crate::model::ParsedFaq;
use once_cell::sync::Lazy;
use regex::Regex;

pub const FALLBACK_QUESTION: &str = "What should I expect?";

static QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:question|q):").unwrap());
static ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:answer|a):").unwrap());

#[derive(Default)]
struct Block {
    question: String,
    answer: Option<String>,
}

impl Block {
    fn finish(self) -> Option<ParsedFaq> {
        let answer = self.answer.unwrap_or_default();
        if self.question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(ParsedFaq {
            question: self.question,
            answer,
        })
    }
}

/// Parse `Q:`/`A:` blocks into question and answer pairs.
///
/// Text without a single complete pair becomes one fallback FAQ whose answer
/// is the whole input.
pub fn parse_faqs(text: &str) -> Vec<ParsedFaq> {
    let mut faqs = Vec::new();
    let mut current: Option<Block> = None;

    for line in text.lines().map(str::trim) {
        if let Some(marker) = QUESTION.find(line) {
            if let Some(block) = current.take() {
                faqs.extend(block.finish());
            }
            current = Some(Block {
                question: line[marker.end()..].trim().to_string(),
                answer: None,
            });
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if let Some(marker) = ANSWER.find(line) {
            let rest = line[marker.end()..].trim();
            match block.answer.as_mut() {
                Some(answer) => append(answer, rest),
                None => block.answer = Some(rest.to_string()),
            }
        } else if let Some(answer) = block.answer.as_mut() {
            append(answer, line);
        }
    }

    if let Some(block) = current.take() {
        faqs.extend(block.finish());
    }

    if faqs.is_empty() {
        return vec![ParsedFaq {
            question: FALLBACK_QUESTION.to_string(),
            answer: text.trim().to_string(),
        }];
    }

    faqs
}

fn append(answer: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    if !answer.is_empty() {
        answer.push(' ');
    }
    answer.push_str(line);
}
