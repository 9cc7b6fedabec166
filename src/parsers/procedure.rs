use super::split_title;
use crate::model::ParsedStep;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static STEP_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bstep\b").unwrap());
static STEP_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^step\s*\d+\s*[:.]?\s*").unwrap());

/// Parse numbered or `Step n:` lines into ordered steps.
///
/// Step numbers are assigned 1..N in output order; digits printed in the
/// source are discarded.
pub fn parse_procedure_steps(text: &str) -> Vec<ParsedStep> {
    text.lines()
        .map(str::trim)
        .filter(|line| NUMBERED.is_match(line) || STEP_WORD.is_match(line))
        .filter_map(|line| {
            let rest = NUMBER_PREFIX.replace(line, "");
            let rest = STEP_PREFIX.replace(rest.trim(), "");
            let rest = rest.trim();
            if rest.is_empty() {
                None
            } else {
                Some(split_title(rest))
            }
        })
        .zip(1..)
        .map(|((title, description), step_number)| ParsedStep {
            step_number,
            title,
            description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_follow_output_order() {
        let steps = parse_procedure_steps("5. Clean\n2. Numb");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step_number, 1);
        assert_eq!(steps[0].title, "Clean");
        assert_eq!(steps[1].step_number, 2);
        assert_eq!(steps[1].title, "Numb");
    }

    #[test]
    fn test_step_prefixes_are_stripped() {
        let text = "What happens during your visit:\n\
                    Step 1: Consultation: We review your x-rays\n\
                    STEP 2. Cleaning\n\
                    3. Step 3: Placement: The implant is placed\n\
                    Thank you for reading.";

        let steps = parse_procedure_steps(text);
        assert_eq!(steps.len(), 3);

        assert_eq!(steps[0].title, "Consultation");
        assert_eq!(steps[0].description, "We review your x-rays");
        assert_eq!(steps[1].title, "Cleaning");
        assert_eq!(steps[1].step_number, 2);
        assert_eq!(steps[2].title, "Placement");
        assert_eq!(steps[2].description, "The implant is placed");
        assert_eq!(steps[2].step_number, 3);
    }

    #[test]
    fn test_step_detection_ignores_case() {
        let steps = parse_procedure_steps("step one: Numbing
footsteps in the hall");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "step one");
        assert_eq!(steps[0].description, "Numbing");
    }

    #[test]
    fn test_lines_mentioning_step_are_kept() {
        let steps = parse_procedure_steps("Final Step: Polish the crown");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Final Step");
        assert_eq!(steps[0].description, "Polish the crown");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_procedure_steps("").is_empty());
        assert!(parse_procedure_steps("No structure here").is_empty());
    }
}
