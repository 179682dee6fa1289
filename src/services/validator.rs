//! Question format validation
//!
//! Pure structural checks of generated question text against the rules of
//! each question kind. Validation is advisory: the result is data, the
//! teacher can always override and keep the question anyway.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::question::QuestionType;

lazy_static! {
    /// A line of the form "Answer: B" (single letter, any case).
    static ref CHOICE_ANSWER_LINE: Regex =
        Regex::new(r"(?im)^\s*answer\s*:\s*[a-d]\s*$").expect("valid regex");
}

/// Blank placeholders accepted in fill-in-the-blank stems.
const BLANK_MARKERS: [&str; 3] = ["......", "…", "___"];

/// Outcome of a format check.
///
/// Valid iff `errors` is empty; `warnings` are recommendations that never
/// fail the check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FormatReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `content` against the structural rules of `question_type`.
///
/// Case-insensitive on the raw text. Never fails: malformed input only ever
/// yields error strings in the report.
pub fn validate(content: &str, question_type: QuestionType) -> FormatReport {
    let mut report = FormatReport::default();

    let text = content.trim();
    if text.is_empty() {
        report.errors.push("empty content".to_string());
        return report;
    }

    let lowered = text.to_lowercase();
    let has_answer = lowered.contains("answer");

    match question_type {
        QuestionType::MultipleChoice => {
            for option in ["A.", "B.", "C.", "D."] {
                if !text.contains(option) {
                    report.errors.push(format!("missing option {option}"));
                }
            }
            if !CHOICE_ANSWER_LINE.is_match(text) {
                report
                    .errors
                    .push("missing or wrong 'Answer: A/B/C/D' line".to_string());
            }
        }
        QuestionType::TrueFalse => {
            if !has_answer {
                report
                    .warnings
                    .push("an 'Answer:' section keeps true/false export stable".to_string());
            }
        }
        QuestionType::Matching => {
            if !lowered.contains("column a") || !lowered.contains("column b") {
                report
                    .errors
                    .push("missing 'Column A' or 'Column B'".to_string());
            }
            if !has_answer {
                report
                    .errors
                    .push("missing 'Answer:' (pairs like 1-b; 2-a)".to_string());
            }
        }
        QuestionType::FillInBlank => {
            if !BLANK_MARKERS.iter().any(|m| text.contains(m)) {
                report
                    .errors
                    .push("missing a blank placeholder (...... or ___)".to_string());
            }
            if !has_answer {
                report
                    .errors
                    .push("missing 'Answer:' for the blank".to_string());
            }
        }
        QuestionType::Essay => {
            if !has_answer && !lowered.contains("grading guide") {
                report.warnings.push(
                    "an 'Answer:' or 'Grading guide' section keeps essay export stable".to_string(),
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_is_a_single_error_for_any_type() {
        for kind in [
            QuestionType::MultipleChoice,
            QuestionType::TrueFalse,
            QuestionType::Matching,
            QuestionType::FillInBlank,
            QuestionType::Essay,
        ] {
            let report = validate("", kind);
            assert!(!report.is_valid());
            assert_eq!(report.errors, vec!["empty content".to_string()]);
        }
        let report = validate("   \n\t ", QuestionType::MultipleChoice);
        assert_eq!(report.errors, vec!["empty content".to_string()]);
    }

    #[test]
    fn test_multiple_choice_valid() {
        let content = "Which planet is closest to the sun?\nA. Venus\nB. Mercury\nC. Mars\nD. Earth\nanswer: b";
        let report = validate(content, QuestionType::MultipleChoice);
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_multiple_choice_missing_markers_in_order() {
        let content = "Pick one.\nA. yes\nC. maybe\nAnswer: A";
        let report = validate(content, QuestionType::MultipleChoice);
        assert_eq!(
            report.errors,
            vec!["missing option B.".to_string(), "missing option D.".to_string()]
        );
    }

    #[test]
    fn test_multiple_choice_all_markers_missing_lists_four_in_order() {
        let report = validate("Pick one.", QuestionType::MultipleChoice);
        assert_eq!(
            report.errors,
            vec![
                "missing option A.".to_string(),
                "missing option B.".to_string(),
                "missing option C.".to_string(),
                "missing option D.".to_string(),
                "missing or wrong 'Answer: A/B/C/D' line".to_string(),
            ]
        );
    }

    #[test]
    fn test_multiple_choice_answer_line_must_be_single_letter() {
        let content = "Q?\nA. 1\nB. 2\nC. 3\nD. 4\nAnswer: B and C";
        let report = validate(content, QuestionType::MultipleChoice);
        assert_eq!(
            report.errors,
            vec!["missing or wrong 'Answer: A/B/C/D' line".to_string()]
        );
    }

    #[test]
    fn test_true_false_missing_answer_is_only_a_warning() {
        let content = "a) The sun is a star.\nb) The moon is a planet.";
        let report = validate(content, QuestionType::TrueFalse);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        let with_answer = validate("a) ...\nAnswer: a)T b)F", QuestionType::TrueFalse);
        assert!(with_answer.is_valid());
        assert!(with_answer.warnings.is_empty());
    }

    #[test]
    fn test_matching_requires_both_columns_and_answer() {
        let report = validate("Match the items.\nColumn A: 1, 2", QuestionType::Matching);
        assert_eq!(
            report.errors,
            vec![
                "missing 'Column A' or 'Column B'".to_string(),
                "missing 'Answer:' (pairs like 1-b; 2-a)".to_string(),
            ]
        );

        let ok = validate(
            "Column A: 1. dog 2. cat\nColumn B: a. meow b. bark\nAnswer: 1-b; 2-a",
            QuestionType::Matching,
        );
        assert!(ok.is_valid());
    }

    #[test]
    fn test_fill_in_blank_accepts_each_placeholder() {
        for marker in ["......", "…", "___"] {
            let content = format!("Water boils at {marker} degrees.\nAnswer: 100");
            assert!(validate(&content, QuestionType::FillInBlank).is_valid());
        }

        let report = validate("Water boils at N degrees.", QuestionType::FillInBlank);
        assert_eq!(
            report.errors,
            vec![
                "missing a blank placeholder (...... or ___)".to_string(),
                "missing 'Answer:' for the blank".to_string(),
            ]
        );
    }

    #[test]
    fn test_essay_grading_guide_counts() {
        let report = validate(
            "Explain why plants need light.\nGrading guide: 2 points for photosynthesis",
            QuestionType::Essay,
        );
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());

        let bare = validate("Explain why plants need light.", QuestionType::Essay);
        assert!(bare.is_valid());
        assert_eq!(bare.warnings.len(), 1);
    }
}
