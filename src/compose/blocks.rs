//! Exam and matrix composition
//!
//! Pure transformation of a question list into document block models. No
//! docx types appear here; rendering the blocks into an actual .docx file
//! is the job of `compose::render`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::question::QuestionRecord;

lazy_static! {
    /// An embedded answer line: "Answer: <text>".
    static ref ANSWER_LINE: Regex =
        Regex::new(r"(?im)^\s*answer\s*:\s*(.+)$").expect("valid regex");
    /// A stem that already starts with its own "Question <n>" numbering.
    static ref PRE_NUMBERED: Regex =
        Regex::new(r"(?is)^\s*question\s+\d+").expect("valid regex");
}

/// Header fields printed at the top of the exam paper.
#[derive(Debug, Clone, Default)]
pub struct ExamHeader {
    pub school_name: String,
    pub subject: String,
    pub grade: String,
    pub exam_title: String,
}

/// One block of the composed exam document, in emit order.
#[derive(Debug, Clone, PartialEq)]
pub enum ExamBlock {
    /// Two-cell top table: school on the left, title + subject line right
    HeaderTable {
        school: String,
        title: String,
        subject_line: String,
    },
    /// A level-1 heading ("EXAM", "ANSWER KEY")
    Heading(String),
    /// Bold numbering paragraph "Question {number} ({points} points): "
    QuestionNumber { number: usize, points: String },
    /// One non-blank stem line
    Paragraph(String),
    /// Blank paragraph after each question
    Spacer,
    PageBreak,
    /// One answer-key line "Question {number}: {answer}"
    AnswerLine { number: usize, answer: String },
}

/// Split question content into (stem, answer).
///
/// The first "Answer:" line supplies the answer text; every such line is
/// removed from the stem. Content without an answer line comes back
/// unchanged with an empty answer; best effort, never an error.
pub fn split_answer(content: &str) -> (String, String) {
    let content = content.trim();
    let answer = match ANSWER_LINE.captures(content) {
        Some(caps) => caps[1].trim().to_string(),
        None => return (content.to_string(), String::new()),
    };
    let stem = ANSWER_LINE.replace_all(content, "").trim().to_string();
    (stem, answer)
}

/// Whether the stem already numbers itself ("Question 3 ...").
pub fn is_pre_numbered(stem: &str) -> bool {
    PRE_NUMBERED.is_match(stem.trim())
}

/// Compose the exam paper (and optionally the answer key) as blocks.
///
/// Questions are numbered 1..N in list order. A stem that numbers itself
/// does not get a second numbering paragraph; the answer key always numbers
/// its lines regardless.
pub fn compose_exam(
    header: &ExamHeader,
    records: &[QuestionRecord],
    include_answers: bool,
) -> Vec<ExamBlock> {
    let mut blocks = Vec::new();

    let title = if header.exam_title.trim().is_empty() {
        "EXAM PAPER".to_string()
    } else {
        header.exam_title.to_uppercase()
    };
    blocks.push(ExamBlock::HeaderTable {
        school: header.school_name.to_uppercase(),
        title,
        subject_line: format!(
            "SUBJECT: {} — GRADE: {}",
            header.subject.to_uppercase(),
            header.grade.to_uppercase()
        ),
    });

    blocks.push(ExamBlock::Heading("EXAM".to_string()));

    let mut answers: Vec<(usize, String)> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        let (stem, answer) = split_answer(&record.content);

        if !is_pre_numbered(&stem) {
            blocks.push(ExamBlock::QuestionNumber {
                number,
                points: record.points.as_str().to_string(),
            });
        }

        for line in stem.lines() {
            let line = line.trim();
            if !line.is_empty() {
                blocks.push(ExamBlock::Paragraph(line.to_string()));
            }
        }
        blocks.push(ExamBlock::Spacer);

        if include_answers && !answer.is_empty() {
            answers.push((number, answer));
        }
    }

    if include_answers {
        blocks.push(ExamBlock::PageBreak);
        blocks.push(ExamBlock::Heading("ANSWER KEY".to_string()));
        for (number, answer) in answers {
            blocks.push(ExamBlock::AnswerLine { number, answer });
        }
    }

    blocks
}

/// Fixed 7-column specification matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDocument {
    pub title: String,
    pub header: [String; 7],
    pub rows: Vec<[String; 7]>,
}

/// Compose the specification matrix for the given record list.
///
/// Every cell is coerced to text; malformed fields come through as-is
/// rather than failing.
pub fn compose_matrix(subject: &str, grade: &str, records: &[QuestionRecord]) -> MatrixDocument {
    let header = [
        "No.".to_string(),
        "Topic".to_string(),
        "Lesson".to_string(),
        "Objective".to_string(),
        "Type".to_string(),
        "Level".to_string(),
        "Points".to_string(),
    ];

    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            [
                (idx + 1).to_string(),
                record.topic.clone(),
                record.lesson.clone(),
                record.objective.clone(),
                record.question_type.label().to_string(),
                record.level.label().to_string(),
                record.points.as_str().to_string(),
            ]
        })
        .collect();

    MatrixDocument {
        title: format!(
            "SPECIFICATION MATRIX — {} {}",
            subject.to_uppercase(),
            grade.to_uppercase()
        ),
        header,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{DifficultyLevel, Points, QuestionType};

    fn record(content: &str, points: &str, question_type: QuestionType) -> QuestionRecord {
        QuestionRecord {
            semester: "Semester I".to_string(),
            grade: "Grade 5".to_string(),
            subject: "Science".to_string(),
            topic: "Matter".to_string(),
            lesson: "Mixtures".to_string(),
            objective: "- tell mixtures apart".to_string(),
            question_type,
            level: DifficultyLevel::Level1,
            points: Points::new(points),
            content: content.to_string(),
            model: None,
            format_ok: true,
            format_errors: Vec::new(),
        }
    }

    fn header() -> ExamHeader {
        ExamHeader {
            school_name: "Binh Minh Primary School".to_string(),
            subject: "Science".to_string(),
            grade: "Grade 5".to_string(),
            exam_title: "End of term exam".to_string(),
        }
    }

    #[test]
    fn test_split_answer_extracts_and_strips() {
        let (stem, answer) = split_answer("What is 2+2?\nAnswer: 4");
        assert_eq!(stem, "What is 2+2?");
        assert_eq!(answer, "4");
    }

    #[test]
    fn test_split_answer_without_answer_line() {
        let content = "Describe the water cycle.\nUse at least three steps.";
        let (stem, answer) = split_answer(content);
        assert_eq!(stem, content);
        assert_eq!(answer, "");
    }

    #[test]
    fn test_split_answer_is_case_insensitive_and_takes_first() {
        let (stem, answer) = split_answer("Q?\nANSWER: B\nanswer: C");
        assert_eq!(answer, "B");
        assert_eq!(stem, "Q?");
    }

    #[test]
    fn test_pre_numbered_detection() {
        assert!(is_pre_numbered("Question 1 (1 points): What?"));
        assert!(is_pre_numbered("  question 12\nmore"));
        assert!(!is_pre_numbered("What is question 1 about?"));
    }

    #[test]
    fn test_compose_exam_numbers_in_list_order() {
        let records = vec![
            record("First?\nAnswer: a", "1", QuestionType::Essay),
            record("Second?\nAnswer: b", "2", QuestionType::Essay),
            record("Third?\nAnswer: c", "0.5", QuestionType::Essay),
        ];
        let blocks = compose_exam(&header(), &records, false);

        let numbers: Vec<usize> = blocks
            .iter()
            .filter_map(|b| match b {
                ExamBlock::QuestionNumber { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // no answer key without include_answers
        assert!(!blocks.iter().any(|b| matches!(b, ExamBlock::PageBreak)));
        assert!(!blocks.iter().any(|b| matches!(b, ExamBlock::AnswerLine { .. })));
    }

    #[test]
    fn test_compose_exam_header_and_heading() {
        let blocks = compose_exam(&header(), &[], false);
        assert_eq!(
            blocks[0],
            ExamBlock::HeaderTable {
                school: "BINH MINH PRIMARY SCHOOL".to_string(),
                title: "END OF TERM EXAM".to_string(),
                subject_line: "SUBJECT: SCIENCE — GRADE: GRADE 5".to_string(),
            }
        );
        assert_eq!(blocks[1], ExamBlock::Heading("EXAM".to_string()));
    }

    #[test]
    fn test_compose_exam_skips_numbering_for_pre_numbered_stem() {
        let records = vec![record(
            "Question 1 (1 points): already numbered\nAnswer: ok",
            "1",
            QuestionType::Essay,
        )];
        let blocks = compose_exam(&header(), &records, true);

        assert!(!blocks
            .iter()
            .any(|b| matches!(b, ExamBlock::QuestionNumber { .. })));
        // the answer key still numbers its line
        assert!(blocks
            .iter()
            .any(|b| matches!(b, ExamBlock::AnswerLine { number: 1, .. })));
    }

    #[test]
    fn test_compose_exam_answer_key_end_to_end() {
        let records = vec![
            record(
                "Pick one.\nA. x\nB. y\nC. z\nD. w\nAnswer: C",
                "1",
                QuestionType::MultipleChoice,
            ),
            record(
                "Explain why.\nAnswer: explanation text",
                "2",
                QuestionType::Essay,
            ),
        ];
        let blocks = compose_exam(&header(), &records, true);

        let answers: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                ExamBlock::AnswerLine { number, answer } => {
                    Some(format!("Question {number}: {answer}"))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            answers,
            vec![
                "Question 1: C".to_string(),
                "Question 2: explanation text".to_string()
            ]
        );

        // answer-key section starts on a fresh page with its own heading
        let break_pos = blocks.iter().position(|b| matches!(b, ExamBlock::PageBreak)).unwrap();
        assert_eq!(
            blocks[break_pos + 1],
            ExamBlock::Heading("ANSWER KEY".to_string())
        );
    }

    #[test]
    fn test_compose_exam_skips_empty_answers_in_key() {
        let records = vec![
            record("No answer here.", "1", QuestionType::Essay),
            record("With.\nAnswer: yes", "1", QuestionType::Essay),
        ];
        let blocks = compose_exam(&header(), &records, true);
        let answers: Vec<usize> = blocks
            .iter()
            .filter_map(|b| match b {
                ExamBlock::AnswerLine { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(answers, vec![2]);
    }

    #[test]
    fn test_compose_matrix_rows_and_idempotence() {
        let records = vec![
            record("A?\nAnswer: 1", "1", QuestionType::MultipleChoice),
            record("B?\nAnswer: 2", "x", QuestionType::Essay),
        ];
        let matrix = compose_matrix("Science", "Grade 5", &records);

        assert_eq!(matrix.title, "SPECIFICATION MATRIX — SCIENCE GRADE 5");
        assert_eq!(matrix.header[0], "No.");
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.rows[0][0], "1");
        assert_eq!(matrix.rows[0][4], "Multiple choice (4 options)");
        // malformed points pass through as text
        assert_eq!(matrix.rows[1][6], "x");

        let again = compose_matrix("Science", "Grade 5", &records);
        assert_eq!(matrix, again);
    }
}
