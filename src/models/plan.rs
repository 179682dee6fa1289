use serde::{Deserialize, Serialize};

use crate::models::question::Points;

/// One question request in an exam plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub lesson: String,
    /// Learning-objective text; left blank to have the gateway suggest one
    #[serde(default)]
    pub objective: String,
    /// Free-form type label, classified by keyword
    #[serde(rename = "type", default)]
    pub type_label: String,
    /// Free-form level label ("Level 2", "recall", ...)
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub points: Points,
}

/// An exam plan file: header fields plus the ordered question requests.
///
/// This is the batch-mode stand-in for the teacher filling the form once per
/// question; requests are generated and appended in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPlan {
    pub subject: String,
    pub grade: String,
    #[serde(default = "default_semester")]
    pub semester: String,
    #[serde(default = "default_exam_title")]
    pub exam_title: String,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
}

fn default_semester() -> String {
    "Semester I".to_string()
}

fn default_exam_title() -> String {
    "END OF TERM EXAM".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parses_with_defaults() {
        let plan: ExamPlan = toml::from_str(
            r#"
            subject = "Science"
            grade = "Grade 5"

            [[questions]]
            topic = "Matter and its changes"
            lesson = "Mixtures and solutions"
            type = "Multiple choice (4 options)"
            level = "Level 1"
            points = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(plan.semester, "Semester I");
        assert_eq!(plan.exam_title, "END OF TERM EXAM");
        assert_eq!(plan.questions.len(), 1);
        assert_eq!(plan.questions[0].points.value(), Some(1.0));
        assert!(plan.questions[0].objective.is_empty());
    }
}
