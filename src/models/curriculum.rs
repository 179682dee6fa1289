use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One flattened curriculum row.
///
/// Read-only input: the core populates selection data from these rows and
/// never writes them back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumRow {
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub textbook_set: String,
}

/// Lessons per topic, per semester, per subject, per grade.
pub type NestedIndex = BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>>;

/// The loaded curriculum table.
#[derive(Debug, Clone, Default)]
pub struct CurriculumTable {
    pub rows: Vec<CurriculumRow>,
}

impl CurriculumTable {
    pub fn new(rows: Vec<CurriculumRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Nested grade → subject → semester → topic → lessons index for
    /// dropdown-style selection. Blank keys land under "Other"; lessons keep
    /// first-seen order without duplicates.
    pub fn nested(&self) -> NestedIndex {
        let mut nested: NestedIndex = BTreeMap::new();
        for row in &self.rows {
            let grade = non_blank(&row.grade);
            let subject = non_blank(&row.subject);
            let semester = non_blank(&row.semester);
            let topic = non_blank(&row.topic);

            let lessons = nested
                .entry(grade)
                .or_default()
                .entry(subject)
                .or_default()
                .entry(semester)
                .or_default()
                .entry(topic)
                .or_default();

            let lesson = row.lesson.trim();
            if !lesson.is_empty() && !lessons.iter().any(|l| l == lesson) {
                lessons.push(lesson.to_string());
            }
        }
        nested
    }

    /// True when the given topic appears anywhere in the table.
    pub fn has_topic(&self, topic: &str) -> bool {
        let wanted = topic.trim().to_lowercase();
        self.rows
            .iter()
            .any(|r| r.topic.trim().to_lowercase() == wanted)
    }

    /// Built-in sample rows for first runs without any curriculum data.
    pub fn sample() -> Self {
        let row = |semester: &str, grade: &str, subject: &str, topic: &str, lesson: &str| CurriculumRow {
            semester: semester.to_string(),
            grade: grade.to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            lesson: lesson.to_string(),
            period: "1".to_string(),
            ..Default::default()
        };
        Self::new(vec![
            row("Semester I", "Grade 5", "Science", "Matter and its changes", "Mixtures and solutions"),
            row("Semester I", "Grade 5", "Science", "Matter and its changes", "Separating substances in a mixture"),
            row("Semester I", "Grade 4", "History and Geography", "Our locality", "Local natural features"),
        ])
    }
}

fn non_blank(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Other".to_string()
    } else {
        trimmed.to_string()
    }
}
