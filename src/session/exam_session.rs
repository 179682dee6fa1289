//! Exam session state
//!
//! The in-progress exam of one editing session: an ordered question list
//! plus the cached objective suggestions. Explicitly created and cleared,
//! passed to whatever needs it. No globals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SessionError;
use crate::models::question::{DifficultyLevel, Points, QuestionRecord, QuestionType};

/// Result of a list-level check. Valid iff `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListReport {
    pub errors: Vec<String>,
}

impl ListReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One row of an externally edited snapshot of the question table.
///
/// Everything is text because that is what table cells hold after editing;
/// typed fields are re-derived when the snapshot is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSnapshot {
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
    pub objective: String,
    #[serde(default)]
    pub type_label: String,
    #[serde(default)]
    pub level_label: String,
    #[serde(default)]
    pub points: String,
    #[serde(default)]
    pub content: String,
}

impl RecordSnapshot {
    pub fn of(record: &QuestionRecord) -> Self {
        Self {
            semester: record.semester.clone(),
            grade: record.grade.clone(),
            subject: record.subject.clone(),
            topic: record.topic.clone(),
            lesson: record.lesson.clone(),
            objective: record.objective.clone(),
            type_label: record.question_type.label().to_string(),
            level_label: record.level.label().to_string(),
            points: record.points.as_str().to_string(),
            content: record.content.clone(),
        }
    }
}

/// The exam being assembled, insertion order = print order.
#[derive(Debug, Default)]
pub struct ExamSession {
    records: Vec<QuestionRecord>,
    suggestion_cache: HashMap<String, String>,
}

impl ExamSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything: questions and cached suggestions.
    pub fn clear(&mut self) {
        self.records.clear();
        self.suggestion_cache.clear();
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a question at the end. No dedup, no validation; the format
    /// check is advisory and already happened on the draft.
    pub fn append(&mut self, record: QuestionRecord) {
        self.records.push(record);
    }

    /// Remove the question at `index` (0-based). Later questions shift down,
    /// so repeated removals must re-compute their indices.
    pub fn remove_at(&mut self, index: usize) -> Result<QuestionRecord, SessionError> {
        if index >= self.records.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Sum of all point values; blank or unparsable points count as 0.
    pub fn total_points(&self) -> f64 {
        self.records.iter().map(|r| r.points.or_zero()).sum()
    }

    /// List-level check before export.
    ///
    /// An empty exam and a zero total are reported; unparsable point values
    /// are flagged per question (1-based) but never stop the aggregation.
    pub fn validate_list(&self) -> ListReport {
        let mut report = ListReport::default();

        if self.records.is_empty() {
            report.errors.push("no questions in exam".to_string());
            return report;
        }

        for (i, record) in self.records.iter().enumerate() {
            if !record.points.is_blank() && record.points.value().is_none() {
                report
                    .errors
                    .push(format!("question {}: invalid points value", i + 1));
            }
        }

        if self.total_points() <= 0.0 {
            report
                .errors
                .push("total score is zero; enter points for each question".to_string());
        }

        report
    }

    /// Current table snapshot, one row per question in order.
    pub fn snapshot(&self) -> Vec<RecordSnapshot> {
        self.records.iter().map(RecordSnapshot::of).collect()
    }

    /// Overwrite questions in place from an edited snapshot.
    ///
    /// Alignment is positional: row i overwrites question i. A snapshot
    /// shorter than the list only updates the overlapping prefix and leaves
    /// the tail untouched; rows past the end are dropped. Both mismatches
    /// are logged. Rows carry no stable identifier, so a reordered snapshot
    /// silently reassigns content; known hazard of this edit model.
    pub fn apply_snapshot(&mut self, rows: &[RecordSnapshot]) {
        if rows.len() != self.records.len() {
            warn!(
                "snapshot has {} rows but exam has {} questions; only the overlapping prefix is applied",
                rows.len(),
                self.records.len()
            );
        }

        for (record, row) in self.records.iter_mut().zip(rows.iter()) {
            record.semester = row.semester.clone();
            record.grade = row.grade.clone();
            record.subject = row.subject.clone();
            record.topic = row.topic.clone();
            record.lesson = row.lesson.clone();
            record.objective = row.objective.clone();
            record.question_type = QuestionType::classify(&row.type_label);
            if let Some(level) = DifficultyLevel::parse(&row.level_label) {
                record.level = level;
            }
            record.points = Points::new(row.points.clone());
            record.content = row.content.clone();
        }
    }

    // ========== objective suggestion cache ==========

    fn suggestion_key(grade: &str, subject: &str, topic: &str, lesson: &str) -> String {
        format!("{grade}|{subject}|{topic}|{lesson}")
    }

    pub fn cached_suggestion(
        &self,
        grade: &str,
        subject: &str,
        topic: &str,
        lesson: &str,
    ) -> Option<&str> {
        self.suggestion_cache
            .get(&Self::suggestion_key(grade, subject, topic, lesson))
            .map(|s| s.as_str())
    }

    pub fn store_suggestion(
        &mut self,
        grade: &str,
        subject: &str,
        topic: &str,
        lesson: &str,
        text: String,
    ) {
        self.suggestion_cache
            .insert(Self::suggestion_key(grade, subject, topic, lesson), text);
    }
}
