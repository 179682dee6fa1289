use serde::{Deserialize, Serialize};

/// Question kind.
///
/// Closed set; every kind carries its own structural format rule
/// (see `services::validator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Four options A/B/C/D, single-letter answer line
    MultipleChoice,
    /// Four true/false statements
    TrueFalse,
    /// Two columns to pair up
    Matching,
    /// Sentence with a blank placeholder
    FillInBlank,
    /// Short free-form answer
    Essay,
}

/// Exact lookup for the canonical labels (lowercased).
static TYPE_BY_LABEL: phf::Map<&'static str, QuestionType> = phf::phf_map! {
    "multiple choice (4 options)" => QuestionType::MultipleChoice,
    "true/false" => QuestionType::TrueFalse,
    "matching (column pairing)" => QuestionType::Matching,
    "fill in the blank" => QuestionType::FillInBlank,
    "short essay" => QuestionType::Essay,
};

/// Classification keywords for free-form labels, scanned in order, first
/// match wins. Labels that match nothing fall back to `Essay`.
const TYPE_KEYWORDS: &[(&str, QuestionType)] = &[
    ("multiple choice", QuestionType::MultipleChoice),
    ("4 options", QuestionType::MultipleChoice),
    ("true/false", QuestionType::TrueFalse),
    ("true false", QuestionType::TrueFalse),
    ("matching", QuestionType::Matching),
    ("column pairing", QuestionType::Matching),
    ("fill in the blank", QuestionType::FillInBlank),
    ("complete the sentence", QuestionType::FillInBlank),
];

impl QuestionType {
    /// Display label, also what the matrix "Type" column prints.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple choice (4 options)",
            QuestionType::TrueFalse => "True/False",
            QuestionType::Matching => "Matching (column pairing)",
            QuestionType::FillInBlank => "Fill in the blank",
            QuestionType::Essay => "Short essay",
        }
    }

    /// Classify a free-form type label.
    ///
    /// Case-insensitive: exact canonical labels first, then a keyword scan
    /// in declaration order; the essay kind is the fallback for anything
    /// unrecognized.
    pub fn classify(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        if let Some(kind) = TYPE_BY_LABEL.get(lowered.as_str()) {
            return *kind;
        }
        for (keyword, kind) in TYPE_KEYWORDS {
            if lowered.contains(keyword) {
                return *kind;
            }
        }
        QuestionType::Essay
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Difficulty tier mandated by the curriculum framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// Recall
    Level1,
    /// Comprehension
    Level2,
    /// Application
    Level3,
}

impl DifficultyLevel {
    pub fn label(self) -> &'static str {
        match self {
            DifficultyLevel::Level1 => "Level 1: Recall",
            DifficultyLevel::Level2 => "Level 2: Comprehension",
            DifficultyLevel::Level3 => "Level 3: Application",
        }
    }

    /// Lenient parse from a label string ("Level 2", "comprehension", "2", ...).
    pub fn parse(label: &str) -> Option<Self> {
        let lowered = label.to_lowercase();
        if lowered.contains('1') || lowered.contains("recall") {
            Some(DifficultyLevel::Level1)
        } else if lowered.contains('2') || lowered.contains("comprehension") {
            Some(DifficultyLevel::Level2)
        } else if lowered.contains('3') || lowered.contains("application") {
            Some(DifficultyLevel::Level3)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Point value of a question.
///
/// Stored as the raw scalar the teacher typed (table edits can put anything
/// in this field), parsed on demand. Absent or non-numeric values count as 0
/// when summing; they are only flagged by list validation, never fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Points(String);

impl Points {
    pub fn new(raw: impl Into<String>) -> Self {
        Points(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the field holds nothing at all.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parsed numeric value; `None` for blank or unparsable input.
    pub fn value(&self) -> Option<f64> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok()
    }

    /// Parsed value with blank/unparsable coerced to 0.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl From<f64> for Points {
    fn from(value: f64) -> Self {
        // print 1.0 as "1", 0.5 as "0.5"
        if value.fract() == 0.0 {
            Points(format!("{}", value as i64))
        } else {
            Points(format!("{}", value))
        }
    }
}

impl From<&str> for Points {
    fn from(raw: &str) -> Self {
        Points(raw.to_string())
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Points {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// Accept either a number or a string so plan files can write `points = 0.5`
// while edited snapshots carry whatever text the cell ended up with.
impl<'de> Deserialize<'de> for Points {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;
        use std::fmt;

        struct PointsVisitor;

        impl<'de> Visitor<'de> for PointsVisitor {
            type Value = Points;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or string point value")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Points(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Points::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Points(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Points(value.to_string()))
            }
        }

        deserializer.deserialize_any(PointsVisitor)
    }
}

/// One exam question, as held by the exam session.
///
/// Created as a transient draft when AI output arrives; becomes part of the
/// exam only when the teacher explicitly appends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub semester: String,
    pub grade: String,
    pub subject: String,
    pub topic: String,
    pub lesson: String,
    /// Learning-objective text (teacher-authored or AI-suggested)
    pub objective: String,
    pub question_type: QuestionType,
    pub level: DifficultyLevel,
    pub points: Points,
    /// Question stem plus embedded answer line(s)
    pub content: String,
    /// Generating model, provenance only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Advisory format check result at generation time
    pub format_ok: bool,
    #[serde(default)]
    pub format_errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(
            QuestionType::classify("Multiple choice (4 options)"),
            QuestionType::MultipleChoice
        );
        assert_eq!(QuestionType::classify("TRUE/FALSE"), QuestionType::TrueFalse);
        assert_eq!(
            QuestionType::classify("Matching (column pairing)"),
            QuestionType::Matching
        );
        assert_eq!(
            QuestionType::classify("Fill in the blank (complete the sentence)"),
            QuestionType::FillInBlank
        );
    }

    #[test]
    fn test_classify_falls_back_to_essay() {
        assert_eq!(QuestionType::classify("Short essay"), QuestionType::Essay);
        assert_eq!(QuestionType::classify(""), QuestionType::Essay);
        assert_eq!(QuestionType::classify("open response"), QuestionType::Essay);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(DifficultyLevel::parse("Level 1: Recall"), Some(DifficultyLevel::Level1));
        assert_eq!(DifficultyLevel::parse("comprehension"), Some(DifficultyLevel::Level2));
        assert_eq!(DifficultyLevel::parse("3"), Some(DifficultyLevel::Level3));
        assert_eq!(DifficultyLevel::parse("hard"), None);
    }

    #[test]
    fn test_points_coercion() {
        assert_eq!(Points::new("1.5").value(), Some(1.5));
        assert_eq!(Points::new("  2 ").value(), Some(2.0));
        assert_eq!(Points::new("x").value(), None);
        assert_eq!(Points::new("").value(), None);
        assert_eq!(Points::new("x").or_zero(), 0.0);
        assert_eq!(Points::from(1.0).as_str(), "1");
        assert_eq!(Points::from(0.5).as_str(), "0.5");
    }

    #[test]
    fn test_points_deserialize_number_or_string() {
        #[derive(Deserialize)]
        struct Row {
            points: Points,
        }

        let from_number: Row = toml::from_str("points = 0.5").unwrap();
        assert_eq!(from_number.points.value(), Some(0.5));

        let from_int: Row = toml::from_str("points = 2").unwrap();
        assert_eq!(from_int.points.value(), Some(2.0));

        let from_string: Row = toml::from_str("points = \"1.5\"").unwrap();
        assert_eq!(from_string.points.value(), Some(1.5));
    }
}
