//! Curriculum DOCX ingestion
//!
//! Schools keep the curriculum distribution as a Word table (Semester /
//! Grade / Subject / Topic / Lesson ...). This loader flattens every table in
//! the document to text rows, finds the header row by keyword, maps columns
//! to the canonical fields and tolerates short or repeated rows.

use crate::error::CurriculumError;
use crate::models::curriculum::{CurriculumRow, CurriculumTable};

/// How far into the sheet the header row may sit.
const HEADER_SCAN_ROWS: usize = 30;

/// Canonical column slots, in `CurriculumRow` field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Semester,
    Grade,
    Subject,
    Topic,
    Lesson,
    Period,
    Objective,
    TextbookSet,
}

/// Load a curriculum table from DOCX bytes.
///
/// Returns the table plus a warning string (empty when every recommended
/// column was present). Missing optional columns are not an error, the
/// dropdown data still works without them.
pub fn load_curriculum_from_docx(bytes: &[u8]) -> Result<(CurriculumTable, String), CurriculumError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| CurriculumError::Docx(e.to_string()))?;

    let raw_rows = collect_table_rows(&docx);
    if raw_rows.is_empty() {
        return Err(CurriculumError::NoTable);
    }

    let header_idx = find_header_row(&raw_rows).unwrap_or(0);
    let header = &raw_rows[header_idx];
    let columns: Vec<Option<Column>> = header.iter().map(|cell| map_header(cell)).collect();

    let mut rows = Vec::new();
    for raw in raw_rows.iter().skip(header_idx + 1) {
        if raw.len() < 3 {
            continue;
        }
        if is_header_row(raw) {
            // repeated header on a later page
            continue;
        }
        rows.push(build_row(raw, &columns));
    }

    let warning = missing_column_warning(&columns);
    Ok((CurriculumTable::new(rows), warning))
}

/// Every table row in the document, flattened to trimmed cell text.
fn collect_table_rows(docx: &docx_rs::Docx) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Table(table) = child {
            for tc in &table.rows {
                if let docx_rs::TableChild::TableRow(row) = tc {
                    let mut cells = Vec::new();
                    for rc in &row.cells {
                        if let docx_rs::TableRowChild::TableCell(cell) = rc {
                            cells.push(cell_text(cell));
                        }
                    }
                    rows.push(cells);
                }
            }
        }
    }
    rows
}

fn cell_text(cell: &docx_rs::TableCell) -> String {
    let mut text = String::new();
    for cc in &cell.children {
        if let docx_rs::TableCellContent::Paragraph(para) = cc {
            let line = paragraph_text(para);
            if !line.trim().is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line.trim());
            }
        }
    }
    text
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut line = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    docx_rs::RunChild::Text(t) => line.push_str(&t.text),
                    docx_rs::RunChild::Tab(_) => line.push('\t'),
                    docx_rs::RunChild::Break(_) => line.push('\n'),
                    _ => {}
                }
            }
        }
    }
    line
}

fn normalize_header(cell: &str) -> String {
    let lowered = cell.trim().to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_header_row(row: &[String]) -> bool {
    let joined = row
        .iter()
        .map(|c| normalize_header(c))
        .collect::<Vec<_>>()
        .join(" ");
    joined.contains("grade") && joined.contains("subject")
}

fn find_header_row(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter().take(HEADER_SCAN_ROWS).position(|r| is_header_row(r))
}

fn map_header(cell: &str) -> Option<Column> {
    let h = normalize_header(cell);
    if h.contains("semester") || h.contains("term") {
        Some(Column::Semester)
    } else if h.contains("grade") || h.contains("class") {
        Some(Column::Grade)
    } else if h.contains("subject") {
        Some(Column::Subject)
    } else if h.contains("topic") || h.contains("theme") {
        Some(Column::Topic)
    } else if h.contains("lesson") {
        Some(Column::Lesson)
    } else if h.contains("period") {
        Some(Column::Period)
    } else if h.contains("objective") || h.contains("outcome") {
        Some(Column::Objective)
    } else if h.contains("textbook") || h.contains("book set") {
        Some(Column::TextbookSet)
    } else {
        None
    }
}

fn build_row(raw: &[String], columns: &[Option<Column>]) -> CurriculumRow {
    let mut row = CurriculumRow::default();
    for (i, column) in columns.iter().enumerate() {
        let value = raw.get(i).map(|c| c.trim()).unwrap_or("");
        let Some(column) = column else { continue };
        let slot = match column {
            Column::Semester => &mut row.semester,
            Column::Grade => &mut row.grade,
            Column::Subject => &mut row.subject,
            Column::Topic => &mut row.topic,
            Column::Lesson => &mut row.lesson,
            Column::Period => &mut row.period,
            Column::Objective => &mut row.objective,
            Column::TextbookSet => &mut row.textbook_set,
        };
        *slot = value.to_string();
    }
    row
}

fn missing_column_warning(columns: &[Option<Column>]) -> String {
    let mut missing = Vec::new();
    for (column, name) in [
        (Column::Period, "period"),
        (Column::Objective, "objective"),
        (Column::TextbookSet, "textbook set"),
    ] {
        if !columns.contains(&Some(column)) {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        String::new()
    } else {
        format!(
            "curriculum table is missing columns: {}; topic/lesson dropdown data still works",
            missing.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_header_keywords() {
        assert_eq!(map_header("Grade"), Some(Column::Grade));
        assert_eq!(map_header("  SUBJECT "), Some(Column::Subject));
        assert_eq!(map_header("Topic / Theme"), Some(Column::Topic));
        assert_eq!(map_header("Lesson name"), Some(Column::Lesson));
        assert_eq!(map_header("Expected outcome"), Some(Column::Objective));
        assert_eq!(map_header("Notes"), None);
    }

    #[test]
    fn test_header_row_detection() {
        let rows = vec![
            vec!["Primary curriculum 2018".to_string()],
            vec![
                "Semester".to_string(),
                "Grade".to_string(),
                "Subject".to_string(),
                "Topic".to_string(),
                "Lesson".to_string(),
            ],
            vec![
                "Semester I".to_string(),
                "Grade 5".to_string(),
                "Science".to_string(),
                "Matter".to_string(),
                "Mixtures".to_string(),
            ],
        ];
        assert_eq!(find_header_row(&rows), Some(1));
        assert!(is_header_row(&rows[1]));
        assert!(!is_header_row(&rows[2]));
    }

    #[test]
    fn test_build_row_pads_and_maps() {
        let columns = vec![
            Some(Column::Semester),
            Some(Column::Grade),
            Some(Column::Subject),
            Some(Column::Topic),
            Some(Column::Lesson),
            Some(Column::Objective),
        ];
        let raw = vec![
            "Semester I".to_string(),
            "Grade 5".to_string(),
            "Science".to_string(),
            "Matter".to_string(),
        ];
        let row = build_row(&raw, &columns);
        assert_eq!(row.grade, "Grade 5");
        assert_eq!(row.topic, "Matter");
        assert!(row.lesson.is_empty());
        assert!(row.objective.is_empty());
    }

    #[test]
    fn test_missing_column_warning_lists_names() {
        let columns = vec![Some(Column::Grade), Some(Column::Subject)];
        let warning = missing_column_warning(&columns);
        assert!(warning.contains("period"));
        assert!(warning.contains("objective"));
        assert!(warning.contains("textbook set"));
        assert!(missing_column_warning(&[
            Some(Column::Period),
            Some(Column::Objective),
            Some(Column::TextbookSet)
        ])
        .is_empty());
    }
}
