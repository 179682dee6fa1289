//! Block model → .docx rendering
//!
//! The only place docx types appear. Rendering cannot fail on content;
//! only packing the final bytes can return an error.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Table, TableCell, TableRow,
    WidthType,
};

use crate::compose::blocks::{ExamBlock, MatrixDocument};
use crate::error::ComposeError;

/// Body font, set once on the document.
const BODY_FONT: &str = "Times New Roman";
/// 13pt, in half-points.
const BODY_SIZE: usize = 26;
/// Heading size, in half-points.
const HEADING_SIZE: usize = 32;

/// Header table column widths in twips (roughly 7 cm and 9 cm).
const HEADER_LEFT_WIDTH: usize = 3969;
const HEADER_RIGHT_WIDTH: usize = 5103;

fn base_docx() -> Docx {
    Docx::new()
        .default_fonts(RunFonts::new().ascii(BODY_FONT).east_asia(BODY_FONT))
        .default_size(BODY_SIZE)
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
        .style("Heading1")
}

fn centered_bold(text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text).bold())
        .align(AlignmentType::Center)
}

/// Render composed exam blocks into a document.
pub fn render_exam(blocks: &[ExamBlock]) -> Docx {
    let mut docx = base_docx();

    for block in blocks {
        docx = match block {
            ExamBlock::HeaderTable {
                school,
                title,
                subject_line,
            } => {
                let left = TableCell::new()
                    .add_paragraph(centered_bold(school))
                    .width(HEADER_LEFT_WIDTH, WidthType::Dxa);
                let right = TableCell::new()
                    .add_paragraph(centered_bold(title))
                    .add_paragraph(centered_bold(subject_line))
                    .width(HEADER_RIGHT_WIDTH, WidthType::Dxa);
                let table = Table::new(vec![TableRow::new(vec![left, right])]);
                docx.add_table(table).add_paragraph(Paragraph::new())
            }
            ExamBlock::Heading(text) => docx.add_paragraph(heading(text)),
            ExamBlock::QuestionNumber { number, points } => docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("Question {number} ({points} points): "))
                        .bold(),
                ),
            ),
            ExamBlock::Paragraph(text) => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
            }
            ExamBlock::Spacer => docx.add_paragraph(Paragraph::new()),
            ExamBlock::PageBreak => docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            ),
            ExamBlock::AnswerLine { number, answer } => docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("Question {number}: {answer}"))),
            ),
        };
    }

    docx
}

/// Render the specification matrix into a document.
pub fn render_matrix(matrix: &MatrixDocument) -> Docx {
    let mut docx = base_docx()
        .add_paragraph(centered_bold(&matrix.title))
        .add_paragraph(Paragraph::new());

    let mut rows = Vec::with_capacity(matrix.rows.len() + 1);
    rows.push(text_row(&matrix.header));
    for row in &matrix.rows {
        rows.push(text_row(row));
    }
    docx = docx.add_table(Table::new(rows));

    docx
}

fn text_row(cells: &[String; 7]) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|text| {
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
            })
            .collect(),
    )
}

/// Pack a document into .docx bytes.
pub fn to_bytes(docx: Docx) -> Result<Vec<u8>, ComposeError> {
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ComposeError::Serialize(e.to_string()))?;
    Ok(buf.into_inner())
}
