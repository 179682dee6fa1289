use thiserror::Error;

/// Application error type.
///
/// One variant per concern, mirroring the module layout. Validation problems
/// are deliberately NOT here: format and list checks return their findings as
/// data (`FormatReport` / `ListReport`), never as errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Exam session errors
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    /// Document composition errors
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
    /// Curriculum data errors
    #[error("curriculum error: {0}")]
    Curriculum(#[from] CurriculumError),
}

/// Exam session errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Removal index past the end of the question list
    #[error("question index {index} out of range (exam has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Document composition errors
///
/// Composition itself cannot fail on record content (malformed fields are
/// coerced); only the byte-serialization boundary can.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Packing the document into the .docx container failed
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

/// Curriculum data errors
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// The DOCX bytes could not be parsed at all
    #[error("failed to read curriculum DOCX: {0}")]
    Docx(String),
    /// The document parsed but contained no usable table rows
    #[error("curriculum DOCX contains no table")]
    NoTable,
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
