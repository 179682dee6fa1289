//! # dekiemtra
//!
//! A teacher-facing tool that generates Vietnamese primary-school exam
//! questions through a generative-AI API, checks their textual format
//! against per-kind templates and exports Word documents (exam paper,
//! answer key, specification matrix).
//!
//! ## Architecture
//!
//! The system is layered strictly, leaf to root:
//!
//! ### 1. Data model (`models`)
//! - `QuestionRecord`, `QuestionType`, `DifficultyLevel`, `Points`
//! - curriculum rows plus the nested dropdown index
//! - exam plan files and the DOCX/TOML loaders
//!
//! ### 2. Business capabilities (`services`)
//! - `validator` - advisory format checks, one rule set per question kind
//! - `gateway` - one chat round-trip with model rotation and retry
//! - `prompts` - pure prompt builders
//!
//! ### 3. Session state (`session`)
//! - `ExamSession` - the exam being assembled, plus the objective cache
//!
//! ### 4. Composition (`compose`)
//! - pure block models for the exam and the matrix
//! - the docx rendering boundary
//!
//! ### 5. Flow and orchestration (`workflow`, `app`)
//! - `QuestionFlow` - request → generated, format-checked draft
//! - `App` - plan in, three .docx files out
//!
//! ## Module structure

pub mod app;
pub mod compose;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod session;
pub mod workflow;

// re-export the common types
pub use app::App;
pub use compose::{compose_exam, compose_matrix, ExamBlock, ExamHeader, MatrixDocument};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DifficultyLevel, ExamPlan, Points, QuestionRecord, QuestionType};
pub use services::{validate, AiGateway, FormatReport, GenOutcome, GenParams};
pub use session::{ExamSession, ListReport, RecordSnapshot};
pub use workflow::{QuestionCtx, QuestionFlow};
