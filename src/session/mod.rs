pub mod exam_session;

pub use exam_session::{ExamSession, ListReport, RecordSnapshot};
