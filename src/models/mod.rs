pub mod curriculum;
pub mod loaders;
pub mod plan;
pub mod question;

pub use curriculum::{CurriculumRow, CurriculumTable};
pub use loaders::{load_curriculum_folder, load_curriculum_from_docx, load_exam_plan};
pub use plan::{ExamPlan, QuestionRequest};
pub use question::{DifficultyLevel, Points, QuestionRecord, QuestionType};
