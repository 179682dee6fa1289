pub mod docx_loader;
pub mod toml_loader;

pub use docx_loader::load_curriculum_from_docx;
pub use toml_loader::{load_curriculum_folder, load_exam_plan};
