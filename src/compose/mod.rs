pub mod blocks;
pub mod render;

pub use blocks::{compose_exam, compose_matrix, split_answer, ExamBlock, ExamHeader, MatrixDocument};
pub use render::{render_exam, render_matrix, to_bytes};
