/// Program configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// School name printed on the exam header
    pub school_name: String,
    /// Exam plan file (TOML) driving the batch run
    pub plan_path: String,
    /// Folder holding curriculum TOML files (optional)
    pub curriculum_folder: String,
    /// Curriculum DOCX file (optional, tables are extracted)
    pub curriculum_docx: String,
    /// Folder the exported .docx files are written to
    pub output_folder: String,
    /// Optional externally edited session snapshot (JSON), applied before export
    pub snapshot_path: String,
    /// Whether to log per-question detail
    pub verbose_logging: bool,
    // --- AI gateway configuration ---
    pub ai_api_key: String,
    pub ai_api_base_url: String,
    /// Comma-separated candidate models, tried in priority order
    pub ai_model_names: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            school_name: "Truong Tieu hoc".to_string(),
            plan_path: "exam_plan.toml".to_string(),
            curriculum_folder: "curriculum".to_string(),
            curriculum_docx: String::new(),
            output_folder: "output_docx".to_string(),
            snapshot_path: String::new(),
            verbose_logging: false,
            ai_api_key: String::new(),
            ai_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            ai_model_names: "gemini-1.5-flash,gemini-1.5-pro".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            school_name: std::env::var("DEKIEMTRA_SCHOOL_NAME").unwrap_or(default.school_name),
            plan_path: std::env::var("DEKIEMTRA_PLAN").unwrap_or(default.plan_path),
            curriculum_folder: std::env::var("DEKIEMTRA_CURRICULUM_FOLDER").unwrap_or(default.curriculum_folder),
            curriculum_docx: std::env::var("DEKIEMTRA_CURRICULUM_DOCX").unwrap_or(default.curriculum_docx),
            output_folder: std::env::var("DEKIEMTRA_OUTPUT_FOLDER").unwrap_or(default.output_folder),
            snapshot_path: std::env::var("DEKIEMTRA_SNAPSHOT").unwrap_or(default.snapshot_path),
            verbose_logging: std::env::var("DEKIEMTRA_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            ai_api_key: std::env::var("DEKIEMTRA_API_KEY").unwrap_or(default.ai_api_key),
            ai_api_base_url: std::env::var("DEKIEMTRA_API_BASE_URL").unwrap_or(default.ai_api_base_url),
            ai_model_names: std::env::var("DEKIEMTRA_MODEL_NAMES").unwrap_or(default.ai_model_names),
        }
    }
}
