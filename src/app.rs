use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{error, info, warn};

use crate::compose;
use crate::compose::ExamHeader;
use crate::config::Config;
use crate::models::curriculum::CurriculumTable;
use crate::models::loaders;
use crate::models::plan::ExamPlan;
use crate::session::{ExamSession, RecordSnapshot};
use crate::workflow::{QuestionCtx, QuestionFlow};

/// Main application structure
pub struct App {
    config: Config,
    flow: QuestionFlow,
}

impl App {
    /// Initialize the application
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);
        let flow = QuestionFlow::new(&config);
        Self { config, flow }
    }

    /// Run the main batch: plan in, three .docx files out.
    pub async fn run(&self) -> Result<()> {
        let plan = loaders::load_exam_plan(Path::new(&self.config.plan_path)).await?;

        if plan.questions.is_empty() {
            warn!("⚠️ the plan has no question requests, nothing to do");
            return Ok(());
        }
        info!(
            "✓ plan loaded: {} / {}, {} question requests",
            plan.subject,
            plan.grade,
            plan.questions.len()
        );
        if !self.flow.gateway_ready() {
            warn!("🔐 no API key configured; generation will fail (set DEKIEMTRA_API_KEY)");
        }

        let curriculum = self.load_curriculum().await;
        check_plan_against_curriculum(&plan, &curriculum);

        let mut session = ExamSession::new();
        let stats = self.generate_all(&plan, &mut session).await;

        self.apply_external_snapshot(&mut session).await?;

        let list_report = session.validate_list();
        if !list_report.is_valid() {
            // advisory: the teacher can always export and fix in Word
            for e in &list_report.errors {
                warn!("⚠️ exam check: {e}");
            }
        }

        self.export(&plan, &session).await?;
        print_final_stats(&stats, &session, &self.config);

        Ok(())
    }

    /// Generate every requested question, appending the successful ones.
    async fn generate_all(&self, plan: &ExamPlan, session: &mut ExamSession) -> ProcessingStats {
        let total = plan.questions.len();
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        // one request at a time: the exam list is single-owner state
        for (idx, request) in plan.questions.iter().enumerate() {
            let ctx = QuestionCtx::new(idx + 1, total);
            info!("{ctx} ✨ generating: {} / {}", request.topic, request.lesson);

            match self.flow.run(session, plan, request, &ctx).await {
                Ok(record) => {
                    if record.format_ok {
                        info!(
                            "{ctx} ✓ generated (model: {})",
                            record.model.as_deref().unwrap_or("unknown")
                        );
                    } else {
                        stats.format_flagged += 1;
                    }
                    session.append(record);
                    stats.success += 1;
                }
                Err(e) => {
                    error!("{ctx} ❌ {e}");
                    stats.failed += 1;
                }
            }
        }

        stats
    }

    async fn load_curriculum(&self) -> CurriculumTable {
        if !self.config.curriculum_docx.is_empty() {
            match fs::read(&self.config.curriculum_docx).await {
                Ok(bytes) => match loaders::load_curriculum_from_docx(&bytes) {
                    Ok((table, warning)) => {
                        info!("✓ curriculum DOCX loaded: {} rows", table.len());
                        if !warning.is_empty() {
                            warn!("⚠️ {warning}");
                        }
                        return table;
                    }
                    Err(e) => warn!("⚠️ curriculum DOCX unusable: {e}"),
                },
                Err(e) => warn!(
                    "⚠️ cannot read curriculum DOCX {}: {e}",
                    self.config.curriculum_docx
                ),
            }
        }

        if Path::new(&self.config.curriculum_folder).exists() {
            match loaders::load_curriculum_folder(&self.config.curriculum_folder).await {
                Ok(table) if !table.is_empty() => {
                    info!("✓ curriculum folder loaded: {} rows", table.len());
                    return table;
                }
                Ok(_) => warn!("⚠️ curriculum folder has no rows, using sample data"),
                Err(e) => warn!("⚠️ curriculum folder unusable: {e}, using sample data"),
            }
        } else {
            info!("no curriculum data configured, using sample data");
        }

        CurriculumTable::sample()
    }

    /// Apply an externally edited snapshot before export, when configured.
    async fn apply_external_snapshot(&self, session: &mut ExamSession) -> Result<()> {
        if self.config.snapshot_path.is_empty() {
            return Ok(());
        }

        let raw = fs::read_to_string(&self.config.snapshot_path)
            .await
            .with_context(|| format!("cannot read snapshot: {}", self.config.snapshot_path))?;
        let rows: Vec<RecordSnapshot> = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse snapshot: {}", self.config.snapshot_path))?;

        info!("💾 applying edited snapshot ({} rows)", rows.len());
        session.apply_snapshot(&rows);
        Ok(())
    }

    /// Write exam, exam-with-answers, matrix and the session snapshot.
    async fn export(&self, plan: &ExamPlan, session: &ExamSession) -> Result<()> {
        let out = PathBuf::from(&self.config.output_folder);
        fs::create_dir_all(&out)
            .await
            .with_context(|| format!("cannot create output folder: {}", out.display()))?;

        let header = ExamHeader {
            school_name: self.config.school_name.clone(),
            subject: plan.subject.clone(),
            grade: plan.grade.clone(),
            exam_title: plan.exam_title.clone(),
        };

        let stem = file_stem(&plan.subject, &plan.grade);

        let exam_blocks = compose::compose_exam(&header, session.records(), false);
        let exam_bytes = compose::to_bytes(compose::render_exam(&exam_blocks))?;
        write_output(&out, &format!("Exam_{stem}.docx"), &exam_bytes).await?;

        let key_blocks = compose::compose_exam(&header, session.records(), true);
        let key_bytes = compose::to_bytes(compose::render_exam(&key_blocks))?;
        write_output(&out, &format!("Exam_{stem}_answer_key.docx"), &key_bytes).await?;

        let matrix = compose::compose_matrix(&plan.subject, &plan.grade, session.records());
        let matrix_bytes = compose::to_bytes(compose::render_matrix(&matrix))?;
        write_output(&out, &format!("Matrix_{stem}.docx"), &matrix_bytes).await?;

        // editable snapshot for a later DEKIEMTRA_SNAPSHOT run
        let snapshot = serde_json::to_vec_pretty(&session.snapshot())?;
        write_output(&out, &format!("Exam_{stem}_session.json"), &snapshot).await?;

        Ok(())
    }
}

/// Processing statistics
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    /// generated but failed the advisory format check
    format_flagged: usize,
    total: usize,
}

fn file_stem(subject: &str, grade: &str) -> String {
    format!("{subject}_{grade}").replace(' ', "_")
}

/// Warn about plan topics the curriculum does not know; purely advisory.
fn check_plan_against_curriculum(plan: &ExamPlan, curriculum: &CurriculumTable) {
    if curriculum.is_empty() {
        return;
    }
    for request in &plan.questions {
        if !request.topic.trim().is_empty() && !curriculum.has_topic(&request.topic) {
            warn!("⚠️ topic '{}' is not in the curriculum data", request.topic);
        }
    }
}

async fn write_output(folder: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let path = folder.join(name);
    fs::write(&path, bytes)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("📥 wrote {}", path.display());
    Ok(())
}

// ========== log helpers ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 startup - exam assembly from plan");
    info!("📄 plan: {}", config.plan_path);
    info!("📁 output folder: {}", config.output_folder);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, session: &ExamSession, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 run complete");
    info!(
        "finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ generated: {}/{}", stats.success, stats.total);
    info!("❌ failed: {}", stats.failed);
    if stats.format_flagged > 0 {
        info!("⚠️ format-flagged (kept, review them): {}", stats.format_flagged);
    }
    info!("🧮 total points: {:.2}", session.total_points());
    info!("{}", "=".repeat(60));
    info!("\ndocuments saved under: {}", config.output_folder);
}
