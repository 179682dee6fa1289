use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::models::curriculum::{CurriculumRow, CurriculumTable};
use crate::models::plan::ExamPlan;

/// Load an exam plan from a TOML file.
pub async fn load_exam_plan(plan_path: &Path) -> Result<ExamPlan> {
    let content = fs::read_to_string(plan_path)
        .await
        .with_context(|| format!("cannot read plan file: {}", plan_path.display()))?;

    let plan: ExamPlan = toml::from_str(&content)
        .with_context(|| format!("cannot parse plan file: {}", plan_path.display()))?;

    Ok(plan)
}

/// One curriculum TOML file: a bare list of rows.
#[derive(Debug, serde::Deserialize)]
struct CurriculumFile {
    #[serde(default)]
    rows: Vec<CurriculumRow>,
}

/// Load all curriculum TOML files from a folder into one table.
///
/// Files that fail to parse are logged and skipped; the remaining rows are
/// concatenated in directory order.
pub async fn load_curriculum_folder(folder_path: &str) -> Result<CurriculumTable> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("curriculum folder does not exist: {}", folder_path);
    }

    let mut rows = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("cannot read curriculum folder: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "loading curriculum file: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_curriculum_file(&path).await {
                Ok(mut file_rows) => {
                    tracing::info!("loaded {} curriculum rows", file_rows.len());
                    rows.append(&mut file_rows);
                }
                Err(e) => {
                    tracing::warn!("skipping curriculum file {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(CurriculumTable::new(rows))
}

async fn load_curriculum_file(path: &Path) -> Result<Vec<CurriculumRow>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read curriculum file: {}", path.display()))?;

    let file: CurriculumFile = toml::from_str(&content)
        .with_context(|| format!("cannot parse curriculum file: {}", path.display()))?;

    Ok(file.rows)
}
