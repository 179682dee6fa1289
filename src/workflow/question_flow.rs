//! Single-question generation flow
//!
//! Core responsibility: the full pipeline for one question request.
//!
//! Order:
//! 1. resolve the learning objective (teacher text, cache, or AI suggestion)
//! 2. generate the question text through the gateway
//! 3. format-check the result (advisory, never blocking)

use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::plan::{ExamPlan, QuestionRequest};
use crate::models::question::{DifficultyLevel, QuestionRecord, QuestionType};
use crate::services::{prompts, validator, AiGateway, GenParams};
use crate::session::ExamSession;
use crate::workflow::question_ctx::QuestionCtx;

/// Question generation flow.
///
/// Responsibilities:
/// - turn one `QuestionRequest` into one `QuestionRecord` draft
/// - only one question at a time; no `Vec<QuestionRecord>` in here
/// - appending to the exam stays the caller's decision
pub struct QuestionFlow {
    gateway: AiGateway,
    params: GenParams,
    verbose_logging: bool,
}

impl QuestionFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            gateway: AiGateway::new(config),
            params: GenParams::default(),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn gateway_ready(&self) -> bool {
        self.gateway.ready()
    }

    /// Run the flow for one request.
    ///
    /// `session` is only touched for the objective suggestion cache; the
    /// produced record is returned, not appended.
    pub async fn run(
        &self,
        session: &mut ExamSession,
        plan: &ExamPlan,
        request: &QuestionRequest,
        ctx: &QuestionCtx,
    ) -> Result<QuestionRecord> {
        let level = match DifficultyLevel::parse(&request.level) {
            Some(level) => level,
            None => {
                warn!("{ctx} unknown level '{}', using Level 1", request.level);
                DifficultyLevel::Level1
            }
        };

        let objective = self.resolve_objective(session, plan, request, ctx).await;

        // a fresh seed keeps regenerations of the same request from repeating
        let seed = rand::thread_rng().gen_range(1..=999_999);
        let mut enriched = request.clone();
        enriched.objective = objective.clone();
        let prompt = prompts::single_question(
            &plan.grade,
            &plan.subject,
            &plan.semester,
            &enriched,
            level,
            seed,
        );

        if self.verbose_logging {
            info!("{ctx} prompt is {} characters", prompt.chars().count());
        }

        let outcome = self.gateway.generate(&prompt, &self.params).await;
        if let Some(error) = outcome.error {
            anyhow::bail!("generation failed: {error}");
        }
        let content = outcome.text.unwrap_or_default();

        let question_type = QuestionType::classify(&request.type_label);
        let report = validator::validate(&content, question_type);
        if !report.is_valid() {
            warn!(
                "{ctx} format check failed (question kept, review before export): {}",
                report.errors.join("; ")
            );
        }
        for warning in &report.warnings {
            info!("{ctx} format note: {warning}");
        }

        Ok(QuestionRecord {
            semester: plan.semester.clone(),
            grade: plan.grade.clone(),
            subject: plan.subject.clone(),
            topic: request.topic.clone(),
            lesson: request.lesson.clone(),
            objective,
            question_type,
            level,
            points: request.points.clone(),
            content,
            model: outcome.model,
            format_ok: report.is_valid(),
            format_errors: report.errors,
        })
    }

    /// Use the teacher's objective text when present; otherwise fall back to
    /// the session cache, then to an AI suggestion (cached on success).
    async fn resolve_objective(
        &self,
        session: &mut ExamSession,
        plan: &ExamPlan,
        request: &QuestionRequest,
        ctx: &QuestionCtx,
    ) -> String {
        if !request.objective.trim().is_empty() {
            return request.objective.clone();
        }

        if let Some(cached) =
            session.cached_suggestion(&plan.grade, &plan.subject, &request.topic, &request.lesson)
        {
            return cached.to_string();
        }

        if !self.gateway.ready() {
            return String::new();
        }

        info!("{ctx} no objective given, asking for a suggestion...");
        let prompt = prompts::objective_suggestion(
            &plan.grade,
            &plan.subject,
            &request.topic,
            &request.lesson,
        );
        let outcome = self.gateway.generate(&prompt, &self.params).await;
        match outcome.text {
            Some(text) => {
                session.store_suggestion(
                    &plan.grade,
                    &plan.subject,
                    &request.topic,
                    &request.lesson,
                    text.clone(),
                );
                text
            }
            None => {
                warn!(
                    "{ctx} objective suggestion failed: {}",
                    outcome.error.unwrap_or_default()
                );
                String::new()
            }
        }
    }
}
