// src/core/engine.rs
//! The interview flows: intake, the question loop, and the summary. Generic
//! over the console so tests can drive a whole session with scripted input.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::api_client::ApiClient;
use crate::render;
use crate::session::Session;
use crate::ui::{Console, Notice};
use crate::utils::{is_blank, normalize_experience_level, resume_mime_type, truncate_for_log};

/// Pre-filled answers to the intake prompts. Anything left `None` is asked
/// for interactively.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub role: Option<String>,
    pub level: Option<String>,
    pub resume_file: Option<PathBuf>,
    pub resume_text: Option<String>,
}

enum ResumeSource {
    File(PathBuf),
    Pasted(String),
}

pub struct InterviewEngine<C: Console> {
    client: ApiClient,
    console: C,
}

impl<C: Console> InterviewEngine<C> {
    pub fn new(client: ApiClient, console: C) -> Self {
        Self { client, console }
    }

    /// Run interviews until the user declines another round or the input
    /// closes. Every round starts from a fresh session; nothing carries
    /// over, and the pre-filled intake answers apply to the first round only.
    pub async fn run(&mut self, opts: RunOptions) -> Result<()> {
        let mut opts = opts;
        loop {
            let Some(mut session) = self.intake(&opts).await? else {
                return Ok(());
            };
            self.question_loop(&mut session).await?;
            session.finish();
            self.console.say("");
            self.console
                .say(&render::summary_block(&session.role, &session.summary()));
            info!(
                session = %session.id,
                duration_secs = (Utc::now() - session.started_at).num_seconds(),
                "Session finished"
            );
            if !self.wants_restart()? {
                return Ok(());
            }
            opts = RunOptions::default();
        }
    }

    /// Collect role, level and resume, then ask the backend for questions.
    /// Returns `None` when the user quits. A failed backend call keeps the
    /// user on the intake step, except when the resume came from the command
    /// line and retrying the same input cannot help.
    async fn intake(&mut self, opts: &RunOptions) -> Result<Option<Session>> {
        let role = match opts.role.clone() {
            Some(role) => role,
            None => match self.console.prompt("Target role:")? {
                Some(role) => role,
                None => return Ok(None),
            },
        };
        let level_override = match opts.level.as_deref() {
            Some(level) => normalize_experience_level(Some(level)),
            None => {
                match self
                    .console
                    .prompt("Experience level (blank lets the resume decide):")?
                {
                    Some(answer) => normalize_experience_level(Some(&answer)),
                    None => return Ok(None),
                }
            }
        };

        let mut from_flags = opts.resume_file.is_some() || opts.resume_text.is_some();
        let mut pending: Option<ResumeSource> = if let Some(path) = opts.resume_file.clone() {
            Some(ResumeSource::File(path))
        } else {
            opts.resume_text.clone().map(ResumeSource::Pasted)
        };

        loop {
            let source = match pending.take() {
                Some(source) => source,
                None => {
                    from_flags = false;
                    match self.collect_resume()? {
                        Some(source) => source,
                        None => return Ok(None),
                    }
                }
            };

            // Reject bad input before any network call
            match &source {
                ResumeSource::File(path) if resume_mime_type(&path.to_string_lossy()).is_none() => {
                    if from_flags {
                        anyhow::bail!("Please upload a PDF or text file.");
                    }
                    self.console
                        .notify(Notice::Warn, "Please upload a PDF or text file.");
                    continue;
                }
                ResumeSource::Pasted(text) if is_blank(text) => {
                    if from_flags {
                        anyhow::bail!("Please upload a file or paste your resume text.");
                    }
                    self.console
                        .notify(Notice::Warn, "Please upload a file or paste your resume text.");
                    continue;
                }
                _ => {}
            }

            match self
                .start_session(&role, level_override.as_deref(), source)
                .await
            {
                Ok(session) => return Ok(Some(session)),
                Err(err) if from_flags => return Err(err),
                Err(err) => {
                    self.console
                        .notify(Notice::Error, &format!("Error: {}", err));
                }
            }
        }
    }

    /// The intake form offers both a file upload and a paste box; at the
    /// terminal this is an optional path prompt with a paste fallback.
    fn collect_resume(&mut self) -> std::io::Result<Option<ResumeSource>> {
        let path = match self
            .console
            .prompt("Resume file path (blank to paste text):")?
        {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.is_empty() {
            return Ok(Some(ResumeSource::File(PathBuf::from(path))));
        }
        match self.console.prompt_multiline("Paste your resume text:")? {
            Some(text) => Ok(Some(ResumeSource::Pasted(text))),
            None => Ok(None),
        }
    }

    /// Analyze the resume, generate questions, and build the session. The
    /// analyzed experience level is kept on the session even when the user
    /// overrode it for question generation.
    async fn start_session(
        &mut self,
        role: &str,
        level_override: Option<&str>,
        source: ResumeSource,
    ) -> Result<Session> {
        let (analysis, resume_text) = match source {
            ResumeSource::File(path) => {
                let analysis = self.client.upload_resume(&path).await?;
                let resume_text = analysis.skills.join(", ");
                (analysis, resume_text)
            }
            ResumeSource::Pasted(text) => {
                let analysis = self.client.analyze_resume(&text).await?;
                (analysis, text)
            }
        };

        info!(
            "Extracted skills: {}, level: {}",
            analysis.skills.join(", "),
            analysis.experience_level
        );

        let experience_level = level_override
            .map(str::to_string)
            .unwrap_or_else(|| analysis.experience_level.clone());
        let questions = self
            .client
            .generate_questions(role, &experience_level, &analysis.skills)
            .await?
            .questions;

        let mut session = Session::new();
        session.begin_questions(
            role.to_string(),
            resume_text,
            analysis.skills,
            analysis.experience_level,
            questions,
        )?;
        info!(
            session = %session.id,
            questions = session.questions().len(),
            "Session ready"
        );
        Ok(session)
    }

    /// One pass over the questions in order. `skip` moves on without an
    /// evaluation, `quit` jumps straight to the summary.
    async fn question_loop(&mut self, session: &mut Session) -> Result<()> {
        self.console.say("");
        self.console.say(&render::questions_header(&session.role));
        let questions = session.questions().to_vec();

        for question in questions {
            self.console.say("");
            self.console.say(&render::question_block(&question));

            loop {
                let answer = match self
                    .console
                    .prompt_multiline("Your answer (or 'skip' / 'quit'):")?
                {
                    Some(answer) => answer,
                    None => return Ok(()),
                };
                match answer.trim() {
                    "" => {
                        self.console
                            .notify(Notice::Warn, "Please type an answer before submitting.");
                        continue;
                    }
                    "skip" => break,
                    "quit" => return Ok(()),
                    _ => {}
                }

                debug!("Answer preview: {}", truncate_for_log(&answer, 120));
                match self
                    .client
                    .evaluate_answer(&question.question, &answer, &session.skills, &session.role)
                    .await
                {
                    Ok(evaluation) => {
                        let block = render::feedback_block(&evaluation);
                        session.record_evaluation(question.id, answer, evaluation)?;
                        self.console.say("");
                        self.console.say(&block);
                        break;
                    }
                    Err(err) => {
                        // The answer is not recorded; the user may resubmit
                        self.console
                            .notify(Notice::Error, &format!("Error: {}", err));
                    }
                }
            }
        }
        Ok(())
    }

    fn wants_restart(&mut self) -> std::io::Result<bool> {
        match self.console.prompt("Try another interview? [y/N]:")? {
            Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
            None => Ok(false),
        }
    }
}
