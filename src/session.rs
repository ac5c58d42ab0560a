// src/session.rs
//! In-memory state for one interview attempt

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::types::api::{AnswerEvaluation, Question};

/// Linear flow of one attempt. Each transition is driven by a single user
/// action; the first two are gated by a successful backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Intake,
    Questions,
    Summary,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("questions are already set for this session")]
    QuestionsAlreadySet,
    #[error("question {0} does not exist in this session")]
    UnknownQuestion(u32),
    #[error("question {0} was already answered")]
    AlreadyAnswered(u32),
}

/// One scored answer, in submission order.
#[derive(Debug, Clone)]
pub struct RecordedEvaluation {
    pub question_id: u32,
    pub question: String,
    pub answer: String,
    pub evaluation: AnswerEvaluation,
}

/// Everything the client remembers about the current attempt. Lives for one
/// run; a restart builds a fresh instance and the old one is dropped.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub resume_text: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub role: String,
    questions: Vec<Question>,
    evaluations: Vec<RecordedEvaluation>,
    phase: SessionPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub answered: usize,
    pub total: usize,
    pub average_relevance: Option<f64>,
    pub star_count: usize,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            resume_text: String::new(),
            skills: Vec::new(),
            experience: String::new(),
            role: String::new(),
            questions: Vec::new(),
            evaluations: Vec::new(),
            phase: SessionPhase::Intake,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn evaluations(&self) -> &[RecordedEvaluation] {
        &self.evaluations
    }

    /// Populate the session from a completed intake and move to the
    /// question phase. Questions are set exactly once and never mutated
    /// afterward; a second call is rejected.
    pub fn begin_questions(
        &mut self,
        role: String,
        resume_text: String,
        skills: Vec<String>,
        experience: String,
        questions: Vec<Question>,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Intake {
            return Err(SessionError::QuestionsAlreadySet);
        }
        self.role = role;
        self.resume_text = resume_text;
        self.skills = skills;
        self.experience = experience;
        self.questions = questions;
        self.phase = SessionPhase::Questions;
        Ok(())
    }

    pub fn is_answered(&self, question_id: u32) -> bool {
        self.evaluations.iter().any(|e| e.question_id == question_id)
    }

    /// Append one scored answer. At most one evaluation per question id is
    /// accepted, so a repeated submit cannot double-count a question.
    pub fn record_evaluation(
        &mut self,
        question_id: u32,
        answer: String,
        evaluation: AnswerEvaluation,
    ) -> Result<(), SessionError> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(SessionError::UnknownQuestion(question_id))?;
        if self.is_answered(question_id) {
            return Err(SessionError::AlreadyAnswered(question_id));
        }
        self.evaluations.push(RecordedEvaluation {
            question_id,
            question: question.question.clone(),
            answer,
            evaluation,
        });
        Ok(())
    }

    pub fn finish(&mut self) {
        self.phase = SessionPhase::Summary;
    }

    /// Aggregate the recorded evaluations. The average is absent when
    /// nothing was evaluated rather than dividing by zero.
    pub fn summary(&self) -> SessionSummary {
        let answered = self.evaluations.len();
        let average_relevance = if answered == 0 {
            None
        } else {
            let sum: f64 = self.evaluations.iter().map(|e| e.evaluation.relevance).sum();
            Some(sum / answered as f64)
        };
        let star_count = self
            .evaluations
            .iter()
            .filter(|e| e.evaluation.structure_star)
            .count();
        SessionSummary {
            answered,
            total: self.questions.len(),
            average_relevance,
            star_count,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
