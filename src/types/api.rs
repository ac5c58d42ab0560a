// src/types/api.rs
//! Typed request/response schemas for the interview-coach backend

use serde::{Deserialize, Serialize};

// ===== Request Payloads =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub role: String,
    pub experience_level: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub question: String,
    pub answer: String,
    pub resume_skills: Vec<String>,
    pub role: String,
}

// ===== Response Payloads =====

/// Skills and experience level extracted from a resume, either from pasted
/// text (`/analyze-resume`) or an uploaded file (`/upload-resume`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub experience_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
}

/// Scoring verdict for one submitted answer. The backend owns the scoring
/// logic entirely; the client only checks that the advertised ranges hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub relevance: f64,
    pub confidence: f64,
    pub structure_star: bool,
    pub missing_points: Vec<String>,
    pub improved_answer: String,
}

impl AnswerEvaluation {
    /// Range check for the documented contract: relevance 0-10, confidence
    /// 0-100. A violation means the response cannot be trusted.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=10.0).contains(&self.relevance) {
            return Err(format!("relevance {} outside 0-10", self.relevance));
        }
        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside 0-100", self.confidence));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Error payload the backend attaches to non-2xx responses. `detail` is
/// optional because proxies and crashes can produce arbitrary bodies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
