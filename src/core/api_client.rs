// src/core/api_client.rs
//! HTTP client for the coaching backend - JSON for the scoring calls,
//! multipart for resume files

use reqwest::multipart::{Form, Part};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, trace};

use crate::types::{
    api::{AnalyzeResumeRequest, EvaluateAnswerRequest, GenerateQuestionsRequest},
    AnswerEvaluation, ErrorBody, HealthStatus, QuestionList, ResumeAnalysis,
};
use crate::utils::resume_mime_type;

const ANALYZE_RESUME_ENDPOINT: &str = "/analyze-resume";
const UPLOAD_RESUME_ENDPOINT: &str = "/upload-resume";
const GENERATE_QUESTIONS_ENDPOINT: &str = "/generate-questions";
const EVALUATE_ANSWER_ENDPOINT: &str = "/evaluate-answer";
const HEALTH_ENDPOINT: &str = "/health";

/// Failures talking to the backend, split so flows can tell a dead server
/// from a rejected request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API Error {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Failed to read resume file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported resume format: {filename}. Use a PDF or plain-text file")]
    UnsupportedFile { filename: String },

    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    #[error("Invalid payload from {endpoint}: {reason}")]
    Schema {
        endpoint: &'static str,
        reason: String,
    },
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL. No request timeout is set;
    /// scoring calls against a cold backend can run long and the caller
    /// waits them out.
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract skills and an inferred experience level from pasted text.
    pub async fn analyze_resume(&self, text: &str) -> Result<ResumeAnalysis, ApiError> {
        info!("Analyzing pasted resume text ({} chars)", text.len());
        let payload = AnalyzeResumeRequest {
            text: text.to_string(),
        };
        self.post_json(ANALYZE_RESUME_ENDPOINT, &payload).await
    }

    /// Ship a resume file as multipart form data. The backend reads the
    /// part named `file` and returns the same analysis as the text path.
    pub async fn upload_resume(&self, file_path: &Path) -> Result<ResumeAnalysis, ApiError> {
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::UnsupportedFile {
                filename: file_path.display().to_string(),
            })?
            .to_string();
        let content_type =
            resume_mime_type(&file_name).ok_or_else(|| ApiError::UnsupportedFile {
                filename: file_name.clone(),
            })?;

        let bytes = tokio::fs::read(file_path).await?;
        info!("Uploading resume file: {} ({} bytes)", file_name, bytes.len());

        let form = Form::new().part(
            "file",
            Part::bytes(bytes).file_name(file_name).mime_str(content_type)?,
        );

        let url = format!("{}{}", self.base_url, UPLOAD_RESUME_ENDPOINT);
        trace!("POST {}", url);
        let response = self.client.post(&url).multipart(form).send().await?;
        decode(UPLOAD_RESUME_ENDPOINT, response).await
    }

    /// Role-tailored interview questions for the extracted skill set.
    pub async fn generate_questions(
        &self,
        role: &str,
        experience_level: &str,
        skills: &[String],
    ) -> Result<QuestionList, ApiError> {
        info!(
            "Requesting questions for role '{}' at '{}' level",
            role, experience_level
        );
        let payload = GenerateQuestionsRequest {
            role: role.to_string(),
            experience_level: experience_level.to_string(),
            skills: skills.to_vec(),
        };
        self.post_json(GENERATE_QUESTIONS_ENDPOINT, &payload).await
    }

    /// Score one answer. Responses with out-of-range scores are rejected
    /// rather than rendered.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        resume_skills: &[String],
        role: &str,
    ) -> Result<AnswerEvaluation, ApiError> {
        info!("Evaluating answer ({} chars)", answer.len());
        let payload = EvaluateAnswerRequest {
            question: question.to_string(),
            answer: answer.to_string(),
            resume_skills: resume_skills.to_vec(),
            role: role.to_string(),
        };
        let evaluation: AnswerEvaluation =
            self.post_json(EVALUATE_ANSWER_ENDPOINT, &payload).await?;
        evaluation.validate().map_err(|reason| ApiError::Schema {
            endpoint: EVALUATE_ANSWER_ENDPOINT,
            reason,
        })?;
        Ok(evaluation)
    }

    /// Liveness probe for the `health` subcommand.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);
        trace!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(HEALTH_ENDPOINT, response).await
    }

    /// Generic POST request with JSON
    async fn post_json<T, R>(&self, endpoint: &'static str, payload: &T) -> Result<R, ApiError>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        decode(endpoint, response).await
    }
}

/// Shared response handling: 2xx parses the expected schema, anything else
/// surfaces the backend's `detail` field when present.
async fn decode<R>(endpoint: &'static str, response: reqwest::Response) -> Result<R, ApiError>
where
    R: serde::de::DeserializeOwned,
{
    let status = response.status();
    trace!("Response status: {}", status);

    if status.is_success() {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { endpoint, source })
    } else {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let detail = body
            .detail
            .filter(|d| !d.trim().is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Unknown error".to_string());
        error!("Backend rejected {}: {} {}", endpoint, status, detail);
        Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}
