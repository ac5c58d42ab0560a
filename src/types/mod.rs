// src/types/mod.rs

pub mod api;

pub use api::{
    AnswerEvaluation, ErrorBody, HealthStatus, Question, QuestionList, ResumeAnalysis,
};
