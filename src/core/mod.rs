// src/core/mod.rs
//! Core client services: the backend gateway and the interview flows

pub mod api_client;
pub mod engine;

pub use api_client::{ApiClient, ApiError};
pub use engine::{InterviewEngine, RunOptions};
