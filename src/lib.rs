// src/lib.rs
//! Terminal client for the InterviewCoachAI backend: resume intake, tailored
//! interview questions, per-answer feedback and a session summary.

use anyhow::Result;

pub mod cli;
pub mod config;
pub mod core;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;
pub mod utils;

pub use config::ClientConfig;
pub use core::{ApiClient, ApiError, InterviewEngine, RunOptions};
pub use session::{Session, SessionSummary};

/// Convenience function for running a full interview at the terminal
pub async fn run_interview(api_base: String, opts: RunOptions) -> Result<()> {
    let client = ApiClient::new(api_base)?;
    let mut engine = InterviewEngine::new(client, ui::Terminal);
    engine.run(opts).await
}
