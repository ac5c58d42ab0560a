// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ClientConfig;
use crate::core::{ApiClient, RunOptions};
use crate::utils::is_blank;

#[derive(Parser)]
#[command(name = "icoach")]
#[command(about = "Mock interview coaching at the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend base URL for this invocation
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Mirror log output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a full mock interview (the default)
    Run {
        /// Target role, e.g. "Backend Engineer"
        #[arg(long)]
        role: Option<String>,
        /// Experience level override (junior, mid, senior)
        #[arg(long)]
        level: Option<String>,
        /// Resume file to upload (PDF or plain text)
        #[arg(long)]
        resume_file: Option<PathBuf>,
        /// Resume text to analyze instead of a file
        #[arg(long)]
        resume_text: Option<String>,
    },
    /// Analyze a resume and print the extracted skills
    Analyze {
        /// Resume file to upload (PDF or plain text)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Resume text to analyze instead of a file
        #[arg(long)]
        text: Option<String>,
    },
    /// Check that the backend is up
    Health,
}

pub async fn handle_command(cli: Cli, config: &ClientConfig) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Run {
        role: None,
        level: None,
        resume_file: None,
        resume_text: None,
    });

    match command {
        Command::Run {
            role,
            level,
            resume_file,
            resume_text,
        } => {
            let opts = RunOptions {
                role,
                level,
                resume_file,
                resume_text,
            };
            crate::run_interview(config.api_base.clone(), opts).await
        }

        Command::Analyze { file, text } => {
            let client = ApiClient::new(config.api_base.clone())?;
            let analysis = match (file, text) {
                (Some(path), _) => client.upload_resume(&path).await?,
                (None, Some(text)) if !is_blank(&text) => client.analyze_resume(&text).await?,
                _ => anyhow::bail!("Please upload a file or paste your resume text."),
            };
            println!("Skills: {}", analysis.skills.join(", "));
            println!("Experience level: {}", analysis.experience_level);
            Ok(())
        }

        Command::Health => {
            let client = ApiClient::new(config.api_base.clone())?;
            let health = client.health().await?;
            match health.service {
                Some(service) => {
                    println!("✓ {} is {} at {}", service, health.status, client.base_url())
                }
                None => println!("✓ Backend is {} at {}", health.status, client.base_url()),
            }
            Ok(())
        }
    }
}
