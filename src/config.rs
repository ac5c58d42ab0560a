// src/config.rs
//! Client configuration and API base resolution

use std::path::PathBuf;
use tracing::info;

pub const LOCAL_API_BASE: &str = "http://localhost:8000";
pub const DEPLOYED_API_BASE: &str = "https://interview-coach-ai-backend.onrender.com";

/// Hosts that select the local backend default.
const LOCAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", ""];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
}

impl ClientConfig {
    /// Resolve the API base once at startup. `api_flag` is the
    /// per-invocation `--api` value; the environment supplies the rest.
    pub fn load(api_flag: Option<&str>) -> Self {
        let override_base = std::env::var("ICOACH_API_BASE").ok();
        let host = std::env::var("ICOACH_HOST").unwrap_or_default();
        let api_base = resolve_api_base(override_base.as_deref(), api_flag, &host);
        info!("Using API base: {}", api_base);
        Self { api_base }
    }
}

/// Where the JSON log goes. Resolved before the subscriber exists, so this
/// never logs.
pub fn log_path() -> PathBuf {
    std::env::var("ICOACH_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("icoach.log"))
}

/// Precedence: explicit override, then the invocation flag, then a default
/// chosen from the host string (loopback or unset selects the local
/// backend). Always yields a base URL; there is no error path.
pub fn resolve_api_base(
    override_base: Option<&str>,
    api_flag: Option<&str>,
    host: &str,
) -> String {
    if let Some(base) = override_base.map(str::trim).filter(|b| !b.is_empty()) {
        return base.to_string();
    }
    if let Some(base) = api_flag.map(str::trim).filter(|b| !b.is_empty()) {
        return base.to_string();
    }
    if LOCAL_HOSTS.contains(&host) {
        LOCAL_API_BASE.to_string()
    } else {
        DEPLOYED_API_BASE.to_string()
    }
}
