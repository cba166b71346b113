use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the employee sheet (CSV). Created on first write if absent.
    pub employee_sheet: String,
    /// Path of the read-only job description sheet (CSV).
    pub job_sheet: String,
    /// Base URL of the external ML scoring service.
    pub scorer_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            employee_sheet: require_env("EMPLOYEE_SHEET")?,
            job_sheet: require_env("JOB_SHEET")?,
            scorer_url: require_env("SCORER_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
