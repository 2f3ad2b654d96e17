use anyhow::{Context, Result};

const DEFAULT_PEOPLE_API_URL: &str = "https://forinterview.onrender.com";
const DEFAULT_JOB_TITLE: &str = "Posk_UXdesigner_sr001";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote Candidate API (`/people/` is appended).
    pub people_api_url: String,
    pub people_api_timeout_secs: u64,
    pub job_title: String,
    /// Number of candidate columns per matrix page.
    pub matrix_page_size: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            people_api_url: env_or("PEOPLE_API_URL", DEFAULT_PEOPLE_API_URL),
            people_api_timeout_secs: env_or("PEOPLE_API_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("PEOPLE_API_TIMEOUT_SECS must be a whole number of seconds")?,
            job_title: env_or("JOB_TITLE", DEFAULT_JOB_TITLE),
            matrix_page_size: parse_page_size(&env_or("MATRIX_PAGE_SIZE", "15"))?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_page_size(raw: &str) -> Result<usize> {
    let size = raw
        .parse::<usize>()
        .context("MATRIX_PAGE_SIZE must be a positive integer")?;
    anyhow::ensure!(size > 0, "MATRIX_PAGE_SIZE must be greater than zero");
    Ok(size)
}
