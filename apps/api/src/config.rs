use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Constructed once at process start and passed into the service by value.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Bearer token lifetime in hours.
    pub token_ttl_hours: i64,
    /// Root directory for stored resume files.
    pub upload_dir: PathBuf,
    /// Hard cap on resume file size, enforced server-side.
    pub max_upload_bytes: usize,
    /// Upper bound for `page_size` on list endpoints; larger requests are clamped.
    pub max_page_size: u32,
    pub default_page_size: u32,
    /// Bootstrap admin credentials; the user is created at startup if missing.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub notify_from: Option<String>,
    /// Inbox that receives the internal "new lead" notification.
    pub notify_inbox: Option<String>,
    pub notify_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_hours: parse_env("TOKEN_TTL_HOURS", 24)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads/resumes".to_string())
                .into(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            max_page_size: parse_env("MAX_PAGE_SIZE", 100)?,
            default_page_size: parse_env("DEFAULT_PAGE_SIZE", 20)?,
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            sendgrid_api_key: std::env::var("SENDGRID_API_KEY").ok(),
            notify_from: std::env::var("NOTIFY_FROM").ok(),
            notify_inbox: std::env::var("NOTIFY_INBOX").ok(),
            notify_timeout_secs: parse_env("NOTIFY_TIMEOUT_SECS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
