use std::fmt;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Name of the cookie carrying the identity provider's session token.
    pub session_cookie: String,
    pub google: Option<GoogleOAuth>,
}

/// Google sign-in client credentials handed out by the identity provider.
#[derive(Clone)]
pub struct GoogleOAuth {
    pub client_id: String,
    /// Used by the identity provider's code exchange; never served to clients.
    #[allow(dead_code)]
    pub client_secret: String,
}

impl GoogleOAuth {
    /// Both halves must be present for sign-in to be offered.
    pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        let client_id = client_id.filter(|v| !v.trim().is_empty())?;
        let client_secret = client_secret.filter(|v| !v.trim().is_empty())?;
        Some(GoogleOAuth {
            client_id,
            client_secret,
        })
    }
}

impl fmt::Debug for GoogleOAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleOAuth")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_cookie: std::env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "jobtracker_session".to_string()),
            google: GoogleOAuth::from_parts(
                std::env::var("GOOGLE_CLIENT_ID").ok(),
                std::env::var("GOOGLE_CLIENT_SECRET").ok(),
            ),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
