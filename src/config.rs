use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Environment variable naming the backend proxy, e.g. `https://chat.example.com`.
pub const BASE_URL_ENV: &str = "STIR_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Deadline for the credential exchange during login.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(15);

/// Deadline for verifying a persisted token at startup.
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub login_timeout: Duration,
    pub verify_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            login_timeout: LOGIN_TIMEOUT,
            verify_timeout: VERIFY_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self> {
        let raw =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let url = Url::parse(&raw)
            .with_context(|| format!("invalid {BASE_URL_ENV}: {raw}"))?;
        Ok(Self::new(url))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}
