// src/config.rs
use std::env;

/// Placeholder used when no provider key is configured. Upstream auth will
/// reject it, which surfaces as the standard failure branch.
const DEFAULT_API_KEY: &str = "default_key";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Process configuration, read once at startup.
///
/// | Variable         | Default       |
/// |------------------|---------------|
/// | `OPENAI_API_KEY` | `default_key` |
/// | `OPENAI_MODEL`   | `gpt-4o`      |
/// | `HOST`           | `0.0.0.0`     |
/// | `PORT`           | `3000`        |
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
