//! Application configuration.
//!
//! Loaded once at startup from the environment and passed explicitly to whatever
//! needs it. Empty or missing variables fall back to the defaults below.

use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_APP_NAME: &str = "SNARE";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

pub const ENV_API_BASE_URL: &str = "VITE_API_BASE_URL";
pub const ENV_APP_NAME: &str = "VITE_APP_NAME";
pub const ENV_APP_VERSION: &str = "VITE_APP_VERSION";
pub const ENV_MODE: &str = "VITE_MODE";

/// Build mode of the running application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Resolved service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub health: String,
    pub check_listing: String,
    pub check_manual_listing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_base = get(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&raw_base)?;

        let environment = match get(ENV_MODE) {
            Some(mode) => parse_mode(&mode)?,
            None => Environment::from_build(),
        };

        Ok(Self {
            api_base_url,
            app_name: get(ENV_APP_NAME).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: get(ENV_APP_VERSION).unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            health: format!("{}/", self.api_base_url),
            check_listing: format!("{}/check_listing", self.api_base_url),
            check_manual_listing: format!("{}/check_manual_listing", self.api_base_url),
        }
    }

    /// Log the active configuration. Only emitted in development.
    pub fn log_config(&self) {
        if self.is_development() {
            let endpoints = self.endpoints();
            tracing::debug!(
                api_base_url = %self.api_base_url,
                app_name = %self.app_name,
                app_version = %self.app_version,
                environment = self.environment.as_str(),
                health = %endpoints.health,
                check_listing = %endpoints.check_listing,
                check_manual_listing = %endpoints.check_manual_listing,
                "SNARE configuration"
            );
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            environment: Environment::from_build(),
        }
    }
}

/// Validate an absolute http(s) URL and drop any trailing slash.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid API base URL: {}", e),
            ErrorContext::new()
                .with_field_path(ENV_API_BASE_URL)
                .with_details(trimmed.to_string())
                .with_source("config_loader"),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("Unsupported URL scheme: {}", parsed.scheme()),
            ErrorContext::new()
                .with_field_path(ENV_API_BASE_URL)
                .with_details("expected http or https")
                .with_source("config_loader"),
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn parse_mode(mode: &str) -> Result<Environment> {
    match mode.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(Error::configuration_with_context(
            format!("Unknown mode: {}", other),
            ErrorContext::new()
                .with_field_path(ENV_MODE)
                .with_details("expected development or production")
                .with_source("config_loader"),
        )),
    }
}
