// ABOUTME: Environment configuration management for the Garmin workouts MCP server
// ABOUTME: Parses environment variables into typed Garmin API, compiler, and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Environment-based configuration

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use url::Url;
use workouts_compiler::CompileOptions;
use workouts_core::constants::garmin::DEFAULT_API_BASE_URL;
use workouts_core::constants::limits::{DEFAULT_MAX_STEP_COUNT, DEFAULT_MAX_STEP_DEPTH};
use workouts_core::constants::service_names;

/// Default timeout for Garmin Connect requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Garmin Connect API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarminApiConfig {
    /// Base URL of the Connect API
    pub base_url: Url,
    /// Timeout applied to every request
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl GarminApiConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GarminApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default Garmin base URL is valid")),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Garmin Connect API settings
    pub garmin: GarminApiConfig,
    /// Ceilings applied when compiling workout descriptions
    pub compiler: CompileOptions,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let base_url = env_var_or("GARMIN_API_BASE_URL", DEFAULT_API_BASE_URL);
        let config = Self {
            garmin: GarminApiConfig {
                base_url: Url::parse(&base_url)
                    .with_context(|| format!("Invalid GARMIN_API_BASE_URL value: {base_url}"))?,
                request_timeout_secs: env_var_or(
                    "GARMIN_REQUEST_TIMEOUT_SECS",
                    &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid GARMIN_REQUEST_TIMEOUT_SECS value")?,
                user_agent: env::var("GARMIN_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            },
            compiler: CompileOptions {
                max_depth: env_var_or("WORKOUT_MAX_DEPTH", &DEFAULT_MAX_STEP_DEPTH.to_string())
                    .parse()
                    .context("Invalid WORKOUT_MAX_DEPTH value")?,
                max_steps: env_var_or("WORKOUT_MAX_STEPS", &DEFAULT_MAX_STEP_COUNT.to_string())
                    .parse()
                    .context("Invalid WORKOUT_MAX_STEPS value")?,
            },
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a ceiling or timeout is zero, or the base URL is not HTTP(S)
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.garmin.base_url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "GARMIN_API_BASE_URL must use http or https, got {}",
                self.garmin.base_url.scheme()
            ));
        }
        if self.garmin.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "GARMIN_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }
        if self.compiler.max_depth == 0 || self.compiler.max_steps == 0 {
            return Err(anyhow::anyhow!(
                "WORKOUT_MAX_DEPTH and WORKOUT_MAX_STEPS must be greater than zero"
            ));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Garmin Workouts MCP Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Garmin API: {}\n\
             - Request Timeout: {}s\n\
             - Max Step Depth: {}\n\
             - Max Steps: {}",
            self.environment,
            self.log_level,
            self.garmin.base_url,
            self.garmin.request_timeout_secs,
            self.compiler.max_depth,
            self.compiler.max_steps,
        )
    }
}

fn default_user_agent() -> String {
    format!(
        "{}/{}",
        service_names::GARMIN_WORKOUTS_MCP,
        env!("CARGO_PKG_VERSION")
    )
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
