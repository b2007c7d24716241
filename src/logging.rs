// ABOUTME: Logging configuration and structured logging setup for the workout MCP server
// ABOUTME: Writes to stderr so stdout stays reserved for the JSON-RPC stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Structured logging with `tracing`

use std::env;
use std::fmt;
use std::io;

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use workouts_core::constants::service_names;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a format name, defaulting to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::GARMIN_WORKOUTS_MCP.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::GARMIN_WORKOUTS_MCP.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Override the output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Build the filter, always quieting HTTP client internals
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |directive| EnvFilter::new(&directive),
        );

        base.add_directive(
            "hyper=warn"
                .parse()
                .unwrap_or_else(|_| Level::WARN.into()),
        )
        .add_directive(
            "reqwest=warn"
                .parse()
                .unwrap_or_else(|_| Level::WARN.into()),
        )
        .add_directive(
            "rustls=warn"
                .parse()
                .unwrap_or_else(|_| Level::WARN.into()),
        )
        .add_directive(
            format!("garmin_workouts_mcp={}", self.level)
                .parse()
                .unwrap_or_else(|_| Level::INFO.into()),
        )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = tracing_fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events())
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = tracing_fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events());
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = tracing_fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = %self.format,
            "Garmin workouts MCP server starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": self.format.to_string(),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });
        info!("Logging configured: {}", config_summary);
    }
}

/// Structured events emitted by the tool layer
pub struct AppLogger;

impl AppLogger {
    /// Log the outcome of an MCP tool call
    pub fn log_mcp_tool_call(tool_name: &str, success: bool, duration_ms: u64) {
        info!(
            mcp.tool = %tool_name,
            mcp.success = %success,
            mcp.duration_ms = %duration_ms,
            "MCP tool call"
        );
    }

    /// Log a request to Garmin Connect
    pub fn log_garmin_request(method: &str, path: &str, status: u16, duration_ms: u64) {
        info!(
            http.method = %method,
            http.path = %path,
            http.status = %status,
            http.duration_ms = %duration_ms,
            "Garmin Connect request"
        );
    }

    /// Log a rejected workout description
    pub fn log_compile_failure(kind: &str, details: &str) {
        warn!(
            compile.kind = %kind,
            compile.details = %details,
            "Workout description rejected"
        );
    }
}
