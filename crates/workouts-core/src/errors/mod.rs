// ABOUTME: Unified error handling with error codes, context, and JSON-RPC mapping
// ABOUTME: Defines AppError, ErrorCode, and the structured error response format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Unified Error Handling System
//!
//! Centralized error handling for the workouts server. Every fallible operation
//! outside the compiler returns `AppResult<T>`, and the MCP host turns an
//! `AppError` into either a tool error result or a JSON-RPC error object.

/// Tool-specific error types
pub mod tool;

pub use tool::ToolError;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::constants::protocol::{JSONRPC_INTERNAL_ERROR, JSONRPC_INVALID_PARAMS};

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// The provided input is invalid
    InvalidInput = 3000,
    /// A required field is missing
    MissingRequiredField = 3001,
    /// The data format is invalid
    InvalidFormat = 3002,
    /// A value lies outside its acceptable range
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// The requested resource was not found
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Garmin Connect returned an error
    ExternalServiceError = 5000,
    /// Garmin Connect could not be reached
    ExternalServiceUnavailable = 5001,
    /// Garmin Connect rejected the session
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    /// Generic configuration error
    ConfigError = 6000,
    /// Required configuration is missing
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Serialization or deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the JSON-RPC error code used when this error escapes a request
    #[must_use]
    pub const fn jsonrpc_code(&self) -> i32 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::ValueOutOfRange
            | Self::ResourceNotFound => JSONRPC_INVALID_PARAMS,

            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::SerializationError => JSONRPC_INTERNAL_ERROR,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "Garmin Connect encountered an error",
            Self::ExternalServiceUnavailable => "Garmin Connect is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with Garmin Connect failed",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Resource ID if applicable (workout id, tool name)
    pub resource_id: Option<String>,
    /// Structured details (e.g. a compile error with step paths)
    pub details: Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            resource_id: None,
            details: Value::Null,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add structured details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the JSON-RPC error code for this error
    #[must_use]
    pub const fn jsonrpc_code(&self) -> i32 {
        self.code.jsonrpc_code()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Structured error body returned to MCP clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Inner error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Request ID if one was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured details
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}
