// ABOUTME: Garmin Connect session provider resolving the bearer token for API calls
// ABOUTME: Reads the token from the environment and keeps it out of Debug output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use std::env;
use std::fmt;

use workouts_core::errors::{AppError, AppResult, ErrorCode};

/// Environment variable holding the Garmin Connect access token
pub const ACCESS_TOKEN_ENV: &str = "GARMIN_ACCESS_TOKEN";

/// Authenticated Garmin Connect session
#[derive(Clone)]
pub struct GarminSession {
    access_token: String,
}

impl GarminSession {
    /// Create a session from an existing token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Resolve the session from `GARMIN_ACCESS_TOKEN`
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the variable when it is unset or blank
    pub fn from_env() -> AppResult<Self> {
        match env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(AppError::new(
                ErrorCode::ConfigMissing,
                format!("{ACCESS_TOKEN_ENV} must be set to a Garmin Connect access token"),
            )),
        }
    }

    /// Bearer token sent with every request
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for GarminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GarminSession")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
