// ABOUTME: Garmin Connect workout-service client built on reqwest
// ABOUTME: Bearer-authenticated JSON calls with status checking and request logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;
use workouts_compiler::WirePayload;
use workouts_core::constants::garmin::{endpoints, SERVICE_NAME};
use workouts_core::errors::{AppError, AppResult, ErrorCode};

use super::core::WorkoutService;
use crate::config::GarminApiConfig;
use crate::logging::AppLogger;
use crate::session::GarminSession;

/// HTTP client for the Garmin Connect workout service
pub struct GarminConnectClient {
    client: Client,
    base_url: Url,
    session: GarminSession,
}

impl GarminConnectClient {
    /// Build a client with the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    pub fn new(config: &GarminApiConfig, session: GarminSession) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::internal(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// Join endpoint segments and an optional workout id onto the base URL.
    ///
    /// Each segment is percent-encoded, so an id cannot leave its endpoint.
    fn url_for(&self, endpoint: &[&str], workout_id: Option<&str>) -> AppResult<Url> {
        if let Some(id) = workout_id {
            if matches!(id, "" | "." | "..") {
                return Err(AppError::invalid_input(format!(
                    "'{id}' is not a valid workout id"
                )));
            }
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::config(format!(
                    "{SERVICE_NAME} base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(endpoint)
            .extend(workout_id);
        Ok(url)
    }

    /// Send one request and decode the body; an empty body decodes to `null`
    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> AppResult<Value> {
        debug!("Starting {SERVICE_NAME} API request: {method} {url}");

        let started = Instant::now();
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(
                "Authorization",
                format!("Bearer {}", self.session.access_token()),
            );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Failed to send request to {SERVICE_NAME} API: {e}"),
            )
            .with_source(e)
        })?;

        let status = response.status();
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_garmin_request(method.as_str(), url.path(), status.as_u16(), elapsed_ms);

        let text = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("Failed to read response body: {e}"))
                .with_source(e)
        })?;

        if !status.is_success() {
            error!("{SERVICE_NAME} API request failed - status: {status}, body: {text}");
            let code = if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                ErrorCode::ExternalAuthFailed
            } else {
                ErrorCode::ExternalServiceError
            };
            return Err(AppError::new(
                code,
                format!("{SERVICE_NAME}: API request failed with status {status}: {text}"),
            )
            .with_details(json!({
                "status": status.as_u16(),
                "body": text,
            })));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(
                SERVICE_NAME,
                format!("Failed to parse {SERVICE_NAME} API response: {e}"),
            )
            .with_source(e)
        })
    }
}

#[async_trait]
impl WorkoutService for GarminConnectClient {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    async fn list_workouts(&self) -> AppResult<Value> {
        self.request(Method::GET, self.url_for(endpoints::LIST_WORKOUTS, None)?, None)
            .await
    }

    async fn get_workout(&self, workout_id: &str) -> AppResult<Value> {
        let url = self.url_for(endpoints::WORKOUT, Some(workout_id))?;
        self.request(Method::GET, url, None)
            .await
    }

    async fn schedule_workout(&self, workout_id: &str, date: NaiveDate) -> AppResult<Value> {
        let body = json!({ "date": date.format("%Y-%m-%d").to_string() });
        let url = self.url_for(endpoints::SCHEDULE, Some(workout_id))?;
        self.request(Method::POST, url, Some(&body))
            .await
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<()> {
        let url = self.url_for(endpoints::WORKOUT, Some(workout_id))?;
        self.request(Method::DELETE, url, None)
            .await
            .map(|_| ())
    }

    async fn create_workout(&self, payload: &WirePayload) -> AppResult<Value> {
        let body = serde_json::to_value(payload)?;
        let url = self.url_for(endpoints::WORKOUT, None)?;
        self.request(Method::POST, url, Some(&body))
            .await
    }
}
