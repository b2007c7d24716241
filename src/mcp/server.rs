// ABOUTME: MCP server dispatching JSON-RPC requests to the tool registry
// ABOUTME: Line-delimited stdio transport generic over any async reader and writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # MCP Server
//!
//! One JSON-RPC message per line on the input stream, one response per line
//! on the output stream. Notifications never get a response. Requests are
//! handled in arrival order.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use workouts_core::constants::protocol::{
    methods, JSONRPC_INTERNAL_ERROR, JSONRPC_INVALID_PARAMS, JSONRPC_INVALID_REQUEST,
    JSONRPC_METHOD_NOT_FOUND, JSONRPC_PARSE_ERROR, JSONRPC_VERSION,
};
use workouts_core::errors::ErrorResponse;

use super::schema::{InitializeResponse, ToolCall};
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::tools::{ServerResources, ToolExecutionContext, ToolRegistry, ToolResult};

/// MCP server bound to a tool registry and shared resources
#[derive(Debug, Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    resources: Arc<ServerResources>,
}

impl McpServer {
    /// Create a server
    #[must_use]
    pub const fn new(registry: Arc<ToolRegistry>, resources: Arc<ServerResources>) -> Self {
        Self {
            registry,
            resources,
        }
    }

    /// Registered tools
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one decoded request; `None` for notifications
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.is_notification();
        let id = request.id.clone();

        if request.jsonrpc != JSONRPC_VERSION {
            return (!is_notification).then(|| {
                JsonRpcResponse::error(
                    id,
                    JSONRPC_INVALID_REQUEST,
                    format!("Unsupported JSON-RPC version: {}", request.jsonrpc),
                )
            });
        }

        debug!("Handling MCP request: {}", request.method);
        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                info!("MCP client initializing");
                Self::serialized(id, &InitializeResponse::default())
            }
            methods::INITIALIZED => {
                debug!("MCP client initialized");
                return None;
            }
            methods::PING => JsonRpcResponse::success(id, json!({})),
            methods::TOOLS_LIST => {
                JsonRpcResponse::success(id, json!({ "tools": self.registry.list_schemas() }))
            }
            methods::TOOLS_CALL => self.handle_tools_call(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                JSONRPC_METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };

        (!is_notification).then_some(response)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let call = match params.map(serde_json::from_value::<ToolCall>) {
            Some(Ok(call)) => call,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JSONRPC_INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JSONRPC_INVALID_PARAMS,
                    "tools/call requires params",
                );
            }
        };

        let mut context = ToolExecutionContext::new(Arc::clone(&self.resources));
        if let Some(request_id) = id.as_ref().map(render_request_id) {
            context = context.with_request_id(request_id);
        }

        let arguments = call.arguments.unwrap_or_else(|| json!({}));
        match self.registry.execute(&call.name, arguments, &context).await {
            Ok(result) => Self::serialized(id, &result.into_response()),
            Err(e) if !self.registry.contains(&call.name) => {
                warn!("Unknown tool requested: {}", call.name);
                JsonRpcResponse::from_app_error(id, &e)
            }
            Err(e) => {
                warn!("Tool '{}' failed: {}", call.name, e);
                match serde_json::to_value(ErrorResponse::from(e)) {
                    Ok(body) => Self::serialized(id, &ToolResult::error(body).into_response()),
                    Err(e) => JsonRpcResponse::error(
                        id,
                        JSONRPC_INTERNAL_ERROR,
                        format!("Failed to serialize tool error: {e}"),
                    ),
                }
            }
        }
    }

    fn serialized<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                JsonRpcResponse::error(
                    id,
                    JSONRPC_INTERNAL_ERROR,
                    format!("Failed to serialize response: {e}"),
                )
            }
        }
    }

    /// Handle one raw line from the transport
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    JSONRPC_PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JSONRPC_INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Serve line-delimited JSON-RPC until the reader reaches end of input
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the transport fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from transport")?
        {
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(trimmed_line).await {
                let response_str = serde_json::to_string(&response)
                    .context("Failed to serialize response")?;
                writer
                    .write_all(response_str.as_bytes())
                    .await
                    .context("Failed to write response")?;
                writer
                    .write_all(b"\n")
                    .await
                    .context("Failed to write newline")?;
                writer.flush().await.context("Failed to flush transport")?;
            }
        }

        Ok(())
    }

    /// Run the server over stdin/stdout
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout fails
    pub async fn run_stdio(&self) -> Result<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(io::stdin()), io::stdout()).await?;
        info!("MCP stdio transport ended");
        Ok(())
    }
}

fn render_request_id(id: &Value) -> String {
    match id {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}
