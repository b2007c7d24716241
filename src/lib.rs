// ABOUTME: Main library entry point for the Garmin workouts MCP server
// ABOUTME: Wires configuration, logging, the Garmin client, MCP tools, and the stdio host
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

#![deny(unsafe_code)]

//! # Garmin Workouts MCP Server
//!
//! A Model Context Protocol (MCP) server that lets an assistant author
//! structured workouts and manage them on Garmin Connect. Workout
//! descriptions are compiled into Garmin's wire format by the
//! `workouts-compiler` crate before they are submitted.
//!
//! ## Architecture
//!
//! - **config**: Environment-based configuration
//! - **logging**: `tracing` setup writing to stderr
//! - **session**: Garmin Connect bearer token resolution
//! - **providers**: `WorkoutService` trait and the Garmin Connect client
//! - **tools**: MCP tool trait, registry, and the workout tools
//! - **mcp**: Protocol schema and the line-delimited stdio server
//! - **jsonrpc**: JSON-RPC 2.0 envelope types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use garmin_workouts_mcp::config::ServerConfig;
//! use garmin_workouts_mcp::mcp::McpServer;
//! use garmin_workouts_mcp::providers::GarminConnectClient;
//! use garmin_workouts_mcp::session::GarminSession;
//! use garmin_workouts_mcp::tools::{ServerResources, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let client = GarminConnectClient::new(&config.garmin, GarminSession::from_env()?)?;
//!
//!     let mut registry = ToolRegistry::new();
//!     registry.register_builtin_tools();
//!
//!     let resources = ServerResources::new(Arc::new(client), config.compiler);
//!     McpServer::new(Arc::new(registry), Arc::new(resources))
//!         .run_stdio()
//!         .await
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// JSON-RPC 2.0 envelope types
pub mod jsonrpc;

/// Structured logging setup
pub mod logging;

/// MCP schema and stdio server
pub mod mcp;

/// Offline compilation for the `--compile` flag
pub mod offline;

/// Garmin Connect workout service
pub mod providers;

/// Garmin Connect session provider
pub mod session;

/// MCP tools
pub mod tools;

pub use workouts_compiler as compiler;
pub use workouts_core::errors;
