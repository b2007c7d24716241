// ABOUTME: Garmin workouts MCP server binary speaking JSON-RPC over stdio
// ABOUTME: Also compiles a workout description file offline with --compile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Garmin Workouts MCP Server Binary
//!
//! Without arguments the binary serves MCP over stdin/stdout using the
//! Garmin Connect token from `GARMIN_ACCESS_TOKEN`. With `--compile <PATH>`
//! it compiles the description in `PATH` and prints the Garmin payload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use garmin_workouts_mcp::config::ServerConfig;
use garmin_workouts_mcp::logging::{LogFormat, LoggingConfig};
use garmin_workouts_mcp::mcp::McpServer;
use garmin_workouts_mcp::offline;
use garmin_workouts_mcp::providers::GarminConnectClient;
use garmin_workouts_mcp::session::GarminSession;
use garmin_workouts_mcp::tools::{ServerResources, ToolRegistry};
use tracing::{error, info};
use workouts_compiler::Compiler;

#[derive(Parser)]
#[command(name = "garmin-workouts-mcp")]
#[command(about = "MCP server for authoring and managing Garmin Connect workouts")]
pub struct Args {
    /// Compile a workout description file and print the Garmin payload instead of serving
    #[arg(long, value_name = "PATH")]
    compile: Option<PathBuf>,

    /// Log output format: json, pretty, or compact (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging_config = LoggingConfig::from_env();
    if let Some(format) = args.log_format.as_deref() {
        logging_config = logging_config.with_format(LogFormat::from_str_or_default(format));
    }
    logging_config.init()?;

    let config = ServerConfig::from_env()?;
    info!("{}", config.summary());

    if let Some(path) = args.compile {
        return compile_file(&path, &Compiler::with_options(config.compiler)).await;
    }

    let session = GarminSession::from_env()?;
    let client = GarminConnectClient::new(&config.garmin, session)?;

    let mut registry = ToolRegistry::new();
    registry.register_builtin_tools();

    let resources = ServerResources::new(Arc::new(client), config.compiler);
    let server = McpServer::new(Arc::new(registry), Arc::new(resources));

    info!("Starting Garmin workouts MCP server on stdio");
    if let Err(e) = server.run_stdio().await {
        error!("MCP server stopped with error: {e:#}");
        return Err(e);
    }
    Ok(())
}

async fn compile_file(path: &Path, compiler: &Compiler) -> Result<()> {
    let description = offline::read_description(path).await?;

    match offline::compile_description(compiler, &description) {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e)?);
            Err(anyhow::anyhow!("Failed to compile {}: {e}", path.display()))
        }
    }
}
