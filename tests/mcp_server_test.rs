// ABOUTME: Integration tests for the MCP stdio host
// ABOUTME: Drives JSON-RPC lines through the server with in-memory streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{easy_run, mcp_server, RecordingWorkoutService};
use garmin_workouts_mcp::jsonrpc::JsonRpcRequest;
use serde_json::{json, Value};
use tokio::io::BufReader;

async fn round_trip(input: &str) -> Vec<Value> {
    let server = mcp_server(Arc::new(RecordingWorkoutService::default()));
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_initialize_advertises_tools() {
    let responses = round_trip(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18","capabilities":{},"clientInfo":{"name":"test","version":"1"}}}"#,
    )
    .await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(result["protocolVersion"], "2025-06-18");
    assert_eq!(result["serverInfo"]["name"], "garmin-workouts-mcp");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    assert!(result["instructions"]
        .as_str()
        .unwrap()
        .contains("upload_workout"));
}

#[tokio::test]
async fn test_initialized_notification_gets_no_response() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#,
        "\n"
    );
    let responses = round_trip(input).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], "p");
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_tools_list_returns_sorted_schemas() {
    let responses = round_trip(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "delete_workout",
            "generate_workout_data_prompt",
            "get_workout",
            "list_workouts",
            "schedule_workout",
            "upload_workout",
        ]
    );
    let schedule = &tools[4];
    assert_eq!(schedule["inputSchema"]["type"], "object");
    assert_eq!(
        schedule["inputSchema"]["properties"]["date"]["type"],
        "string"
    );
}

#[tokio::test]
async fn test_tools_call_success_has_text_and_structured_content() {
    let service = Arc::new(RecordingWorkoutService::default());
    let server = mcp_server(Arc::clone(&service));
    let request = JsonRpcRequest::with_id(
        "tools/call",
        Some(json!({"name": "upload_workout", "arguments": {"workout_data": easy_run()}})),
        json!(3),
    );

    let response = server.handle_request(request).await.unwrap();

    assert!(response.is_success());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], false);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], r#"{"workoutId":"123456"}"#);
    assert_eq!(result["structuredContent"]["workoutId"], "123456");
    assert_eq!(service.calls().len(), 1);
}

#[tokio::test]
async fn test_tools_call_compile_failure_is_tool_error() {
    let server = mcp_server(Arc::new(RecordingWorkoutService::default()));
    let request = JsonRpcRequest::with_id(
        "tools/call",
        Some(json!({
            "name": "upload_workout",
            "arguments": {"workout_data": {"name": "Broken", "type": "running", "steps": []}}
        })),
        json!(4),
    );

    let response = server.handle_request(request).await.unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    let error = &result["structuredContent"]["error"];
    assert_eq!(error["code"], "INVALID_INPUT");
    assert_eq!(error["request_id"], "4");
    assert_eq!(error["details"]["kind"], "validation");
    assert_eq!(error["details"]["violations"][0]["rule"], "empty_steps");
}

#[tokio::test]
async fn test_tools_call_unknown_tool_is_protocol_error() {
    let responses = round_trip(
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
    )
    .await;

    let error = &responses[0]["error"];
    assert_eq!(error["code"], -32602);
    assert!(error["message"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_tools_call_without_params_is_invalid_params() {
    let responses = round_trip(r#"{"jsonrpc":"2.0","id":6,"method":"tools/call"}"#).await;
    assert_eq!(responses[0]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let responses =
        round_trip(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#).await;

    assert_eq!(responses[0]["id"], 7);
    assert_eq!(responses[0]["error"]["code"], -32601);
}

#[tokio::test]
async fn test_malformed_line_is_parse_error_and_stream_continues() {
    let input = concat!(
        "{not json\n",
        r#"{"jsonrpc":"2.0","id":8,"method":"ping"}"#,
        "\n"
    );
    let responses = round_trip(input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 8);
}

#[tokio::test]
async fn test_non_request_object_is_invalid_request() {
    let responses = round_trip(r#"{"jsonrpc":"2.0","id":9}"#).await;

    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["id"], 9);
}

#[tokio::test]
async fn test_wrong_jsonrpc_version_is_invalid_request() {
    let responses = round_trip(r#"{"jsonrpc":"1.0","id":10,"method":"ping"}"#).await;
    assert_eq!(responses[0]["error"]["code"], -32600);
}
