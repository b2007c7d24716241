// ABOUTME: Common benchmark utilities and fixtures for compiler benchmarks
// ABOUTME: Provides reusable workout description generators for Criterion benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Common benchmark utilities and fixtures.

pub mod fixtures;
