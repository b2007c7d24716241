// ABOUTME: Criterion benchmarks for the workout payload compiler
// ABOUTME: Measures validation, flattening, and full compilation across plan sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Criterion benchmarks for the workout payload compiler.
//!
//! Compares the planning stages alone against full payload assembly and
//! serialization, for flat sessions of growing size and for deep nesting.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

mod common;

use common::fixtures::{interval_session, nested_session, PlanSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use workouts_compiler::Compiler;

fn bench_compile_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_session");
    let compiler = Compiler::new();

    for size in [PlanSize::Small, PlanSize::Medium, PlanSize::Large] {
        let description = interval_session(size);
        group.throughput(Throughput::Elements(size.blocks() as u64));

        group.bench_with_input(
            BenchmarkId::new("plan", size.label()),
            &description,
            |b, description| b.iter(|| compiler.plan(black_box(description)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("compile", size.label()),
            &description,
            |b, description| b.iter(|| compiler.compile(black_box(description)).unwrap()),
        );
    }

    group.finish();
}

fn bench_compile_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_nested");
    let compiler = Compiler::new();

    for depth in [2, 8, 16] {
        let description = nested_session(depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &description,
            |b, description| b.iter(|| compiler.compile(black_box(description)).unwrap()),
        );
    }

    group.finish();
}

fn bench_payload_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_payload");
    let payload = Compiler::new()
        .compile(&interval_session(PlanSize::Large))
        .unwrap();
    let serialized = serde_json::to_string(&payload).unwrap();

    group.throughput(Throughput::Bytes(serialized.len() as u64));
    group.bench_function("large", |b| {
        b.iter(|| serde_json::to_string(black_box(&payload)).unwrap());
    });

    group.finish();
}

fn bench_rejected_description(c: &mut Criterion) {
    let compiler = Compiler::new();
    let mut description = interval_session(PlanSize::Medium);
    description["steps"][1]["steps"][0]["stepDistance"] = 0.into();
    description["steps"][2]["numberOfIterations"] = 0.into();

    c.bench_function("compile_rejected_medium", |b| {
        b.iter(|| compiler.compile(black_box(&description)).unwrap_err());
    });
}

criterion_group!(
    benches,
    bench_compile_sizes,
    bench_compile_nested,
    bench_payload_serialization,
    bench_rejected_description
);
criterion_main!(benches);
