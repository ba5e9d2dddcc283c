// ABOUTME: Criterion benchmarks for the request hot path
// ABOUTME: Measures key hashing, key store lookups, argument validation and dispatch overhead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the gateway hot path.
//!
//! Every authenticated tool call hashes a key, looks it up, validates the
//! arguments against a compiled schema and goes through the dispatcher.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcpd::api_keys::ApiKeyManager;
use mcpd::config::{DatabaseUrl, ServerConfig};
use mcpd::key_store::KeyStore;
use mcpd::tools::{Dispatcher, ToolExecutionContext, ToolRegistry};
use serde_json::json;
use tokio::runtime::Runtime;

/// Benchmark key minting and digesting
fn bench_key_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("api_keys");
    let manager = ApiKeyManager::default();
    let key = manager.generate_api_key().full_key.into_inner();

    group.bench_function("hash_key", |b| {
        b.iter(|| ApiKeyManager::hash_key(black_box(&key)));
    });
    group.bench_function("generate_api_key", |b| {
        b.iter(|| manager.generate_api_key());
    });

    group.finish();
}

/// Benchmark key store lookups against a populated in-memory store
fn bench_key_store(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("key_store");

    let store = rt
        .block_on(KeyStore::open(&DatabaseUrl::Memory, ApiKeyManager::default()))
        .unwrap();
    let keys: Vec<String> = rt.block_on(async {
        let mut keys = Vec::new();
        for _ in 0..100 {
            keys.push(store.generate().await.unwrap().into_inner());
        }
        keys
    });

    group.bench_function("contains_hit", |b| {
        let mut index = 0;
        b.iter(|| {
            let key = &keys[index % keys.len()];
            index += 1;
            rt.block_on(async { store.contains(black_box(key)).await })
        });
    });

    // A miss falls through to the database
    group.bench_function("contains_miss", |b| {
        b.iter(|| rt.block_on(async { store.contains(black_box("mcpd_unknown")).await }));
    });

    group.finish();
}

/// Benchmark schema validation of console arguments
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("argument_validation");
    let registry = ToolRegistry::with_builtin_tools(&ServerConfig::default()).unwrap();
    let validator = registry.get("console").unwrap().validator();

    let valid = json!({"command": "echo hello", "timeout": 5, "working_directory": "/tmp"});
    let invalid = json!({"timeout": -1, "extra": true});

    group.bench_function("valid", |b| {
        b.iter(|| validator.validate(black_box(&valid)));
    });
    group.bench_function("invalid", |b| {
        b.iter(|| validator.validate(black_box(&invalid)));
    });

    group.finish();
}

/// Benchmark dispatcher overhead around a cheap tool
fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("dispatch");
    let registry = ToolRegistry::with_builtin_tools(&ServerConfig::default()).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));
    let context = ToolExecutionContext::new("req_bench");

    for info_type in ["time", "process"] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("system_info", info_type),
            &info_type,
            |b, &info_type| {
                b.iter(|| {
                    rt.block_on(dispatcher.call(
                        "system_info",
                        json!({ "info_type": info_type }),
                        black_box(&context),
                    ))
                });
            },
        );
    }

    group.bench_function("not_found", |b| {
        b.iter(|| rt.block_on(dispatcher.call("ghost", json!({}), black_box(&context))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_key_hashing,
    bench_key_store,
    bench_validation,
    bench_dispatch
);
criterion_main!(benches);
