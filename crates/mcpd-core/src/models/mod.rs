// ABOUTME: Core data models shared between the key store, CLI and routes
// ABOUTME: Currently the persisted API key record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod api_key;

pub use api_key::{ApiKeyRecord, GeneratedKeyResponse};
