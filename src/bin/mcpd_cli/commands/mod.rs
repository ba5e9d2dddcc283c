// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for mcpd-cli
// ABOUTME: Provides access to key store commands

pub mod keys;
