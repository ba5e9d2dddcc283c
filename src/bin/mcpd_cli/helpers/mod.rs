// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for mcpd-cli
// ABOUTME: Output formatting shared by the commands

pub mod display;
