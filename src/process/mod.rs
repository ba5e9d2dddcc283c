// ABOUTME: Bounded external command execution used by the console tool
// ABOUTME: Re-exports the runner and its request/result types

/// Process runner
pub mod runner;

pub use runner::{ExecutionRequest, ExecutionResult, ProcessRunner};
