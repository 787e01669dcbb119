//! Single-flight conversion runner.
//!
//! This crate provides:
//! - The [`StatusSink`] trait implemented by the embedding UI layer
//! - [`SingleFlightRunner`], which guarantees at most one conversion runs
//!   at a time and forwards status events without blocking the caller
//! - Env-driven [`RunnerConfig`]

pub mod config;
pub mod runner;
pub mod sink;

pub use config::RunnerConfig;
pub use runner::{SingleFlightRunner, ALREADY_RUNNING};
pub use sink::StatusSink;
