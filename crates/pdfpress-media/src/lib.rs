//! Ghostscript CLI wrapper for PDF resizing.
//!
//! This crate provides:
//! - Type-safe Ghostscript command building
//! - Precondition validation for conversion requests
//! - An async invoker that streams subprocess output as status events

pub mod command;
pub mod error;
pub mod invoker;

pub use command::{check_ghostscript, GsCommand};
pub use error::{MediaError, MediaResult};
pub use invoker::{validate, GsInvoker, Invoker};
