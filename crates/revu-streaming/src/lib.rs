//! Streaming primitives for head-first page delivery.
//!
//! This crate enforces head-first streaming patterns:
//! - `StreamingSink` - Platform-controlled streaming
//! - `PageShell` - Page shell template abstraction
//! - `HeadContent` - Title and social metadata for the shell head

mod shell;
mod sink;

pub use shell::*;
pub use sink::*;
