//! Observability infrastructure for the Revu platform.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context

mod logging;

pub use logging::*;

// Re-export RequestId and TimingContext from revu-core for convenience
pub use revu_core::{RequestId, TimingContext};
