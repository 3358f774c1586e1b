//! Core abstractions for the Revu review micro-site platform.
//!
//! This crate provides the fundamental types shared by the workloads:
//! - `RequestContext` - Typed request parameters
//! - `LifecyclePhase` - Request lifecycle tracking
//! - `WorkloadError` - Error type for workload handlers

mod context;
mod lifecycle;
mod workload;

pub use context::*;
pub use lifecycle::*;
pub use workload::*;
