//! Workload identity and error type.

use serde::{Deserialize, Serialize};

/// Workload manifest - identity for a deployable unit, used in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadManifest {
    /// Unique name for this workload.
    pub name: String,
    /// Semantic version.
    pub version: String,
}

impl WorkloadManifest {
    /// Create a new workload manifest.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Error type for workload operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("Head not sent before sections")]
    HeadNotSent,

    #[error("Streaming error: {0}")]
    StreamError(String),

    #[error("Fetch error: {0}")]
    FetchError(#[from] anyhow::Error),

    #[error("Section '{0}' failed: {1}")]
    SectionFailed(String, String),
}
