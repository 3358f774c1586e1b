//! Public SDK for the Revu review micro-site platform.
//!
//! This crate re-exports all platform functionality:
//!
//! ```ignore
//! use revu_sdk::prelude::*;
//!
//! async fn handle(ctx: RequestContext, sink: StreamingSink) -> Result<()> {
//!     let logger = StructuredLogger::new(ctx.request_id.clone());
//!     let key = resolve_tenant_or_default(&page_url);
//!
//!     let config = ConfigClient::new(SpinConfigSource)
//!         .fetch_config(&config_url(&page_url, &key)?.to_string())
//!         .await
//!         .unwrap_or_default();
//!
//!     sink.send_head(&shell.render_opening()).await?;
//!     Ok(())
//! }
//! ```

pub use revu_core;
pub use revu_generator;
pub use revu_observability;
pub use revu_rewrite;
pub use revu_streaming;
pub use revu_tenant;
pub use revu_wizard;

/// Prelude for convenient imports.
pub mod prelude {
    pub use revu_core::*;
    pub use revu_generator::*;
    pub use revu_observability::*;
    pub use revu_rewrite::*;
    pub use revu_streaming::*;
    pub use revu_tenant::*;
    pub use revu_wizard::*;
}
