//! Tenant configuration for the Revu review micro-site.
//!
//! A tenant is one branded client site instance, identified by a config
//! key derived from a query parameter or subdomain. This crate provides:
//! - `TenantConfig` - the `configs/<key>.json` file contract
//! - `TenantProfile` - config merged over built-in defaults
//! - tenant key resolution (query param > subdomain > default)
//! - `ConfigClient` / `ConfigSource` - the outbound config fetch seam

mod config;
mod fetch;
mod resolve;

pub use config::*;
pub use fetch::*;
pub use resolve::*;
