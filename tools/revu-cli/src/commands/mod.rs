//! CLI command implementations.

pub mod generate;
pub mod init;
pub mod preview;
pub mod validate;

use clap::Args;

/// Arguments for `revu init`.
#[derive(Args)]
pub struct InitArgs {
    /// Tenant key (becomes `<key>.json` in the configs directory).
    pub key: String,

    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,

    /// Accept defaults instead of prompting.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `revu validate`.
#[derive(Args)]
pub struct ValidateArgs {
    /// Configs directory (defaults to the configured one).
    pub path: Option<String>,
}

/// Arguments for `revu preview`.
#[derive(Args)]
pub struct PreviewArgs {
    /// Tenant key, or a full page URL to resolve the tenant from.
    pub target: String,

    /// Page URL to derive the canonical metadata against
    /// (defaults to the configured site base URL).
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Arguments for `revu generate`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Service the review is about.
    #[arg(long, default_value = "roof replacement")]
    pub service: String,

    /// City; defaults to the tenant's configured location.
    #[arg(long)]
    pub city: Option<String>,

    /// Slider positions, 1-3.
    #[arg(long, default_value_t = 3)]
    pub professionalism: u8,
    #[arg(long, default_value_t = 3)]
    pub communication: u8,
    #[arg(long, default_value_t = 3)]
    pub timeliness: u8,

    /// Optional free-text comment.
    #[arg(long, default_value = "")]
    pub comments: String,

    /// Tenant key: read variant and location from its config file.
    #[arg(long)]
    pub tenant: Option<String>,

    /// Behavior variant override: classic or curated.
    #[arg(long)]
    pub variant: Option<String>,

    /// RNG seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of reviews to generate.
    #[arg(long, default_value_t = 1)]
    pub count: u32,
}
