//! Revu CLI - Command line tool for the review micro-site platform.
//!
//! Commands:
//! - `revu init` - Scaffold a new tenant config
//! - `revu validate` - Validate every tenant config in a directory
//! - `revu preview` - Show the metadata the rewriter derives for a tenant
//! - `revu generate` - Synthesize a sample review

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{GenerateArgs, InitArgs, PreviewArgs, ValidateArgs};

/// Revu CLI - Author and check tenant configs for review micro-sites
#[derive(Parser)]
#[command(name = "revu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new tenant config file
    Init(InitArgs),

    /// Validate tenant config files
    Validate(ValidateArgs),

    /// Show the page metadata derived for a tenant
    Preview(PreviewArgs),

    /// Synthesize a sample review
    Generate(GenerateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
        Commands::Preview(args) => commands::preview::run(args, &ctx).await,
        Commands::Generate(args) => commands::generate::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
