//! Scaffold a new tenant config file.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::{Input, Select};

use revu_tenant::{is_valid_key, SiteVariant, TenantConfig};

use super::InitArgs;
use crate::context::Context;

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    if !is_valid_key(&args.key) {
        bail!(
            "'{}' is not a valid tenant key (letters, digits, '-' and '_' only)",
            args.key
        );
    }

    let configs_dir = ctx.configs_dir();
    let config_path = configs_dir.join(format!("{}.json", args.key));

    if config_path.exists() && !args.force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = if args.yes {
        TenantConfig::default()
    } else {
        prompt_config(&args.key)?
    };

    fs::create_dir_all(&configs_dir)?;
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    ctx.output.info(&format!(
        "Serve it at {}/?config={}",
        ctx.config.site.base_url.trim_end_matches('/'),
        args.key
    ));

    Ok(())
}

fn prompt_config(key: &str) -> Result<TenantConfig> {
    let company_name: String = Input::new()
        .with_prompt("Company name")
        .default(key.to_string())
        .interact_text()?;

    let name: String = Input::new()
        .with_prompt("Operator name (optional)")
        .allow_empty(true)
        .interact_text()?;

    let city: String = Input::new()
        .with_prompt("City (optional)")
        .allow_empty(true)
        .interact_text()?;

    let service_area: String = Input::new()
        .with_prompt("Service area (optional)")
        .allow_empty(true)
        .interact_text()?;

    let google_review_link: String = Input::new()
        .with_prompt("Google review link (optional)")
        .allow_empty(true)
        .interact_text()?;

    let variant_idx = Select::new()
        .with_prompt("Behavior variant")
        .items(&["classic", "curated"])
        .default(0)
        .interact()?;

    Ok(TenantConfig {
        name: non_empty(name),
        company_name: non_empty(company_name),
        city: non_empty(city),
        service_area: non_empty(service_area),
        google_review_link: non_empty(google_review_link),
        variant: Some(if variant_idx == 1 {
            SiteVariant::Curated
        } else {
            SiteVariant::Classic
        }),
    })
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
