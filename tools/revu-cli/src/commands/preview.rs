//! Show the page metadata the rewriter derives for a tenant.

use std::fs;

use anyhow::{bail, Context as _, Result};
use url::Url;

use revu_rewrite::PageMeta;
use revu_tenant::{is_valid_key, resolve_tenant, TenantConfig, TENANT_QUERY_PARAM};

use super::PreviewArgs;
use crate::context::Context;

/// Run the preview command.
pub async fn run(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let (key, page_url) = resolve_target(&args, ctx)?;

    let config_path = ctx.configs_dir().join(format!("{}.json", key));
    let config: TenantConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?
    } else {
        ctx.output.warn(&format!(
            "No config file at {}; previewing fallback metadata",
            config_path.display()
        ));
        TenantConfig::default()
    };

    let meta = PageMeta::derive(&config, &page_url, &key);

    if ctx.output.is_json() {
        ctx.output.json(&meta);
        return Ok(());
    }

    ctx.output.header(&format!("Metadata for tenant '{}'", key));
    ctx.output.kv("title", &meta.title);
    ctx.output.kv("description", &meta.description);
    ctx.output.kv("canonical", &meta.canonical_url);
    ctx.output.kv("image", &meta.image_url);

    Ok(())
}

/// Interpret the target as a page URL when it parses as one, else as a
/// tenant key against the configured base URL.
fn resolve_target(args: &PreviewArgs, ctx: &Context) -> Result<(String, Url)> {
    if let Ok(url) = Url::parse(&args.target) {
        let Some(key) = resolve_tenant(&url) else {
            bail!("No tenant resolves from {}", url);
        };
        return Ok((key, url));
    }

    if !is_valid_key(&args.target) {
        bail!("'{}' is neither a URL nor a valid tenant key", args.target);
    }

    let base = args
        .base_url
        .as_deref()
        .unwrap_or(&ctx.config.site.base_url);
    let mut url = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    url.query_pairs_mut()
        .clear()
        .append_pair(TENANT_QUERY_PARAM, &args.target);

    Ok((args.target.clone(), url))
}
