//! Synthesize sample reviews from the command line.

use std::fs;

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use revu_generator::{generate, ReviewInputs};
use revu_tenant::{SiteVariant, TenantConfig, TenantProfile};
use revu_wizard::{SatisfactionAxis, SliderPosition};

use super::GenerateArgs;
use crate::context::Context;

#[derive(Serialize)]
struct GenerateOutput {
    variant: String,
    inputs: ReviewInputs,
    reviews: Vec<String>,
}

/// Run the generate command.
pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let profile = load_profile(&args, ctx)?;
    let variant = match args.variant.as_deref() {
        Some("classic") => SiteVariant::Classic,
        Some("curated") => SiteVariant::Curated,
        Some(other) => bail!("Unknown variant '{}': expected classic or curated", other),
        None => profile.variant,
    };

    let inputs = build_inputs(&args, &profile, variant)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let reviews: Vec<String> = (0..args.count.max(1))
        .map(|_| generate(variant, &inputs, &mut rng))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&GenerateOutput {
            variant: variant.as_str().to_string(),
            inputs,
            reviews,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "Sample review{} ({} variant)",
        if reviews.len() > 1 { "s" } else { "" },
        variant.as_str()
    ));
    for review in &reviews {
        ctx.output.list_item(review);
    }

    Ok(())
}

/// Load the tenant profile backing the generation, from the local
/// configs directory when a tenant is named.
fn load_profile(args: &GenerateArgs, ctx: &Context) -> Result<TenantProfile> {
    let Some(tenant) = &args.tenant else {
        return Ok(TenantProfile::default());
    };

    let path = ctx.configs_dir().join(format!("{}.json", tenant));
    if !path.exists() {
        bail!("No config file for tenant '{}' at {}", tenant, path.display());
    }
    let content = fs::read_to_string(&path)?;
    let config: TenantConfig = serde_json::from_str(&content)?;
    Ok(TenantProfile::merged(&config))
}

fn build_inputs(
    args: &GenerateArgs,
    profile: &TenantProfile,
    variant: SiteVariant,
) -> Result<ReviewInputs> {
    let location = match &args.city {
        Some(city) if !city.trim().is_empty() => city.clone(),
        _ => match variant {
            SiteVariant::Classic => profile.city.clone(),
            SiteVariant::Curated => profile.service_area.clone(),
        },
    };

    Ok(ReviewInputs {
        service: args.service.clone(),
        location,
        professionalism: label_for(args.professionalism, SatisfactionAxis::Professionalism, variant)?,
        communication: label_for(args.communication, SatisfactionAxis::Communication, variant)?,
        timeliness: label_for(args.timeliness, SatisfactionAxis::Timeliness, variant)?,
        additional_comments: args.comments.clone(),
    })
}

fn label_for(index: u8, axis: SatisfactionAxis, variant: SiteVariant) -> Result<String> {
    let Some(position) = SliderPosition::from_index(index) else {
        bail!("{} must be 1-3, got {}", axis.as_str(), index);
    };
    Ok(position.label(axis, variant).to_string())
}
