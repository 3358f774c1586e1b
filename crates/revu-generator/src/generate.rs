//! Review assembly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use revu_tenant::SiteVariant;

use crate::pools::{
    classic_bodies, classic_closings, classic_intros, curated_closings, curated_intros,
    curated_lines, BodyAxis,
};

/// Everything a review is a function of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewInputs {
    /// Selected service (free text or category).
    pub service: String,
    /// User-entered city or the tenant's configured service area.
    pub location: String,
    /// Selected satisfaction labels.
    pub professionalism: String,
    pub communication: String,
    pub timeliness: String,
    /// Optional free-text comment, included verbatim when non-empty.
    pub additional_comments: String,
}

/// Synthesize one review paragraph.
///
/// Fixed order: intro, body line(s), comment, closing. Each selection is
/// independent and uniform over its pool; calling again with the same
/// inputs draws a fresh combination.
pub fn generate<R: Rng + ?Sized>(
    variant: SiteVariant,
    inputs: &ReviewInputs,
    rng: &mut R,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);

    match variant {
        SiteVariant::Classic => {
            parts.push(pick(rng, &classic_intros(inputs)));
            parts.push(pick(rng, &classic_bodies(inputs)));
        }
        SiteVariant::Curated => {
            parts.push(pick(rng, &curated_intros(inputs)));
            for axis in BodyAxis::ALL {
                let label = match axis {
                    BodyAxis::Professionalism => &inputs.professionalism,
                    BodyAxis::Communication => &inputs.communication,
                    BodyAxis::Timeliness => &inputs.timeliness,
                };
                parts.push(pick(rng, &curated_lines(axis, label)));
            }
        }
    }

    let extra = inputs.additional_comments.trim();
    if !extra.is_empty() {
        parts.push(extra.to_string());
    }

    parts.push(match variant {
        SiteVariant::Classic => pick(rng, &classic_closings(inputs)),
        SiteVariant::Curated => pick(rng, &curated_closings(inputs)),
    });

    parts.join(" ")
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[String]) -> String {
    pool[rng.random_range(0..pool.len())].clone()
}
