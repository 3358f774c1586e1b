//! The review generation endpoint.
//!
//! `GET /api/review` takes the wizard answers as query parameters and
//! returns `{"review": "..."}`. The generator crate is the single source
//! of truth for text synthesis; the client script only displays it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use url::Url;

use revu_sdk::revu_generator::{generate, ReviewInputs};
use revu_sdk::revu_tenant::{SiteVariant, TenantProfile};
use revu_sdk::revu_wizard::{SatisfactionAxis, SliderPosition};

/// Parse the wizard answers from the request query.
///
/// Absent answers fall back to the top slider position and the tenant's
/// configured location, so a hand-written URL still yields a sensible
/// review.
pub fn inputs_from_query(url: &Url, profile: &TenantProfile) -> ReviewInputs {
    let mut inputs = ReviewInputs::default();
    let mut city = String::new();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "service" => inputs.service = value.into_owned(),
            "city" => city = value.into_owned(),
            "professionalism" => inputs.professionalism = value.into_owned(),
            "communication" => inputs.communication = value.into_owned(),
            "timeliness" => inputs.timeliness = value.into_owned(),
            "comments" => inputs.additional_comments = value.into_owned(),
            _ => {}
        }
    }

    if inputs.service.trim().is_empty() {
        inputs.service = "roofing project".to_string();
    }

    // location: the entered city, else the tenant's configured fallback
    inputs.location = if !city.trim().is_empty() {
        city
    } else {
        match profile.variant {
            SiteVariant::Classic => profile.city.clone(),
            SiteVariant::Curated => profile.service_area.clone(),
        }
    };

    let top = SliderPosition::default();
    if inputs.professionalism.is_empty() {
        inputs.professionalism = top
            .label(SatisfactionAxis::Professionalism, profile.variant)
            .to_string();
    }
    if inputs.communication.is_empty() {
        inputs.communication = top
            .label(SatisfactionAxis::Communication, profile.variant)
            .to_string();
    }
    if inputs.timeliness.is_empty() {
        inputs.timeliness = top
            .label(SatisfactionAxis::Timeliness, profile.variant)
            .to_string();
    }

    inputs
}

/// Build the JSON response body for a review request.
pub fn review_response(profile: &TenantProfile, url: &Url) -> String {
    let inputs = inputs_from_query(url, profile);
    let mut rng = request_rng();
    let review = generate(profile.variant, &inputs, &mut rng);
    serde_json::json!({ "review": review }).to_string()
}

/// Fresh per-request RNG; regeneration draws a new combination.
fn request_rng() -> StdRng {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    StdRng::seed_from_u64(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revu_sdk::revu_generator::{classic_closings, classic_intros};
    use revu_sdk::revu_tenant::TenantConfig;

    fn page_url(query: &str) -> Url {
        Url::parse(&format!("https://reviewsite.com/api/review?{}", query)).unwrap()
    }

    #[test]
    fn test_query_parameters_map_to_inputs() {
        let profile = TenantProfile::default();
        let url = page_url(
            "service=roof+repair&city=Dallas&professionalism=Great&communication=Good&timeliness=Quickly&comments=Thanks+Mike",
        );
        let inputs = inputs_from_query(&url, &profile);
        assert_eq!(inputs.service, "roof repair");
        assert_eq!(inputs.location, "Dallas");
        assert_eq!(inputs.professionalism, "Great");
        assert_eq!(inputs.additional_comments, "Thanks Mike");
    }

    #[test]
    fn test_missing_city_falls_back_to_profile() {
        let profile = TenantProfile::default();
        let url = page_url("service=roof+repair");
        let inputs = inputs_from_query(&url, &profile);
        assert_eq!(inputs.location, "Austin");
    }

    #[test]
    fn test_curated_fallback_location_is_service_area() {
        let profile = TenantProfile::merged(&TenantConfig {
            variant: Some(SiteVariant::Curated),
            ..Default::default()
        });
        let url = page_url("service=roof+inspection");
        let inputs = inputs_from_query(&url, &profile);
        assert_eq!(inputs.location, "Texas");
    }

    #[test]
    fn test_missing_labels_default_to_top_position() {
        let profile = TenantProfile::default();
        let inputs = inputs_from_query(&page_url("service=x"), &profile);
        assert_eq!(inputs.professionalism, "Outstanding");
        assert_eq!(inputs.communication, "Crystal Clear");
        assert_eq!(inputs.timeliness, "Record Time");
    }

    #[test]
    fn test_review_response_is_json_with_pool_content() {
        let profile = TenantProfile::default();
        let url = page_url("service=roof+replacement&city=Austin");
        let body = review_response(&profile, &url);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let review = value["review"].as_str().unwrap();

        let inputs = inputs_from_query(&url, &profile);
        assert!(classic_intros(&inputs)
            .iter()
            .any(|i| review.starts_with(i.as_str())));
        assert!(classic_closings(&inputs)
            .iter()
            .any(|c| review.ends_with(c.as_str())));
    }
}
