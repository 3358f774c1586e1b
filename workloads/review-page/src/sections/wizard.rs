//! Wizard markup: progress indicator and the four step sections.

use revu_sdk::revu_tenant::{SiteVariant, TenantProfile};
use revu_sdk::revu_wizard::{
    axis_labels, SatisfactionAxis, StepMarker, WizardFlow, WizardStep,
};

use super::html_escape;

/// Service options offered on step 1: (icon, value, label).
pub const SERVICE_OPTIONS: &[(&str, &str, &str)] = &[
    ("🏠", "roof replacement", "Roof Replacement"),
    ("🔧", "roof repair", "Roof Repair"),
    ("🆕", "new roof installation", "New Installation"),
    ("🔍", "roof inspection", "Inspection"),
];

/// Render the whole wizard: progress indicator plus all four steps,
/// with the flow's current step marked active.
pub fn render_wizard(flow: &WizardFlow, profile: &TenantProfile) -> String {
    format!(
        r#"<section id="review-engine" class="review-engine" data-section="wizard">
{}
{}
{}
{}
{}
</section>"#,
        render_progress(flow),
        render_step_service(flow),
        render_step_ratings(flow),
        render_step_comments(flow),
        render_step_review(flow, profile),
    )
}

/// Progress bar and step-indicator dots.
pub fn render_progress(flow: &WizardFlow) -> String {
    let dots: String = flow
        .markers()
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let class = match marker {
                StepMarker::Active => "step-dot active",
                StepMarker::Completed => "step-dot completed",
                StepMarker::Upcoming => "step-dot",
            };
            format!(r#"<span class="{}" data-dot="{}"></span>"#, class, i + 1)
        })
        .collect();

    format!(
        r#"<div class="wizard-progress">
    <div class="progress-track"><div class="progress-bar" id="progressBar" style="width: {}%"></div></div>
    <div class="step-dots">{}</div>
</div>"#,
        flow.progress_percent(),
        dots
    )
}

fn step_section(flow: &WizardFlow, step: WizardStep, inner: &str) -> String {
    let class = if flow.step == step {
        "wizard-step active"
    } else {
        "wizard-step"
    };
    format!(
        r#"<div class="{}" data-step="{}">
{}
</div>"#,
        class,
        step.number(),
        inner
    )
}

/// Step 1: service selection and city.
pub fn render_step_service(flow: &WizardFlow) -> String {
    let options: String = SERVICE_OPTIONS
        .iter()
        .map(|(icon, value, label)| {
            format!(
                r#"        <button class="shape-option" data-group="service" data-value="{}"><span class="option-icon">{}</span>{}</button>"#,
                value, icon, label
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let inner = format!(
        r#"    <h2>What did we do for you?</h2>
    <div class="shape-grid">
{}
    </div>
    <div class="city-row">
        <label for="cityInput">Your city</label>
        <input type="text" id="cityInput" value="{}" placeholder="e.g. Austin">
        <span id="cityBadge" class="city-badge hidden"></span>
        <button id="confirmCityBtn" class="confirm-city-btn">Confirm</button>
    </div>
    <div class="step-nav">
        <button class="next-btn">Next</button>
    </div>"#,
        options,
        html_escape(&flow.city)
    );

    step_section(flow, WizardStep::Service, &inner)
}

/// Step 2: the three satisfaction sliders.
pub fn render_step_ratings(flow: &WizardFlow) -> String {
    let sliders: String = SatisfactionAxis::ALL
        .iter()
        .map(|&axis| render_slider(flow, axis))
        .collect::<Vec<_>>()
        .join("\n");

    let inner = format!(
        r#"    <h2>How did we do?</h2>
{}
    <div class="step-nav">
        <button class="prev-btn">Back</button>
        <button class="next-btn">Next</button>
    </div>"#,
        sliders
    );

    step_section(flow, WizardStep::Ratings, &inner)
}

fn render_slider(flow: &WizardFlow, axis: SatisfactionAxis) -> String {
    let position = flow.position(axis);
    let label_row = if flow.variant == SiteVariant::Curated {
        let labels: String = axis_labels(axis, flow.variant)
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let class = if i + 1 == position.index() as usize {
                    "slider-label highlighted"
                } else {
                    "slider-label"
                };
                format!(
                    r#"<span class="{}" data-axis="{}" data-index="{}">{}</span>"#,
                    class,
                    axis.as_str(),
                    i + 1,
                    label
                )
            })
            .collect();
        format!(
            "\n        <div class=\"slider-labels\" data-axis=\"{}\">{}</div>",
            axis.as_str(),
            labels
        )
    } else {
        String::new()
    };

    format!(
        r#"    <div class="slider-group" data-axis="{axis}">
        <div class="slider-head">
            <span class="slider-title">{title}</span>
            <span class="slider-display" id="{axis}Display">{label}</span>
        </div>
        <input type="range" id="{axis}Slider" min="1" max="3" step="1" value="{value}"
               style="--range-percent: {fill}%">{label_row}
    </div>"#,
        axis = axis.as_str(),
        title = slider_title(axis),
        label = flow.label(axis),
        value = position.index(),
        fill = position.fill_percent(),
        label_row = label_row,
    )
}

fn slider_title(axis: SatisfactionAxis) -> &'static str {
    match axis {
        SatisfactionAxis::Professionalism => "Professionalism",
        SatisfactionAxis::Communication => "Communication",
        SatisfactionAxis::Timeliness => "Timeliness",
    }
}

/// Step 3: optional free-text comments.
pub fn render_step_comments(flow: &WizardFlow) -> String {
    let inner = r#"    <h2>Anything else to add?</h2>
    <textarea id="additionalComments" rows="4"
              placeholder="Optional: a detail worth mentioning, a name to thank..."></textarea>
    <div class="step-nav">
        <button class="prev-btn">Back</button>
        <button class="next-btn">Next</button>
    </div>"#;

    step_section(flow, WizardStep::Comments, inner)
}

/// Step 4: the generated review, copy action and the outbound link.
pub fn render_step_review(flow: &WizardFlow, profile: &TenantProfile) -> String {
    let inner = format!(
        r#"    <h2>Your review is ready</h2>
    <div id="reviewText" class="review-text" contenteditable="true"></div>
    <div class="review-actions">
        <button id="copyBtn" class="copy-btn">📋 Copy review</button>
        <a id="googleMapsBtn" class="google-btn" href="{}" target="_blank" rel="noopener">Open Google Reviews</a>
    </div>
    <div class="step-nav">
        <button class="prev-btn">Back</button>
    </div>"#,
        html_escape(&profile.google_review_link)
    );

    step_section(flow, WizardStep::Review, &inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revu_sdk::revu_tenant::{TenantConfig, TenantProfile};

    fn classic_flow() -> (WizardFlow, TenantProfile) {
        let profile = TenantProfile::default();
        let flow = WizardFlow::new(profile.variant).with_city(profile.city.clone());
        (flow, profile)
    }

    #[test]
    fn test_wizard_renders_all_four_steps() {
        let (flow, profile) = classic_flow();
        let html = render_wizard(&flow, &profile);
        for step in 1..=4 {
            assert!(html.contains(&format!(r#"data-step="{}""#, step)));
        }
        assert!(html.contains(r#"data-step="1""#));
        assert!(html.contains("wizard-step active"));
    }

    #[test]
    fn test_city_is_prefilled_from_profile() {
        let (flow, _) = classic_flow();
        let html = render_step_service(&flow);
        assert!(html.contains(r#"id="cityInput" value="Austin""#));
    }

    #[test]
    fn test_sliders_start_at_top_position() {
        let (flow, _) = classic_flow();
        let html = render_step_ratings(&flow);
        assert!(html.contains(r#"id="professionalismDisplay">Outstanding"#));
        assert!(html.contains(r#"id="communicationDisplay">Crystal Clear"#));
        assert!(html.contains(r#"id="timelinessDisplay">Record Time"#));
        assert!(html.contains("--range-percent: 100%"));
    }

    #[test]
    fn test_classic_has_no_label_rows() {
        let (flow, _) = classic_flow();
        let html = render_step_ratings(&flow);
        assert!(!html.contains("slider-labels"));
    }

    #[test]
    fn test_curated_renders_highlighted_label_row() {
        let profile = TenantProfile::merged(&TenantConfig {
            variant: Some(SiteVariant::Curated),
            ..Default::default()
        });
        let flow = WizardFlow::new(profile.variant);
        let html = render_step_ratings(&flow);
        assert!(html.contains("slider-labels"));
        assert!(html.contains(r#"class="slider-label highlighted" data-axis="timeliness" data-index="3">Same Week"#));
    }

    #[test]
    fn test_review_step_links_google_reviews() {
        let profile = TenantProfile::merged(&TenantConfig {
            google_review_link: Some("https://g.page/r/summit/review".to_string()),
            ..Default::default()
        });
        let flow = WizardFlow::new(profile.variant);
        let html = render_step_review(&flow, &profile);
        assert!(html.contains(r#"href="https://g.page/r/summit/review""#));
    }
}
