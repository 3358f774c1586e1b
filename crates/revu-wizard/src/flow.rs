//! Wizard flow state machine.

use serde::{Deserialize, Serialize};

use revu_tenant::SiteVariant;

use crate::slider::{SatisfactionAxis, SliderPosition};

/// Steps in the review wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Service type and city.
    Service,
    /// The three satisfaction sliders.
    Ratings,
    /// Optional free-text comments.
    Comments,
    /// Generated review and copy action.
    Review,
}

impl WizardStep {
    pub const COUNT: u8 = 4;

    pub const ALL: [WizardStep; 4] = [
        WizardStep::Service,
        WizardStep::Ratings,
        WizardStep::Comments,
        WizardStep::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Service => "service",
            WizardStep::Ratings => "ratings",
            WizardStep::Comments => "comments",
            WizardStep::Review => "review",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Service => 1,
            WizardStep::Ratings => 2,
            WizardStep::Comments => 3,
            WizardStep::Review => 4,
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => Some(WizardStep::Ratings),
            WizardStep::Ratings => Some(WizardStep::Comments),
            WizardStep::Comments => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => None,
            WizardStep::Ratings => Some(WizardStep::Service),
            WizardStep::Comments => Some(WizardStep::Ratings),
            WizardStep::Review => Some(WizardStep::Comments),
        }
    }
}

/// Visual state of a step-indicator marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMarker {
    Upcoming,
    Active,
    Completed,
}

/// Error type for wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Cannot advance: missing {0}")]
    Incomplete(String),

    #[error("Invalid wizard transition from {from}")]
    InvalidTransition { from: &'static str },
}

/// The wizard's ephemeral state: one instance per visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardFlow {
    /// Behavior variant from the tenant config.
    pub variant: SiteVariant,
    /// Current step.
    pub step: WizardStep,
    /// Selected service.
    pub service: String,
    /// City value (pre-filled from config, editable).
    pub city: String,
    /// Slider positions.
    pub professionalism: SliderPosition,
    pub communication: SliderPosition,
    pub timeliness: SliderPosition,
    /// Optional free-text comment.
    pub additional_comments: String,
    /// Review text generated on entering the final step.
    pub generated_review: Option<String>,
}

impl WizardFlow {
    /// Create a fresh flow at step 1 with sliders at their top position.
    pub fn new(variant: SiteVariant) -> Self {
        Self {
            variant,
            step: WizardStep::Service,
            service: String::new(),
            city: String::new(),
            professionalism: SliderPosition::default(),
            communication: SliderPosition::default(),
            timeliness: SliderPosition::default(),
            additional_comments: String::new(),
            generated_review: None,
        }
    }

    /// Pre-fill the city from the tenant config.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn select_service(&mut self, service: impl Into<String>) {
        self.service = service.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.additional_comments = comments.into();
    }

    pub fn position(&self, axis: SatisfactionAxis) -> SliderPosition {
        match axis {
            SatisfactionAxis::Professionalism => self.professionalism,
            SatisfactionAxis::Communication => self.communication,
            SatisfactionAxis::Timeliness => self.timeliness,
        }
    }

    pub fn set_position(&mut self, axis: SatisfactionAxis, position: SliderPosition) {
        match axis {
            SatisfactionAxis::Professionalism => self.professionalism = position,
            SatisfactionAxis::Communication => self.communication = position,
            SatisfactionAxis::Timeliness => self.timeliness = position,
        }
    }

    /// The current label for an axis in this flow's variant wording.
    pub fn label(&self, axis: SatisfactionAxis) -> &'static str {
        self.position(axis).label(axis, self.variant)
    }

    /// What's missing to advance from the current step.
    ///
    /// Only step 1 is gated: a service must be selected, and the classic
    /// variant additionally requires a non-empty city.
    pub fn missing_for_advance(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.step == WizardStep::Service {
            if self.service.trim().is_empty() {
                missing.push("service");
            }
            if self.variant == SiteVariant::Classic && self.city.trim().is_empty() {
                missing.push("city");
            }
        }
        missing
    }

    /// Check whether the current step's gate passes.
    pub fn can_advance(&self) -> bool {
        self.missing_for_advance().is_empty()
    }

    /// Advance to the next step.
    ///
    /// A failed gate leaves the step unchanged. Entering the review step
    /// clears any previously generated review so it is regenerated fresh
    /// on every entry.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::InvalidTransition {
            from: self.step.as_str(),
        })?;

        let missing = self.missing_for_advance();
        if !missing.is_empty() {
            return Err(WizardError::Incomplete(missing.join(", ")));
        }

        self.step = next;
        if next == WizardStep::Review {
            self.generated_review = None;
        }

        Ok(next)
    }

    /// Go back one step. Always permitted, floor at step 1.
    pub fn go_back(&mut self) -> Result<WizardStep, WizardError> {
        let prev = self.step.prev().ok_or(WizardError::InvalidTransition {
            from: self.step.as_str(),
        })?;
        self.step = prev;
        Ok(prev)
    }

    /// Progress through the wizard: (step - 1) / 3 of the total.
    pub fn progress_percent(&self) -> f32 {
        ((self.step.number() - 1) as f32 / (WizardStep::COUNT - 1) as f32) * 100.0
    }

    /// Step-indicator marker states for all four steps.
    pub fn markers(&self) -> [StepMarker; 4] {
        let current = self.step.number();
        let mut markers = [StepMarker::Upcoming; 4];
        for (i, marker) in markers.iter_mut().enumerate() {
            let number = i as u8 + 1;
            *marker = if number == current {
                StepMarker::Active
            } else if number < current {
                StepMarker::Completed
            } else {
                StepMarker::Upcoming
            };
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_flow() -> WizardFlow {
        WizardFlow::new(SiteVariant::Classic)
    }

    #[test]
    fn test_fresh_flow_starts_at_service_step() {
        let flow = classic_flow();
        assert_eq!(flow.step, WizardStep::Service);
        assert_eq!(flow.progress_percent(), 0.0);
        assert_eq!(flow.generated_review, None);
    }

    #[test]
    fn test_advance_without_service_fails_and_keeps_step() {
        let mut flow = classic_flow();
        let err = flow.advance().unwrap_err();
        assert!(matches!(err, WizardError::Incomplete(_)));
        assert_eq!(flow.step, WizardStep::Service);
    }

    #[test]
    fn test_classic_requires_city_too() {
        let mut flow = classic_flow();
        flow.select_service("roof replacement");
        let err = flow.advance().unwrap_err();
        assert_eq!(err, WizardError::Incomplete("city".to_string()));

        flow.set_city("Austin");
        assert_eq!(flow.advance().unwrap(), WizardStep::Ratings);
    }

    #[test]
    fn test_curated_requires_only_service() {
        let mut flow = WizardFlow::new(SiteVariant::Curated);
        flow.select_service("roof inspection");
        assert_eq!(flow.advance().unwrap(), WizardStep::Ratings);
    }

    #[test]
    fn test_later_steps_advance_unconditionally() {
        let mut flow = classic_flow();
        flow.select_service("roof replacement");
        flow.set_city("Austin");
        flow.advance().unwrap();
        assert_eq!(flow.advance().unwrap(), WizardStep::Comments);
        assert_eq!(flow.advance().unwrap(), WizardStep::Review);
        assert!(flow.advance().is_err());
    }

    #[test]
    fn test_entering_review_clears_previous_generation() {
        let mut flow = classic_flow();
        flow.select_service("roof replacement");
        flow.set_city("Austin");
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.generated_review = Some("old review".to_string());

        flow.go_back().unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.generated_review, None);
    }

    #[test]
    fn test_go_back_floors_at_step_one() {
        let mut flow = classic_flow();
        assert!(flow.go_back().is_err());
        assert_eq!(flow.step, WizardStep::Service);
    }

    #[test]
    fn test_go_back_is_unconditional() {
        let mut flow = classic_flow();
        flow.select_service("roof replacement");
        flow.set_city("Austin");
        flow.advance().unwrap();
        flow.service.clear();
        assert_eq!(flow.go_back().unwrap(), WizardStep::Service);
    }

    #[test]
    fn test_progress_percent_per_step() {
        let mut flow = classic_flow();
        flow.select_service("repair");
        flow.set_city("Austin");
        assert_eq!(flow.progress_percent(), 0.0);
        flow.advance().unwrap();
        assert!((flow.progress_percent() - 100.0 / 3.0).abs() < 0.01);
        flow.advance().unwrap();
        assert!((flow.progress_percent() - 200.0 / 3.0).abs() < 0.01);
        flow.advance().unwrap();
        assert_eq!(flow.progress_percent(), 100.0);
    }

    #[test]
    fn test_markers_track_current_step() {
        let mut flow = classic_flow();
        flow.select_service("repair");
        flow.set_city("Austin");
        flow.advance().unwrap();
        flow.advance().unwrap();

        assert_eq!(
            flow.markers(),
            [
                StepMarker::Completed,
                StepMarker::Completed,
                StepMarker::Active,
                StepMarker::Upcoming
            ]
        );
    }
}
