//! Rendering adapter: the wizard's only path to UI effects.

use crate::flow::{StepMarker, WizardFlow, WizardStep};
use crate::slider::{SatisfactionAxis, SliderPosition};

use revu_tenant::SiteVariant;

/// Thin adapter for DOM-coupled side effects.
///
/// The state machine never touches elements, styles or animations
/// directly; a host (browser glue, test recorder) implements this trait.
pub trait RenderSink {
    /// Show the given step; markers and progress were just recomputed.
    fn show_step(&mut self, step: WizardStep, markers: [StepMarker; 4], progress_percent: f32);

    /// Visible rejection feedback on a failed step gate.
    fn shake(&mut self, step: WizardStep);

    /// Smoothly scroll the wizard into view.
    fn scroll_to_wizard(&mut self);

    /// Update a slider's display label and proportional fill.
    fn set_slider(&mut self, axis: SatisfactionAxis, label: &str, fill_percent: u8);

    /// Highlight the matching label in the fixed label row (curated
    /// variant only).
    fn highlight_label(&mut self, axis: SatisfactionAxis, index: u8);

    /// Write the generated review into the display surface.
    fn set_review_text(&mut self, text: &str);
}

/// Drives a `WizardFlow` against a `RenderSink`, regenerating the review
/// on every entry into the final step.
pub struct WizardController<R, G>
where
    R: RenderSink,
    G: FnMut(&WizardFlow) -> String,
{
    flow: WizardFlow,
    sink: R,
    generate: G,
}

impl<R, G> WizardController<R, G>
where
    R: RenderSink,
    G: FnMut(&WizardFlow) -> String,
{
    /// Create a controller and paint the initial step without scrolling.
    pub fn new(flow: WizardFlow, mut sink: R, generate: G) -> Self {
        sink.show_step(flow.step, flow.markers(), flow.progress_percent());
        for axis in SatisfactionAxis::ALL {
            let position = flow.position(axis);
            sink.set_slider(axis, flow.label(axis), position.fill_percent());
        }
        Self {
            flow,
            sink,
            generate,
        }
    }

    pub fn flow(&self) -> &WizardFlow {
        &self.flow
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn select_service(&mut self, service: impl Into<String>) {
        self.flow.select_service(service);
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.flow.set_city(city);
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.flow.set_comments(comments);
    }

    /// Move a slider; updates its label, fill and (curated variant) the
    /// highlighted label in the fixed row.
    pub fn set_position(&mut self, axis: SatisfactionAxis, position: SliderPosition) {
        self.flow.set_position(axis, position);
        self.sink
            .set_slider(axis, self.flow.label(axis), position.fill_percent());
        if self.flow.variant == SiteVariant::Curated {
            self.sink.highlight_label(axis, position.index());
        }
    }

    /// Advance one step; a failed gate shakes the current step instead.
    pub fn next_step(&mut self) {
        match self.flow.advance() {
            Ok(step) => {
                if step == WizardStep::Review {
                    let text = (self.generate)(&self.flow);
                    self.sink.set_review_text(&text);
                    self.flow.generated_review = Some(text);
                }
                self.sink
                    .show_step(step, self.flow.markers(), self.flow.progress_percent());
                self.sink.scroll_to_wizard();
            }
            Err(_) => self.sink.shake(self.flow.step),
        }
    }

    /// Go back one step; no-op feedback at the first step.
    pub fn prev_step(&mut self) {
        if let Ok(step) = self.flow.go_back() {
            self.sink
                .show_step(step, self.flow.markers(), self.flow.progress_percent());
            self.sink.scroll_to_wizard();
        }
    }

    /// City-confirm affordance: acknowledging the city auto-advances
    /// when a service is already selected.
    pub fn confirm_city(&mut self) {
        if !self.flow.service.trim().is_empty() {
            self.next_step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Effect {
        ShowStep(WizardStep, f32),
        Shake(WizardStep),
        Scroll,
        Slider(SatisfactionAxis, String, u8),
        Highlight(SatisfactionAxis, u8),
        ReviewText(String),
    }

    #[derive(Default)]
    struct Recorder {
        effects: Vec<Effect>,
    }

    impl RenderSink for Recorder {
        fn show_step(&mut self, step: WizardStep, _markers: [StepMarker; 4], progress: f32) {
            self.effects.push(Effect::ShowStep(step, progress));
        }
        fn shake(&mut self, step: WizardStep) {
            self.effects.push(Effect::Shake(step));
        }
        fn scroll_to_wizard(&mut self) {
            self.effects.push(Effect::Scroll);
        }
        fn set_slider(&mut self, axis: SatisfactionAxis, label: &str, fill: u8) {
            self.effects.push(Effect::Slider(axis, label.to_string(), fill));
        }
        fn highlight_label(&mut self, axis: SatisfactionAxis, index: u8) {
            self.effects.push(Effect::Highlight(axis, index));
        }
        fn set_review_text(&mut self, text: &str) {
            self.effects.push(Effect::ReviewText(text.to_string()));
        }
    }

    fn fake_generate(flow: &WizardFlow) -> String {
        format!("review for {}", flow.service)
    }

    fn controller(variant: SiteVariant) -> WizardController<Recorder, fn(&WizardFlow) -> String> {
        WizardController::new(WizardFlow::new(variant), Recorder::default(), fake_generate)
    }

    #[test]
    fn test_failed_gate_shakes_instead_of_advancing() {
        let mut c = controller(SiteVariant::Classic);
        c.next_step();
        assert_eq!(c.flow().step, WizardStep::Service);
        assert!(c.sink().effects.contains(&Effect::Shake(WizardStep::Service)));
    }

    #[test]
    fn test_reaching_review_generates_and_paints_text() {
        let mut c = controller(SiteVariant::Classic);
        c.select_service("roof replacement");
        c.set_city("Austin");
        c.next_step();
        c.next_step();
        c.next_step();

        assert_eq!(c.flow().step, WizardStep::Review);
        assert_eq!(
            c.flow().generated_review.as_deref(),
            Some("review for roof replacement")
        );
        assert!(c
            .sink()
            .effects
            .contains(&Effect::ReviewText("review for roof replacement".to_string())));
    }

    #[test]
    fn test_reentering_review_regenerates() {
        let mut c = controller(SiteVariant::Classic);
        c.select_service("roof repair");
        c.set_city("Austin");
        c.next_step();
        c.next_step();
        c.next_step();
        c.prev_step();
        c.next_step();

        let generations = c
            .sink()
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::ReviewText(_)))
            .count();
        assert_eq!(generations, 2);
    }

    #[test]
    fn test_slider_updates_label_and_fill() {
        let mut c = controller(SiteVariant::Classic);
        c.set_position(SatisfactionAxis::Communication, SliderPosition::Low);
        assert!(c.sink().effects.contains(&Effect::Slider(
            SatisfactionAxis::Communication,
            "Vague".to_string(),
            0
        )));
        // classic variant has no fixed label row to highlight
        assert!(!c
            .sink()
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Highlight(..))));
    }

    #[test]
    fn test_curated_slider_highlights_matching_label() {
        let mut c = controller(SiteVariant::Curated);
        c.set_position(SatisfactionAxis::Timeliness, SliderPosition::Mid);
        assert!(c
            .sink()
            .effects
            .contains(&Effect::Highlight(SatisfactionAxis::Timeliness, 2)));
    }

    #[test]
    fn test_confirm_city_advances_only_with_service() {
        let mut c = controller(SiteVariant::Classic);
        c.set_city("Austin");
        c.confirm_city();
        assert_eq!(c.flow().step, WizardStep::Service);

        c.select_service("roof replacement");
        c.confirm_city();
        assert_eq!(c.flow().step, WizardStep::Ratings);
    }
}
