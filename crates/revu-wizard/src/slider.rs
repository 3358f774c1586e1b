//! Satisfaction sliders: discrete 3-position controls.

use serde::{Deserialize, Serialize};

use revu_tenant::SiteVariant;

/// The three satisfaction axes the wizard measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatisfactionAxis {
    Professionalism,
    Communication,
    Timeliness,
}

impl SatisfactionAxis {
    pub const ALL: [SatisfactionAxis; 3] = [
        SatisfactionAxis::Professionalism,
        SatisfactionAxis::Communication,
        SatisfactionAxis::Timeliness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SatisfactionAxis::Professionalism => "professionalism",
            SatisfactionAxis::Communication => "communication",
            SatisfactionAxis::Timeliness => "timeliness",
        }
    }
}

/// One of exactly three ordinal slider positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderPosition {
    Low,
    Mid,
    #[default]
    High,
}

impl SliderPosition {
    pub const ALL: [SliderPosition; 3] =
        [SliderPosition::Low, SliderPosition::Mid, SliderPosition::High];

    /// Build from the 1-based slider input value.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(SliderPosition::Low),
            2 => Some(SliderPosition::Mid),
            3 => Some(SliderPosition::High),
            _ => None,
        }
    }

    /// 1-based slider input value.
    pub fn index(&self) -> u8 {
        match self {
            SliderPosition::Low => 1,
            SliderPosition::Mid => 2,
            SliderPosition::High => 3,
        }
    }

    /// Proportional track fill for the visual indicator.
    pub fn fill_percent(&self) -> u8 {
        (self.index() - 1) * 50
    }

    /// The human-readable label for this position on an axis, in the
    /// given variant's wording.
    pub fn label(&self, axis: SatisfactionAxis, variant: SiteVariant) -> &'static str {
        axis_labels(axis, variant)[(self.index() - 1) as usize]
    }
}

/// Fixed lookup table mapping slider positions to labels.
pub fn axis_labels(axis: SatisfactionAxis, variant: SiteVariant) -> [&'static str; 3] {
    match (variant, axis) {
        (SiteVariant::Classic, SatisfactionAxis::Professionalism) => {
            ["Okay", "Great", "Outstanding"]
        }
        (SiteVariant::Classic, SatisfactionAxis::Communication) => {
            ["Vague", "Good", "Crystal Clear"]
        }
        (SiteVariant::Classic, SatisfactionAxis::Timeliness) => {
            ["On Time", "Quickly", "Record Time"]
        }
        (SiteVariant::Curated, SatisfactionAxis::Professionalism) => {
            ["Courteous", "Highly Professional", "Exceptional"]
        }
        (SiteVariant::Curated, SatisfactionAxis::Communication) => {
            ["Responsive", "Clear", "Proactive"]
        }
        (SiteVariant::Curated, SatisfactionAxis::Timeliness) => {
            ["On Schedule", "Ahead of Schedule", "Same Week"]
        }
    }
}
