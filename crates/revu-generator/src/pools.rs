//! Fixed phrase pools.
//!
//! The classic variant shares one body pool parameterized by the label
//! text; the curated variant keeps a small hand-written pool per label.

use crate::generate::ReviewInputs;

/// Axes a curated body line can speak to, in paragraph order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAxis {
    Professionalism,
    Communication,
    Timeliness,
}

impl BodyAxis {
    pub const ALL: [BodyAxis; 3] = [
        BodyAxis::Professionalism,
        BodyAxis::Communication,
        BodyAxis::Timeliness,
    ];
}

/// Classic intro pool: parameterized by service, location and the
/// professionalism label.
pub fn classic_intros(inputs: &ReviewInputs) -> Vec<String> {
    let service = &inputs.service;
    let location = &inputs.location;
    let prof = inputs.professionalism.to_lowercase();
    vec![
        format!(
            "We had our {} done in {} and the crew was {} from start to finish.",
            service, location, prof
        ),
        format!(
            "Amazing experience getting our {} in {}. The team was extremely {}.",
            service, location, prof
        ),
        format!(
            "If you need a {} in {}, look no further. This crew is {}!",
            service, location, prof
        ),
    ]
}

/// Classic body pool: one shared pool parameterized by the communication
/// and timeliness labels.
pub fn classic_bodies(inputs: &ReviewInputs) -> Vec<String> {
    let comm = inputs.communication.to_lowercase();
    let time = inputs.timeliness.to_lowercase();
    vec![
        format!(
            "Communication was {} and they finished the job in {}.",
            comm, time
        ),
        format!(
            "They were {} throughout the process. The work was completed {}.",
            comm, time
        ),
        format!(
            "I really appreciated how {} they were. Plus, they finished in {}!",
            comm, time
        ),
    ]
}

/// Classic closing pool: parameterized by location.
pub fn classic_closings(inputs: &ReviewInputs) -> Vec<String> {
    vec![
        format!("I’d absolutely recommend them to anyone in {}!", inputs.location),
        "Highly recommend their services!".to_string(),
        "Great job all around, definitely worth calling for your next roofing project.".to_string(),
    ]
}

/// Curated intro pool: parameterized by service and location only; the
/// professionalism label gets its own curated body line.
pub fn curated_intros(inputs: &ReviewInputs) -> Vec<String> {
    let service = &inputs.service;
    let location = &inputs.location;
    vec![
        format!(
            "We hired them for a {} in {} and couldn't be happier.",
            service, location
        ),
        format!("Just had our {} completed in {}.", service, location),
        format!("Our {} in {} went better than we hoped.", service, location),
    ]
}

/// Curated closing pool: parameterized by location.
pub fn curated_closings(inputs: &ReviewInputs) -> Vec<String> {
    vec![
        format!("If you're in {}, don't hesitate to call them.", inputs.location),
        format!(
            "We'll be recommending them to everyone we know in {}.",
            inputs.location
        ),
        "Five stars, and our honest thanks to the whole team.".to_string(),
    ]
}

/// Curated per-label body pool for one axis.
///
/// Unknown labels (a tenant with custom wording) fall back to a single
/// line parameterized by the label text, so generation never fails.
pub fn curated_lines(axis: BodyAxis, label: &str) -> Vec<String> {
    let pool: Option<&[&str]> = match (axis, label) {
        (BodyAxis::Professionalism, "Courteous") => Some(&[
            "The crew was courteous to my family and neighbors the entire time.",
            "Everyone I dealt with was polite and respectful of our property.",
        ]),
        (BodyAxis::Professionalism, "Highly Professional") => Some(&[
            "The whole operation felt highly professional, from the estimate to the final walkthrough.",
            "Every step was handled by people who clearly knew what they were doing.",
        ]),
        (BodyAxis::Professionalism, "Exceptional") => Some(&[
            "The workmanship was exceptional, easily the best contractor experience we've had.",
            "Exceptional attention to detail from the first shingle to the last.",
        ]),
        (BodyAxis::Communication, "Responsive") => Some(&[
            "They answered every call and text within the hour.",
            "Any question I had got a quick, straight answer.",
        ]),
        (BodyAxis::Communication, "Clear") => Some(&[
            "They explained the scope, the schedule, and the cost in plain terms.",
            "I always knew exactly what was happening next.",
        ]),
        (BodyAxis::Communication, "Proactive") => Some(&[
            "They flagged issues before I even noticed them and came with solutions.",
            "Updates arrived before I ever had to ask.",
        ]),
        (BodyAxis::Timeliness, "On Schedule") => Some(&[
            "The job wrapped up right on schedule.",
            "They showed up when they said they would, every single day.",
        ]),
        (BodyAxis::Timeliness, "Ahead of Schedule") => Some(&[
            "They actually finished ahead of schedule.",
            "The work was done sooner than promised.",
        ]),
        (BodyAxis::Timeliness, "Same Week") => Some(&[
            "They fit us in and finished the same week we called.",
            "From first call to finished roof in under a week.",
        ]),
        _ => None,
    };

    match pool {
        Some(lines) => lines.iter().map(|s| s.to_string()).collect(),
        None => {
            let lower = label.to_lowercase();
            vec![match axis {
                BodyAxis::Professionalism => {
                    format!("The crew was {} from start to finish.", lower)
                }
                BodyAxis::Communication => {
                    format!("Communication was {} the whole way through.", lower)
                }
                BodyAxis::Timeliness => format!("The job was finished {}.", lower),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ReviewInputs {
        ReviewInputs {
            service: "roof replacement".to_string(),
            location: "Austin".to_string(),
            professionalism: "Outstanding".to_string(),
            communication: "Crystal Clear".to_string(),
            timeliness: "Record Time".to_string(),
            additional_comments: String::new(),
        }
    }

    #[test]
    fn test_classic_pools_have_three_candidates_each() {
        let inputs = inputs();
        assert_eq!(classic_intros(&inputs).len(), 3);
        assert_eq!(classic_bodies(&inputs).len(), 3);
        assert_eq!(classic_closings(&inputs).len(), 3);
    }

    #[test]
    fn test_classic_pools_lowercase_labels() {
        let inputs = inputs();
        assert!(classic_intros(&inputs)[0].contains("outstanding"));
        assert!(classic_bodies(&inputs)[0].contains("crystal clear"));
        assert!(classic_bodies(&inputs)[0].contains("record time"));
    }

    #[test]
    fn test_no_pool_produces_empty_segments() {
        let inputs = inputs();
        for line in classic_intros(&inputs)
            .into_iter()
            .chain(classic_bodies(&inputs))
            .chain(classic_closings(&inputs))
            .chain(curated_intros(&inputs))
            .chain(curated_closings(&inputs))
        {
            assert!(!line.trim().is_empty());
        }
    }

    #[test]
    fn test_curated_lines_for_known_labels() {
        let lines = curated_lines(BodyAxis::Communication, "Responsive");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("call and text"));
    }

    #[test]
    fn test_curated_lines_fall_back_for_custom_labels() {
        let lines = curated_lines(BodyAxis::Timeliness, "Lightning Fast");
        assert_eq!(lines, ["The job was finished lightning fast."]);
    }
}
