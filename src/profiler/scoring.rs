use super::types::Recommendation;

/// Every component carries the same weight in the decay score.
pub const COMPONENT_WEIGHT: f64 = 0.25;

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Components {
    pub null_percent: f64,
    pub duplicate_percent: f64,
    pub outdated_percent: f64,
    pub inconsistency_percent: f64,
}

impl Components {
    pub fn sum(&self) -> f64 {
        self.null_percent + self.duplicate_percent + self.outdated_percent + self.inconsistency_percent
    }

    /// `max(0, 100 - 0.25 * sum)`, clamped to `[0, 100]`.
    pub fn decay_score(&self) -> f64 {
        (100.0 - COMPONENT_WEIGHT * self.sum()).clamp(0.0, 100.0)
    }
}

/// All matching rules, in table order. Rules are independent of each other.
pub fn recommend(components: &Components, decay_score: f64) -> Vec<Recommendation> {
    let c = components;
    let rules = [
        (c.null_percent > 50.0, Recommendation::DropHighNullColumns),
        (
            c.null_percent > 0.0 && c.null_percent < 20.0,
            Recommendation::FillMissingValues,
        ),
        (c.duplicate_percent > 0.0, Recommendation::RemoveDuplicateRows),
        (
            c.inconsistency_percent > 0.0,
            Recommendation::StandardizeTextCasing,
        ),
        (c.outdated_percent > 30.0, Recommendation::FlagForArchival),
        (decay_score > 70.0, Recommendation::ImmediateReview),
    ];

    rules
        .into_iter()
        .filter_map(|(matched, rec)| matched.then_some(rec))
        .collect()
}
