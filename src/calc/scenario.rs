//! Scenario-config guard.
//!
//! Uplift scenarios carry improvement percentages that must stay strictly
//! ordered (`low < average < good`) and within [1, 30]. Edits are adjusted
//! here; the projector itself trusts the ordering.

use crate::core::{ScenarioField, UpliftScenarioConfig};

pub const SCENARIO_MIN: u32 = 1;
pub const SCENARIO_MAX: u32 = 30;

fn clamp_percent(value: u32) -> u32 {
    value.clamp(SCENARIO_MIN, SCENARIO_MAX)
}

/// Apply an edit to one scenario percentage, preserving strict ordering.
///
/// The edited value is clamped into [1, 30] first, then constrained against
/// its neighbors: low stays below average, average stays between low and
/// good, good stays above average.
pub fn set_percent(
    config: &UpliftScenarioConfig,
    field: ScenarioField,
    value: u32,
) -> UpliftScenarioConfig {
    let value = clamp_percent(value);
    let mut updated = *config;
    match field {
        ScenarioField::Low => {
            updated.low = value.min(config.average.saturating_sub(1)).max(SCENARIO_MIN);
        }
        ScenarioField::Average => {
            let lo = config.low + 1;
            let hi = config.good.saturating_sub(1).max(lo);
            updated.average = value.clamp(lo, hi);
        }
        ScenarioField::Good => {
            updated.good = value.max(config.average + 1).min(SCENARIO_MAX);
        }
    }
    updated
}
