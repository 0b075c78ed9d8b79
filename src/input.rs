//! Inputs-file loading and boundary validation.
//!
//! Business inputs arrive as a TOML (or JSON) file. Anything invalid is
//! handled here, before the calculation core ever sees it: hard invalids
//! are typed errors, soft invalids are clamped with a logged warning.

use crate::config::RoimapConfig;
use crate::core::{BillingTerm, ChannelFeeRate, ChannelMix, PlanTier, UpliftScenarioConfig};
use crate::state::SnapshotPatch;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("channel mix must sum to 100, got {total}")]
    MixSum { total: u32 },

    #[error("channel mix percentages must each be at most 100, {channel} is {value}")]
    MixShare { channel: &'static str, value: u32 },

    #[error("scenario percents must be strictly ordered and within 1..=30, got {low}/{average}/{good}")]
    Scenarios { low: u32, average: u32, good: u32 },
}

/// Checkout-funnel counts, annual.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FunnelInputs {
    pub reached_checkout: f64,
    pub completed_checkout: f64,
}

/// The raw inputs file. Optional sections fall back to plan defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateInputs {
    pub annual_sales: f64,
    pub current_plan: PlanTier,

    #[serde(default = "default_term")]
    pub term: BillingTerm,

    /// Average order value. Zero or missing falls back to the configured
    /// assumption inside the core.
    #[serde(default)]
    pub aov: f64,

    /// Conversion rate in percent.
    #[serde(default)]
    pub conversion_rate: f64,

    /// Current monthly subscription cost; defaults from the rate table
    /// for the selected plan and term.
    pub current_monthly_cost: Option<f64>,

    pub channel_mix: Option<ChannelMix>,
    pub channel_rates: Option<ChannelFeeRate>,
    pub funnel: Option<FunnelInputs>,
    pub scenarios: Option<UpliftScenarioConfig>,
}

fn default_term() -> BillingTerm {
    BillingTerm::ThreeYear
}

impl EstimateInputs {
    /// Read and parse an inputs file; JSON when the extension says so,
    /// TOML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read inputs file {}", path.display()))?;
        let inputs = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse inputs file {}", path.display()))?
        } else {
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse inputs file {}", path.display()))?
        };
        Ok(inputs)
    }

    /// Enforce the boundary rules. Consumes and returns the cleaned-up
    /// inputs so nothing unvalidated can slip through to the core.
    pub fn validated(mut self) -> Result<Self, InputError> {
        let non_negative = |field: &'static str, value: f64| {
            if value < 0.0 {
                Err(InputError::Negative { field, value })
            } else {
                Ok(())
            }
        };
        non_negative("annual_sales", self.annual_sales)?;
        non_negative("aov", self.aov)?;
        non_negative("conversion_rate", self.conversion_rate)?;
        if let Some(cost) = self.current_monthly_cost {
            non_negative("current_monthly_cost", cost)?;
        }
        if let Some(rates) = &self.channel_rates {
            non_negative("channel_rates.d2c", rates.d2c)?;
            non_negative("channel_rates.b2b", rates.b2b)?;
            non_negative("channel_rates.retail", rates.retail)?;
        }

        if let Some(mix) = &self.channel_mix {
            for (channel, value) in [("d2c", mix.d2c), ("b2b", mix.b2b), ("retail", mix.retail)] {
                if value > 100 {
                    return Err(InputError::MixShare { channel, value });
                }
            }
            let total = mix.total();
            if total != 100 {
                return Err(InputError::MixSum { total });
            }
        }

        if let Some(scenarios) = &self.scenarios {
            if !(scenarios.is_ordered() && scenarios.in_bounds()) {
                return Err(InputError::Scenarios {
                    low: scenarios.low,
                    average: scenarios.average,
                    good: scenarios.good,
                });
            }
        }

        if let Some(funnel) = &mut self.funnel {
            if funnel.reached_checkout < 0.0 {
                return Err(InputError::Negative {
                    field: "funnel.reached_checkout",
                    value: funnel.reached_checkout,
                });
            }
            if funnel.completed_checkout < 0.0 {
                return Err(InputError::Negative {
                    field: "funnel.completed_checkout",
                    value: funnel.completed_checkout,
                });
            }
            if funnel.completed_checkout > funnel.reached_checkout {
                warn!(
                    "completed checkouts ({}) exceed reached checkouts ({}); clamping",
                    funnel.completed_checkout, funnel.reached_checkout
                );
                funnel.completed_checkout = funnel.reached_checkout;
            }
        }

        Ok(self)
    }

    /// Convert validated inputs into a snapshot patch. Missing sections
    /// stay unset so the snapshot's defaults survive the merge.
    pub fn to_patch(&self, config: &RoimapConfig) -> SnapshotPatch {
        let scenarios = self
            .scenarios
            .unwrap_or_else(|| config.scenarios.to_scenario_config());
        // Zero means "not provided": substitute the configured fallbacks
        // here so the core never has to divide by them.
        let aov = if self.aov > 0.0 {
            self.aov
        } else {
            warn!("no AOV provided; assuming {}", config.fallbacks.aov);
            config.fallbacks.aov
        };
        let conversion_rate = if self.conversion_rate > 0.0 {
            self.conversion_rate
        } else {
            warn!(
                "no conversion rate provided; assuming {}%",
                config.fallbacks.conversion_rate
            );
            config.fallbacks.conversion_rate
        };
        // The current monthly cost defaults from the rate table for the
        // selected plan and term when the file doesn't give one.
        let current_monthly_cost = self
            .current_monthly_cost
            .unwrap_or_else(|| crate::rates::base_monthly_cost(self.current_plan, self.term));
        SnapshotPatch {
            annual_sales: Some(self.annual_sales),
            current_tier: Some(self.current_plan),
            term: Some(self.term),
            assumed_aov: Some(aov),
            conversion_rate: Some(conversion_rate),
            current_monthly_cost: Some(current_monthly_cost),
            mix: self.channel_mix,
            channel_rates: self.channel_rates,
            scenarios: Some(scenarios),
            funnel_reached: self.funnel.map(|f| Some(f.reached_checkout)),
            funnel_completed: self.funnel.map(|f| Some(f.completed_checkout)),
            ..Default::default()
        }
    }
}

/// Template written by `roimap init`.
pub const INPUTS_TEMPLATE: &str = r#"# roimap inputs
# All currency values are annual unless noted.

annual_sales = 1500000
current_plan = "advanced"   # basic | grow | advanced | plus
term = "three-year"          # one-year | three-year
aov = 120.0
conversion_rate = 2.5        # percent

# current_monthly_cost = 299.0

[channel_mix]
d2c = 70
b2b = 20
retail = 10

# [channel_rates]
# d2c = 0.35
# b2b = 0.18
# retail = 0.25

# [funnel]
# reached_checkout = 120000
# completed_checkout = 100000

# [scenarios]
# low = 5
# average = 10
# good = 15
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse(raw: &str) -> EstimateInputs {
        toml::from_str(raw).unwrap()
    }

    #[test]
    fn test_template_parses_and_validates() {
        let inputs = parse(INPUTS_TEMPLATE);
        let inputs = inputs.validated().unwrap();
        assert_eq!(inputs.current_plan, PlanTier::Advanced);
        assert_eq!(inputs.term, BillingTerm::ThreeYear);
        assert_eq!(inputs.channel_mix.unwrap().total(), 100);
    }

    #[test]
    fn test_minimal_inputs_parse() {
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"
        "#});
        let inputs = inputs.validated().unwrap();
        assert_eq!(inputs.term, BillingTerm::ThreeYear);
        assert!(inputs.channel_mix.is_none());
        assert_eq!(inputs.aov, 0.0);
    }

    #[test]
    fn test_negative_sales_rejected() {
        let inputs = parse(indoc! {r#"
            annual_sales = -5.0
            current_plan = "basic"
        "#});
        assert_eq!(
            inputs.validated().unwrap_err(),
            InputError::Negative {
                field: "annual_sales",
                value: -5.0
            }
        );
    }

    #[test]
    fn test_mix_must_sum_to_100() {
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"

            [channel_mix]
            d2c = 70
            b2b = 20
            retail = 20
        "#});
        assert_eq!(
            inputs.validated().unwrap_err(),
            InputError::MixSum { total: 110 }
        );
    }

    #[test]
    fn test_oversized_channel_share_rejected() {
        // Chosen so a wrapping sum would land back on exactly 100.
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"

            [channel_mix]
            d2c = 4294967290
            b2b = 7
            retail = 99
        "#});
        assert_eq!(
            inputs.validated().unwrap_err(),
            InputError::MixShare {
                channel: "d2c",
                value: 4_294_967_290
            }
        );
    }

    #[test]
    fn test_completed_above_reached_is_clamped() {
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"

            [funnel]
            reached_checkout = 1000
            completed_checkout = 1200
        "#});
        let inputs = inputs.validated().unwrap();
        let funnel = inputs.funnel.unwrap();
        assert_eq!(funnel.completed_checkout, 1000.0);
    }

    #[test]
    fn test_negative_completed_checkouts_rejected() {
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"

            [funnel]
            reached_checkout = 1000
            completed_checkout = -100
        "#});
        assert_eq!(
            inputs.validated().unwrap_err(),
            InputError::Negative {
                field: "funnel.completed_checkout",
                value: -100.0
            }
        );
    }

    #[test]
    fn test_unordered_scenarios_rejected() {
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"

            [scenarios]
            low = 10
            average = 10
            good = 20
        "#});
        assert!(matches!(
            inputs.validated().unwrap_err(),
            InputError::Scenarios { .. }
        ));
    }

    #[test]
    fn test_patch_leaves_missing_sections_unset() {
        let config = RoimapConfig::default();
        let inputs = parse(indoc! {r#"
            annual_sales = 800000
            current_plan = "grow"
        "#})
        .validated()
        .unwrap();
        let patch = inputs.to_patch(&config);
        assert!(patch.mix.is_none());
        assert!(patch.channel_rates.is_none());
        assert!(patch.funnel_reached.is_none());
        assert_eq!(patch.annual_sales, Some(800_000.0));
        // Scenario defaults come from the config when the file is silent.
        assert_eq!(patch.scenarios.unwrap().average, 10);
    }

    #[test]
    fn test_json_inputs_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        fs::write(
            &path,
            r#"{"annual_sales": 500000, "current_plan": "basic"}"#,
        )
        .unwrap();
        let inputs = EstimateInputs::load(&path).unwrap();
        assert_eq!(inputs.current_plan, PlanTier::Basic);
    }
}
