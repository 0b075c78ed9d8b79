//! Optional `.roimap.toml` configuration.
//!
//! Everything has a sensible default; a config file only has to name the
//! values it wants to change. Loaded once per run and passed down
//! explicitly, never stored in a global.

use crate::core::UpliftScenarioConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".roimap.toml";

/// Scenario improvement percentages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    #[serde(default = "default_low_percent")]
    pub low: u32,

    #[serde(default = "default_average_percent")]
    pub average: u32,

    #[serde(default = "default_good_percent")]
    pub good: u32,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            low: default_low_percent(),
            average: default_average_percent(),
            good: default_good_percent(),
        }
    }
}

impl ScenarioDefaults {
    fn validate(&self) -> Result<(), String> {
        let in_bounds = |v: u32, name: &str| {
            if (1..=30).contains(&v) {
                Ok(())
            } else {
                Err(format!("{name} scenario percent must be between 1 and 30"))
            }
        };
        in_bounds(self.low, "low")?;
        in_bounds(self.average, "average")?;
        in_bounds(self.good, "good")?;
        if self.low < self.average && self.average < self.good {
            Ok(())
        } else {
            Err(format!(
                "scenario percents must be strictly ordered (low < average < good), got {} / {} / {}",
                self.low, self.average, self.good
            ))
        }
    }

    pub fn to_scenario_config(self) -> UpliftScenarioConfig {
        UpliftScenarioConfig {
            low: self.low,
            average: self.average,
            good: self.good,
        }
    }
}

fn default_low_percent() -> u32 {
    5
}
fn default_average_percent() -> u32 {
    10
}
fn default_good_percent() -> u32 {
    15
}

/// Fallback constants substituted before any division.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FallbackDefaults {
    /// Assumed AOV when the merchant supplies none or zero.
    #[serde(default = "default_fallback_aov")]
    pub aov: f64,

    /// Conversion rate substituted when zero, in percent.
    #[serde(default = "default_fallback_conversion")]
    pub conversion_rate: f64,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            aov: default_fallback_aov(),
            conversion_rate: default_fallback_conversion(),
        }
    }
}

impl FallbackDefaults {
    fn validate(&self) -> Result<(), String> {
        if self.aov <= 0.0 {
            return Err("fallback AOV must be positive".to_string());
        }
        if self.conversion_rate <= 0.0 {
            return Err("fallback conversion rate must be positive".to_string());
        }
        Ok(())
    }
}

fn default_fallback_aov() -> f64 {
    50.0
}
fn default_fallback_conversion() -> f64 {
    1.0
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoimapConfig {
    #[serde(default)]
    pub scenarios: ScenarioDefaults,

    #[serde(default)]
    pub fallbacks: FallbackDefaults,

    /// How many months the cumulative-position chart covers.
    #[serde(default = "default_chart_months")]
    pub chart_months: u32,
}

fn default_chart_months() -> u32 {
    12
}

impl Default for RoimapConfig {
    fn default() -> Self {
        Self {
            scenarios: ScenarioDefaults::default(),
            fallbacks: FallbackDefaults::default(),
            chart_months: default_chart_months(),
        }
    }
}

impl RoimapConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.scenarios.validate()?;
        self.fallbacks.validate()?;
        if self.chart_months == 0 {
            return Err("chart_months must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load from an explicit path, or from `.roimap.toml` in the working
    /// directory if present, or fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                default.exists().then(|| default.to_path_buf())
            }
        };

        let config = match candidate {
            Some(p) => {
                let raw = fs::read_to_string(&p)
                    .with_context(|| format!("failed to read config file {}", p.display()))?;
                toml::from_str::<RoimapConfig>(&raw)
                    .with_context(|| format!("failed to parse config file {}", p.display()))?
            }
            None => RoimapConfig::default(),
        };

        config
            .validate()
            .map_err(|message| anyhow::anyhow!("invalid configuration: {message}"))?;
        Ok(config)
    }
}
