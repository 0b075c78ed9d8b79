//! Common type definitions used across the estimator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tiers offered by the platform.
///
/// A closed enumeration rather than string keys so that rate-table lookups
/// are exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Basic,
    Grow,
    Advanced,
    Plus,
}

impl PlanTier {
    /// Get the display name for this tier
    pub fn display_name(&self) -> &str {
        match self {
            PlanTier::Basic => "Basic",
            PlanTier::Grow => "Grow",
            PlanTier::Advanced => "Advanced",
            PlanTier::Plus => "Plus",
        }
    }

    /// All tiers in ascending order of capability
    pub fn all() -> [PlanTier; 4] {
        [
            PlanTier::Basic,
            PlanTier::Grow,
            PlanTier::Advanced,
            PlanTier::Plus,
        ]
    }

    /// True for the premium tier the estimator projects an upgrade to
    pub fn is_premium(&self) -> bool {
        matches!(self, PlanTier::Plus)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Billing commitment term for the premium plan.
///
/// Resolving the term must happen before the variable platform fee is
/// computed: it selects the flat minimum and, per current business rules,
/// also adjusts the D2C channel rate (see `rates::term_pricing`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingTerm {
    OneYear,
    ThreeYear,
}

impl BillingTerm {
    pub fn display_name(&self) -> &str {
        match self {
            BillingTerm::OneYear => "1-year",
            BillingTerm::ThreeYear => "3-year",
        }
    }
}

impl fmt::Display for BillingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-plan processing fee schedule. All rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRateSchedule {
    pub standard_domestic_rate: f64,
    pub standard_international_rate: f64,
    pub premium_domestic_rate: f64,
    pub premium_international_rate: f64,
    pub installment_rate: f64,
    pub per_transaction_fee: f64,
}

/// Sales channels the estimator splits gross volume across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    D2c,
    B2b,
    Retail,
}

impl Channel {
    pub fn display_name(&self) -> &str {
        match self {
            Channel::D2c => "D2C",
            Channel::B2b => "B2B",
            Channel::Retail => "Retail",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How annual gross volume is split across channels, in whole percentages.
///
/// Invariant: `d2c + b2b + retail == 100`. Updates go through
/// `calc::mix::set_primary`, which redistributes the other two channels
/// proportionally and absorbs any rounding residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMix {
    pub d2c: u32,
    pub b2b: u32,
    pub retail: u32,
}

impl ChannelMix {
    pub fn new(d2c: u32, b2b: u32, retail: u32) -> Self {
        Self { d2c, b2b, retail }
    }

    pub fn get(&self, channel: Channel) -> u32 {
        match channel {
            Channel::D2c => self.d2c,
            Channel::B2b => self.b2b,
            Channel::Retail => self.retail,
        }
    }

    /// Saturating so that absurd percentages from an inputs file cannot
    /// wrap back into a plausible total.
    pub fn total(&self) -> u32 {
        self.d2c.saturating_add(self.b2b).saturating_add(self.retail)
    }
}

impl Default for ChannelMix {
    fn default() -> Self {
        Self {
            d2c: 70,
            b2b: 20,
            retail: 10,
        }
    }
}

/// Per-channel variable platform fee rates, percentages of channel GMV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelFeeRate {
    pub d2c: f64,
    pub b2b: f64,
    pub retail: f64,
}

impl ChannelFeeRate {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::D2c => self.d2c,
            Channel::B2b => self.b2b,
            Channel::Retail => self.retail,
        }
    }
}

/// Improvement percentages for the three named uplift scenarios.
///
/// Invariant: `low < average < good`, each within [1, 30]. Enforced by
/// `calc::scenario::set_percent`, not by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpliftScenarioConfig {
    pub low: u32,
    pub average: u32,
    pub good: u32,
}

impl UpliftScenarioConfig {
    pub fn is_ordered(&self) -> bool {
        self.low < self.average && self.average < self.good
    }

    pub fn in_bounds(&self) -> bool {
        let ok = |v: u32| (1..=30).contains(&v);
        ok(self.low) && ok(self.average) && ok(self.good)
    }
}

impl Default for UpliftScenarioConfig {
    fn default() -> Self {
        Self {
            low: 5,
            average: 10,
            good: 15,
        }
    }
}

/// Which scenario field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioField {
    Low,
    Average,
    Good,
}

/// Monthly incremental revenue under each improvement scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpliftProjection {
    pub low: f64,
    pub average: f64,
    pub good: f64,
}

/// First month at which cumulative fee savings offset the incremental
/// subscription cost, or a distinguished "not applicable" when there is no
/// finite break-even. Never `Infinity`, `NaN`, or a negative month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Month(u32),
    NotApplicable,
}

impl BreakEven {
    pub fn is_applicable(&self) -> bool {
        matches!(self, BreakEven::Month(_))
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Month(m) => write!(f, "month {m}"),
            BreakEven::NotApplicable => f.write_str("n/a"),
        }
    }
}
