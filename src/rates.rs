//! Static per-plan fee schedules and term pricing.
//!
//! Pure data. Callers receive fresh values so inline edits (custom rates in
//! an inputs file) never mutate the shared defaults.

use crate::core::{BillingTerm, ChannelFeeRate, PlanRateSchedule, PlanTier};
use once_cell::sync::Lazy;

/// Assumed average order value when the merchant supplies none (or zero),
/// used to derive a transaction count without dividing by zero.
pub const FALLBACK_AOV: f64 = 50.0;

/// Processing-fee schedule for a plan tier.
pub fn schedule_for(tier: PlanTier) -> PlanRateSchedule {
    match tier {
        PlanTier::Basic => PlanRateSchedule {
            standard_domestic_rate: 2.9,
            standard_international_rate: 3.9,
            premium_domestic_rate: 3.5,
            premium_international_rate: 4.5,
            installment_rate: 5.9,
            per_transaction_fee: 0.30,
        },
        PlanTier::Grow => PlanRateSchedule {
            standard_domestic_rate: 2.7,
            standard_international_rate: 3.7,
            premium_domestic_rate: 3.3,
            premium_international_rate: 4.3,
            installment_rate: 5.7,
            per_transaction_fee: 0.30,
        },
        PlanTier::Advanced => PlanRateSchedule {
            standard_domestic_rate: 2.5,
            standard_international_rate: 3.5,
            premium_domestic_rate: 3.1,
            premium_international_rate: 4.1,
            installment_rate: 5.5,
            per_transaction_fee: 0.30,
        },
        PlanTier::Plus => PlanRateSchedule {
            standard_domestic_rate: 2.25,
            standard_international_rate: 3.25,
            premium_domestic_rate: 2.95,
            premium_international_rate: 3.95,
            installment_rate: 5.0,
            per_transaction_fee: 0.30,
        },
    }
}

/// Pricing levers selected by the billing term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermPricing {
    /// Flat minimum monthly cost of the premium plan.
    pub flat_minimum: f64,
    /// D2C variable-fee rate under this term.
    ///
    /// NOTE: the term changing both the flat minimum AND the D2C rate is
    /// current business behavior carried over as-is; product has been asked
    /// to confirm whether the coupling is intentional (see DESIGN.md).
    pub d2c_rate: f64,
}

/// Resolve term-dependent pricing. Must run before the VPF resolver so the
/// flat minimum and channel rates it feeds are consistent.
pub fn term_pricing(term: BillingTerm) -> TermPricing {
    match term {
        BillingTerm::OneYear => TermPricing {
            flat_minimum: 2500.0,
            d2c_rate: 0.40,
        },
        BillingTerm::ThreeYear => TermPricing {
            flat_minimum: 2300.0,
            d2c_rate: 0.35,
        },
    }
}

/// Default per-channel variable-fee rates for a term. The D2C rate tracks
/// the term; B2B and retail rates do not.
pub fn default_channel_rates(term: BillingTerm) -> ChannelFeeRate {
    ChannelFeeRate {
        d2c: term_pricing(term).d2c_rate,
        b2b: 0.18,
        retail: 0.25,
    }
}

/// Base monthly subscription cost by tier and term. The premium tier is
/// priced by its flat minimum; the effective cost may be higher once the
/// variable platform fee is resolved against actual volume.
pub fn base_monthly_cost(tier: PlanTier, term: BillingTerm) -> f64 {
    match (tier, term) {
        (PlanTier::Basic, BillingTerm::OneYear) => 39.0,
        (PlanTier::Basic, BillingTerm::ThreeYear) => 29.0,
        (PlanTier::Grow, BillingTerm::OneYear) => 105.0,
        (PlanTier::Grow, BillingTerm::ThreeYear) => 79.0,
        (PlanTier::Advanced, BillingTerm::OneYear) => 399.0,
        (PlanTier::Advanced, BillingTerm::ThreeYear) => 299.0,
        (PlanTier::Plus, term) => term_pricing(term).flat_minimum,
    }
}

/// Rows for the static plan-comparison table, in ascending tier order.
pub static PLAN_COMPARISON: Lazy<Vec<(PlanTier, PlanRateSchedule)>> = Lazy::new(|| {
    PlanTier::all()
        .into_iter()
        .map(|tier| (tier, schedule_for(tier)))
        .collect()
});
