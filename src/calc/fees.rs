//! Processing-fee cost model.
//!
//! Fees are computed from annual sales volume, the plan's standard domestic
//! rate, and a per-transaction fee applied to a transaction count derived
//! from an assumed average order value.

use crate::core::{PlanRateSchedule, PlanTier};
use crate::rates::{self, FALLBACK_AOV};
use serde::{Deserialize, Serialize};

/// Annual processing-fee cost under one plan's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Percentage-rate portion (volume x domestic rate).
    pub plan_fee: f64,
    /// Fixed per-transaction portion.
    pub per_transaction_total: f64,
    pub total: f64,
}

/// Annual fee cost on the current plan vs. the premium plan, same volume
/// and AOV assumption on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeComparison {
    pub current: FeeBreakdown,
    pub plus: FeeBreakdown,
    /// Annual savings from the rate difference. Negative when the current
    /// schedule is already cheaper.
    pub savings: f64,
}

fn effective_aov(assumed_aov: f64) -> f64 {
    if assumed_aov > 0.0 {
        assumed_aov
    } else {
        FALLBACK_AOV
    }
}

/// Annual processing fees for one plan.
///
/// `assumed_aov <= 0` substitutes [`FALLBACK_AOV`] so the transaction-count
/// division can never blow up.
pub fn processing_fees(
    annual_sales: f64,
    schedule: &PlanRateSchedule,
    assumed_aov: f64,
) -> FeeBreakdown {
    let aov = effective_aov(assumed_aov);
    let transaction_count = annual_sales / aov;
    let plan_fee = annual_sales * (schedule.standard_domestic_rate / 100.0);
    let per_transaction_total = transaction_count * schedule.per_transaction_fee;
    FeeBreakdown {
        plan_fee,
        per_transaction_total,
        total: plan_fee + per_transaction_total,
    }
}

/// Compare the current tier's fees against the premium tier's at the same
/// volume and AOV.
pub fn fee_comparison(annual_sales: f64, current_tier: PlanTier, assumed_aov: f64) -> FeeComparison {
    let current = processing_fees(annual_sales, &rates::schedule_for(current_tier), assumed_aov);
    let plus = processing_fees(annual_sales, &rates::schedule_for(PlanTier::Plus), assumed_aov);
    FeeComparison {
        current,
        plus,
        savings: current.total - plus.total,
    }
}
