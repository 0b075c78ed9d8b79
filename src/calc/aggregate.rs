//! Top-level ROI aggregation.
//!
//! Combines the fee comparison, the resolved premium cost, and the uplift
//! projection into the headline figures: annual fee savings, net savings
//! after the plan-cost delta, and the break-even month.

use crate::calc::fees::FeeComparison;
use crate::calc::vpf::VpfResolution;
use crate::core::{BreakEven, UpliftProjection};
use serde::{Deserialize, Serialize};

/// Monthly subscription costs on both sides of the upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanCosts {
    pub current_monthly: f64,
    /// Effective premium cost from the VPF resolution; callers must pass
    /// the resolved value, never a re-derived one.
    pub plus_monthly_effective: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub annual_fee_savings: f64,
    pub annual_net_savings: f64,
    pub break_even: BreakEven,
}

/// A point on the cumulative net-position line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub month: u32,
    pub cumulative_net: f64,
}

/// Combine the per-component results into the headline totals.
///
/// Pure: identical inputs always aggregate to identical outputs.
pub fn aggregate(
    fees: &FeeComparison,
    vpf: &VpfResolution,
    _uplift: &UpliftProjection,
    costs: &PlanCosts,
) -> RoiSummary {
    debug_assert_eq!(costs.plus_monthly_effective, vpf.effective_cost);

    let annual_fee_savings = fees.savings;
    let extra_monthly_cost = costs.plus_monthly_effective - costs.current_monthly;
    let annual_net_savings = annual_fee_savings - extra_monthly_cost * 12.0;

    RoiSummary {
        annual_fee_savings,
        annual_net_savings,
        break_even: break_even_month(annual_fee_savings / 12.0, extra_monthly_cost),
    }
}

/// Break-even month, or the "not applicable" sentinel when fee savings
/// never materialize or the upgrade costs nothing extra.
fn break_even_month(monthly_fee_savings: f64, extra_monthly_cost: f64) -> BreakEven {
    if monthly_fee_savings <= 0.0 || extra_monthly_cost <= 0.0 {
        return BreakEven::NotApplicable;
    }
    let months = (extra_monthly_cost / monthly_fee_savings).ceil();
    BreakEven::Month(months as u32)
}

/// Cumulative net position over `months` months, the series behind the
/// savings chart: fee savings accrue monthly, the plan-cost delta is paid
/// monthly.
pub fn cumulative_position(summary: &RoiSummary, costs: &PlanCosts, months: u32) -> Vec<MonthPoint> {
    let monthly_fee_savings = summary.annual_fee_savings / 12.0;
    let extra_monthly_cost = costs.plus_monthly_effective - costs.current_monthly;
    let monthly_net = monthly_fee_savings - extra_monthly_cost;
    (1..=months)
        .map(|month| MonthPoint {
            month,
            cumulative_net: monthly_net * f64::from(month),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::fees::FeeBreakdown;
    use crate::calc::vpf::PerChannelFee;

    fn fees_with_savings(savings: f64) -> FeeComparison {
        let zero = FeeBreakdown {
            plan_fee: 0.0,
            per_transaction_total: 0.0,
            total: 0.0,
        };
        FeeComparison {
            current: FeeBreakdown {
                total: savings,
                ..zero
            },
            plus: zero,
            savings,
        }
    }

    fn vpf_with_effective(effective: f64) -> VpfResolution {
        VpfResolution {
            per_channel: PerChannelFee {
                d2c: 0.0,
                b2b: 0.0,
                retail: 0.0,
            },
            computed_vpf: 0.0,
            effective_cost: effective,
        }
    }

    fn no_uplift() -> UpliftProjection {
        UpliftProjection {
            low: 0.0,
            average: 0.0,
            good: 0.0,
        }
    }

    #[test]
    fn test_net_savings_subtracts_plan_cost_delta() {
        let costs = PlanCosts {
            current_monthly: 300.0,
            plus_monthly_effective: 2300.0,
        };
        let summary = aggregate(
            &fees_with_savings(60_000.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.annual_fee_savings, 60_000.0);
        assert_eq!(summary.annual_net_savings, 60_000.0 - 2_000.0 * 12.0);
    }

    #[test]
    fn test_break_even_ceiling() {
        let costs = PlanCosts {
            current_monthly: 300.0,
            plus_monthly_effective: 2300.0,
        };
        // Monthly savings 5_000 against 2_000 extra cost: one month.
        let summary = aggregate(
            &fees_with_savings(60_000.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.break_even, BreakEven::Month(1));

        // Monthly savings 700 against 2_000 extra cost: ceil(2.857) = 3.
        let summary = aggregate(
            &fees_with_savings(8_400.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.break_even, BreakEven::Month(3));
    }

    #[test]
    fn test_no_savings_means_no_break_even() {
        let costs = PlanCosts {
            current_monthly: 300.0,
            plus_monthly_effective: 2300.0,
        };
        let summary = aggregate(
            &fees_with_savings(0.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.break_even, BreakEven::NotApplicable);

        let summary = aggregate(
            &fees_with_savings(-5_000.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.break_even, BreakEven::NotApplicable);
    }

    #[test]
    fn test_cheaper_premium_plan_means_no_break_even() {
        let costs = PlanCosts {
            current_monthly: 2_500.0,
            plus_monthly_effective: 2_300.0,
        };
        let summary = aggregate(
            &fees_with_savings(12_000.0),
            &vpf_with_effective(2_300.0),
            &no_uplift(),
            &costs,
        );
        assert_eq!(summary.break_even, BreakEven::NotApplicable);
        // Savings on both fronts: net beats gross.
        assert!(summary.annual_net_savings > summary.annual_fee_savings);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let costs = PlanCosts {
            current_monthly: 300.0,
            plus_monthly_effective: 2300.0,
        };
        let fees = fees_with_savings(42_000.0);
        let vpf = vpf_with_effective(2300.0);
        let first = aggregate(&fees, &vpf, &no_uplift(), &costs);
        let second = aggregate(&fees, &vpf, &no_uplift(), &costs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cumulative_position_is_linear() {
        let costs = PlanCosts {
            current_monthly: 300.0,
            plus_monthly_effective: 2300.0,
        };
        let summary = aggregate(
            &fees_with_savings(60_000.0),
            &vpf_with_effective(2300.0),
            &no_uplift(),
            &costs,
        );
        let line = cumulative_position(&summary, &costs, 12);
        assert_eq!(line.len(), 12);
        assert_eq!(line[0].month, 1);
        // 5_000 saved minus 2_000 extra cost per month.
        assert!((line[0].cumulative_net - 3_000.0).abs() < 1e-9);
        assert!((line[11].cumulative_net - 36_000.0).abs() < 1e-9);
    }
}
