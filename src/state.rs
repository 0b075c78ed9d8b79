//! Shared calculation state.
//!
//! One snapshot of all inputs and last-computed outputs, read by every
//! display surface so independently rendered views agree on the numbers.
//! All writes go through `merge`, which only touches the fields a patch
//! actually sets. The store is an explicit value passed to whoever needs
//! it; nothing here is global.
//!
//! Two update cadences exist and must stay separate: `refresh_reactive`
//! recomputes the cheap derived values that track every input edit (the
//! normalized channel mix, the effective premium cost), while
//! `recalculate` produces the headline ROI figures only when explicitly
//! asked, so readers never see half-updated totals.

use crate::calc::{
    self, FeeComparison, FunnelAnalysis, PlanCosts, RoiSummary, UpliftBasis, VpfResolution,
};
use crate::core::{
    BillingTerm, ChannelFeeRate, ChannelMix, PlanTier, UpliftProjection, UpliftScenarioConfig,
};
use crate::rates;
use serde::{Deserialize, Serialize};

/// Current inputs plus last-computed outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    // Inputs
    pub annual_sales: f64,
    pub current_tier: PlanTier,
    pub term: BillingTerm,
    pub assumed_aov: f64,
    /// Conversion rate in percent.
    pub conversion_rate: f64,
    pub current_monthly_cost: f64,
    pub mix: ChannelMix,
    pub channel_rates: ChannelFeeRate,
    pub scenarios: UpliftScenarioConfig,
    pub funnel_reached: Option<f64>,
    pub funnel_completed: Option<f64>,

    // Reactive outputs, refreshed on every input change
    pub vpf: Option<VpfResolution>,

    // Explicit outputs, written only by `recalculate`
    pub fees: Option<FeeComparison>,
    pub uplift: Option<UpliftProjection>,
    pub funnel: Option<FunnelAnalysis>,
    pub summary: Option<RoiSummary>,
}

impl Default for CalculatorSnapshot {
    fn default() -> Self {
        let term = BillingTerm::ThreeYear;
        Self {
            annual_sales: 1_500_000.0,
            current_tier: PlanTier::Advanced,
            term,
            assumed_aov: 120.0,
            conversion_rate: 2.5,
            current_monthly_cost: rates::base_monthly_cost(PlanTier::Advanced, term),
            mix: ChannelMix::default(),
            channel_rates: rates::default_channel_rates(term),
            scenarios: UpliftScenarioConfig::default(),
            funnel_reached: None,
            funnel_completed: None,
            vpf: None,
            fees: None,
            uplift: None,
            funnel: None,
            summary: None,
        }
    }
}

impl CalculatorSnapshot {
    /// The uplift basis implied by the available inputs: real funnel
    /// counts when present, the derived-visitor model otherwise.
    pub fn uplift_basis(&self) -> UpliftBasis {
        match (self.funnel_reached, self.funnel_completed) {
            (Some(reached), Some(completed)) if reached > 0.0 => UpliftBasis::Funnel {
                reached_checkout: reached,
                completed_checkout: completed,
            },
            _ => UpliftBasis::Derived {
                annual_sales: self.annual_sales,
            },
        }
    }
}

/// Partial update: only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPatch {
    pub annual_sales: Option<f64>,
    pub current_tier: Option<PlanTier>,
    pub term: Option<BillingTerm>,
    pub assumed_aov: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub current_monthly_cost: Option<f64>,
    pub mix: Option<ChannelMix>,
    pub channel_rates: Option<ChannelFeeRate>,
    pub scenarios: Option<UpliftScenarioConfig>,
    pub funnel_reached: Option<Option<f64>>,
    pub funnel_completed: Option<Option<f64>>,
    pub vpf: Option<VpfResolution>,
    pub fees: Option<FeeComparison>,
    pub uplift: Option<UpliftProjection>,
    pub funnel: Option<FunnelAnalysis>,
    pub summary: Option<RoiSummary>,
}

/// The injectable store every consumer reads from.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshot: CalculatorSnapshot,
}

impl SnapshotStore {
    pub fn new(snapshot: CalculatorSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &CalculatorSnapshot {
        &self.snapshot
    }

    /// Apply a partial update. Fields the patch leaves unset keep their
    /// current value; merge, never replace.
    pub fn merge(&mut self, patch: SnapshotPatch) {
        let s = &mut self.snapshot;
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    s.$field = value;
                })*
            };
        }
        apply!(
            annual_sales,
            current_tier,
            term,
            assumed_aov,
            conversion_rate,
            current_monthly_cost,
            mix,
            channel_rates,
            scenarios,
            funnel_reached,
            funnel_completed,
        );
        // Output fields live behind an extra Option in the snapshot; a
        // patch can set them but never clear them (recalculate overwrites).
        macro_rules! apply_output {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    s.$field = Some(value);
                })*
            };
        }
        apply_output!(vpf, fees, uplift, funnel, summary);
    }

    /// Change the billing term.
    ///
    /// Term selection also rewrites the D2C channel rate (current business
    /// behavior, carried over as-is pending product confirmation) and
    /// refreshes the reactive values that depend on both.
    pub fn set_term(&mut self, term: BillingTerm) {
        let mut rates_patch = self.snapshot.channel_rates;
        rates_patch.d2c = rates::term_pricing(term).d2c_rate;
        log::debug!(
            "term change to {term} adjusts d2c rate to {:.2}%",
            rates_patch.d2c
        );
        self.merge(SnapshotPatch {
            term: Some(term),
            channel_rates: Some(rates_patch),
            ..Default::default()
        });
        self.refresh_reactive();
    }

    /// Recompute the reactive derived values (VPF effective cost). Runs on
    /// every input change; headline totals are untouched.
    pub fn refresh_reactive(&mut self) {
        let s = &self.snapshot;
        let pricing = rates::term_pricing(s.term);
        let vpf = calc::resolve_effective_cost(
            s.annual_sales,
            &s.mix,
            &s.channel_rates,
            pricing.flat_minimum,
        );
        self.merge(SnapshotPatch {
            vpf: Some(vpf),
            ..Default::default()
        });
    }

    /// Explicit recompute: runs every calculator and merges the results in
    /// one shot, so views never observe a partially updated set of totals.
    pub fn recalculate(&mut self) {
        self.refresh_reactive();
        let s = &self.snapshot;
        // refresh_reactive just ran, vpf is always present here
        let vpf = s.vpf.unwrap_or_else(|| {
            calc::resolve_effective_cost(
                s.annual_sales,
                &s.mix,
                &s.channel_rates,
                rates::term_pricing(s.term).flat_minimum,
            )
        });

        let fees = calc::fee_comparison(s.annual_sales, s.current_tier, s.assumed_aov);
        let performance = calc::CurrentPerformance {
            conversion_rate: s.conversion_rate,
            aov: s.assumed_aov,
        };
        let uplift = calc::project(&s.uplift_basis(), &performance, &s.scenarios);
        let funnel = match (s.funnel_reached, s.funnel_completed) {
            (Some(reached), Some(completed)) => {
                Some(calc::analyze(reached, completed, s.assumed_aov))
            }
            _ => None,
        };
        let costs = PlanCosts {
            current_monthly: s.current_monthly_cost,
            plus_monthly_effective: vpf.effective_cost,
        };
        let summary = calc::aggregate(&fees, &vpf, &uplift, &costs);

        self.merge(SnapshotPatch {
            fees: Some(fees),
            uplift: Some(uplift),
            summary: Some(summary),
            ..Default::default()
        });
        // recalculate owns every output; when the funnel counts have been
        // removed the stale analysis must go with them.
        self.snapshot.funnel = funnel;
    }

    /// Plan costs from the current snapshot; the premium side is always
    /// the resolved VPF effective cost.
    pub fn plan_costs(&self) -> Option<PlanCosts> {
        self.snapshot.vpf.map(|vpf| PlanCosts {
            current_monthly: self.snapshot.current_monthly_cost,
            plus_monthly_effective: vpf.effective_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channel;

    #[test]
    fn test_merge_leaves_unset_fields_alone() {
        let mut store = SnapshotStore::default();
        let before = store.snapshot().clone();
        store.merge(SnapshotPatch {
            annual_sales: Some(2_000_000.0),
            ..Default::default()
        });
        let after = store.snapshot();
        assert_eq!(after.annual_sales, 2_000_000.0);
        assert_eq!(after.current_tier, before.current_tier);
        assert_eq!(after.mix, before.mix);
        assert_eq!(after.scenarios, before.scenarios);
    }

    #[test]
    fn test_refresh_reactive_sets_vpf_only() {
        let mut store = SnapshotStore::default();
        store.refresh_reactive();
        assert!(store.snapshot().vpf.is_some());
        assert!(store.snapshot().summary.is_none());
        assert!(store.snapshot().fees.is_none());
    }

    #[test]
    fn test_recalculate_fills_all_outputs() {
        let mut store = SnapshotStore::default();
        store.merge(SnapshotPatch {
            funnel_reached: Some(Some(120_000.0)),
            funnel_completed: Some(Some(100_000.0)),
            ..Default::default()
        });
        store.recalculate();
        let s = store.snapshot();
        assert!(s.vpf.is_some());
        assert!(s.fees.is_some());
        assert!(s.uplift.is_some());
        assert!(s.funnel.is_some());
        assert!(s.summary.is_some());
    }

    #[test]
    fn test_recalculate_drops_funnel_when_counts_removed() {
        let mut store = SnapshotStore::default();
        store.merge(SnapshotPatch {
            funnel_reached: Some(Some(120_000.0)),
            funnel_completed: Some(Some(100_000.0)),
            ..Default::default()
        });
        store.recalculate();
        assert!(store.snapshot().funnel.is_some());
        store.merge(SnapshotPatch {
            funnel_reached: Some(None),
            funnel_completed: Some(None),
            ..Default::default()
        });
        store.recalculate();
        assert!(store.snapshot().funnel.is_none());
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut store = SnapshotStore::default();
        store.recalculate();
        let first = store.snapshot().clone();
        store.recalculate();
        assert_eq!(&first, store.snapshot());
    }

    #[test]
    fn test_set_term_recouples_d2c_rate() {
        let mut store = SnapshotStore::default();
        store.set_term(BillingTerm::OneYear);
        let s = store.snapshot();
        assert_eq!(s.term, BillingTerm::OneYear);
        assert_eq!(
            s.channel_rates.d2c,
            rates::term_pricing(BillingTerm::OneYear).d2c_rate
        );
        // Reactive value tracked the change.
        let vpf = s.vpf.expect("set_term refreshes the vpf");
        assert_eq!(
            vpf.effective_cost.max(rates::term_pricing(s.term).flat_minimum),
            vpf.effective_cost
        );
    }

    #[test]
    fn test_consumers_agree_on_premium_cost() {
        let mut store = SnapshotStore::default();
        store.recalculate();
        let s = store.snapshot();
        let costs = store.plan_costs().unwrap();
        assert_eq!(costs.plus_monthly_effective, s.vpf.unwrap().effective_cost);
    }

    #[test]
    fn test_uplift_basis_prefers_funnel_counts() {
        let mut snapshot = CalculatorSnapshot::default();
        assert!(!snapshot.uplift_basis().is_funnel());
        snapshot.funnel_reached = Some(120_000.0);
        snapshot.funnel_completed = Some(100_000.0);
        assert!(snapshot.uplift_basis().is_funnel());
    }

    #[test]
    fn test_mix_update_flows_through_store() {
        let mut store = SnapshotStore::default();
        let updated = crate::calc::set_primary(&store.snapshot().mix, Channel::D2c, 40);
        store.merge(SnapshotPatch {
            mix: Some(updated),
            ..Default::default()
        });
        store.refresh_reactive();
        assert_eq!(store.snapshot().mix.total(), 100);
        assert!(store.snapshot().vpf.is_some());
    }
}
