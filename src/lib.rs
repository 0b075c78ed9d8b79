// Export modules for library usage
pub mod calc;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod input;
pub mod io;
pub mod rates;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    BillingTerm, BreakEven, Channel, ChannelFeeRate, ChannelMix, PlanRateSchedule, PlanTier,
    ScenarioField, UpliftProjection, UpliftScenarioConfig,
};

pub use crate::calc::{
    aggregate, analyze, cumulative_position, fee_comparison, processing_fees, project,
    resolve_effective_cost, set_percent, set_primary, CurrentPerformance, FeeBreakdown,
    FeeComparison, FunnelAnalysis, MonthPoint, PlanCosts, RoiSummary, UpliftBasis, VpfResolution,
};

pub use crate::state::{CalculatorSnapshot, SnapshotPatch, SnapshotStore};

pub use crate::io::output::{create_writer, EstimateReport, OutputFormat, OutputWriter};
