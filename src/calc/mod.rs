//! The calculation core: pure formulas, no IO, no hidden state.

pub mod aggregate;
pub mod fees;
pub mod funnel;
pub mod mix;
pub mod scenario;
pub mod uplift;
pub mod vpf;

pub use aggregate::{aggregate, cumulative_position, MonthPoint, PlanCosts, RoiSummary};
pub use fees::{fee_comparison, processing_fees, FeeBreakdown, FeeComparison};
pub use funnel::{analyze, FunnelAnalysis};
pub use mix::set_primary;
pub use scenario::set_percent;
pub use uplift::{project, CurrentPerformance, UpliftBasis};
pub use vpf::{resolve_effective_cost, PerChannelFee, VpfResolution};
