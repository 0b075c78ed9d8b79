pub mod types;

pub use types::{
    BillingTerm, BreakEven, Channel, ChannelFeeRate, ChannelMix, PlanRateSchedule, PlanTier,
    ScenarioField, UpliftProjection, UpliftScenarioConfig,
};
