//! Variable platform fee resolution.
//!
//! The premium plan's subscription is usage-based: a percentage of monthly
//! GMV split across sales channels, charged only when it exceeds the flat
//! minimum for the selected term. The resolution produced here is the
//! single source of "premium monthly cost" for every downstream figure.

use crate::core::{ChannelFeeRate, ChannelMix};
use serde::{Deserialize, Serialize};

/// Monthly variable-fee amounts per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerChannelFee {
    pub d2c: f64,
    pub b2b: f64,
    pub retail: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VpfResolution {
    pub per_channel: PerChannelFee,
    /// Sum of the per-channel fees before applying the minimum.
    pub computed_vpf: f64,
    /// Greater of the computed fee and the flat minimum. This is the
    /// effective monthly cost of the premium plan.
    pub effective_cost: f64,
}

/// Resolve the effective monthly premium-plan cost.
///
/// The billing term must already be resolved: `flat_minimum` and the D2C
/// entry of `rates` are both term-dependent (`rates::term_pricing`).
pub fn resolve_effective_cost(
    annual_sales: f64,
    mix: &ChannelMix,
    rates: &ChannelFeeRate,
    flat_minimum: f64,
) -> VpfResolution {
    let monthly_gmv = annual_sales / 12.0;
    let channel_fee = |percent: u32, rate: f64| {
        let channel_gmv = monthly_gmv * f64::from(percent) / 100.0;
        channel_gmv * rate / 100.0
    };

    let per_channel = PerChannelFee {
        d2c: channel_fee(mix.d2c, rates.d2c),
        b2b: channel_fee(mix.b2b, rates.b2b),
        retail: channel_fee(mix.retail, rates.retail),
    };
    let computed_vpf = per_channel.d2c + per_channel.b2b + per_channel.retail;

    VpfResolution {
        per_channel,
        computed_vpf,
        effective_cost: computed_vpf.max(flat_minimum),
    }
}
