//! Channel-mix redistribution.
//!
//! When one channel's share is edited, the other two are scaled to their
//! prior ratio so the mix keeps summing to exactly 100. Integer rounding
//! can leave a one-point residual; it is absorbed into the last-computed
//! channel rather than dropped.

use crate::core::{Channel, ChannelMix};

/// Set one channel's share and redistribute the other two.
///
/// `new_value` is clamped to [0, 100]. If both remaining channels were
/// previously zero the remainder is split evenly.
pub fn set_primary(mix: &ChannelMix, channel: Channel, new_value: u32) -> ChannelMix {
    let new_value = new_value.min(100);
    let remainder = 100 - new_value;

    let (first, second) = match channel {
        Channel::D2c => (mix.b2b, mix.retail),
        Channel::B2b => (mix.d2c, mix.retail),
        Channel::Retail => (mix.d2c, mix.b2b),
    };

    let prior_sum = first + second;
    let (first, second) = if prior_sum == 0 {
        // Even split; an odd remainder leaves the extra point on the
        // last-computed channel.
        (remainder / 2, remainder - remainder / 2)
    } else {
        let scaled_first = (f64::from(remainder) * f64::from(first) / f64::from(prior_sum)).round()
            as u32;
        let scaled_first = scaled_first.min(remainder);
        (scaled_first, remainder - scaled_first)
    };

    match channel {
        Channel::D2c => ChannelMix::new(new_value, first, second),
        Channel::B2b => ChannelMix::new(first, new_value, second),
        Channel::Retail => ChannelMix::new(first, second, new_value),
    }
}
