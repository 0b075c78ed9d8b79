//! Checkout-funnel analysis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelAnalysis {
    /// Share of started checkouts that never completed, in percent.
    pub drop_off_rate: f64,
    /// Revenue walked away with the abandoned sessions.
    pub lost_revenue: f64,
}

/// Drop-off rate and estimated lost revenue for a checkout funnel.
///
/// Callers are expected to clamp `completed <= reached` at the input
/// boundary; a caller that doesn't gets a negative drop-off back as a
/// signal of bad input rather than a silently corrected figure.
pub fn analyze(reached: f64, completed: f64, aov: f64) -> FunnelAnalysis {
    let abandoned = reached - completed;
    let drop_off_rate = if reached > 0.0 {
        abandoned / reached * 100.0
    } else {
        0.0
    };
    FunnelAnalysis {
        drop_off_rate,
        lost_revenue: abandoned * aov,
    }
}
