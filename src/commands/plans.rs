//! The `plans` command: static plan-comparison table.

use crate::core::BillingTerm;
use crate::formatting::{format_currency, format_percent, FormattingConfig};
use crate::rates::{self, PLAN_COMPARISON};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

pub fn print_plans(formatting: FormattingConfig) -> Result<()> {
    formatting.apply();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Plan",
        "Domestic",
        "International",
        "Premium card",
        "Installments",
        "Per txn",
        "Monthly (1-yr)",
        "Monthly (3-yr)",
    ]);

    for (tier, schedule) in PLAN_COMPARISON.iter() {
        table.add_row(vec![
            Cell::new(tier.display_name()),
            Cell::new(format_percent(schedule.standard_domestic_rate)),
            Cell::new(format_percent(schedule.standard_international_rate)),
            Cell::new(format_percent(schedule.premium_domestic_rate)),
            Cell::new(format_percent(schedule.installment_rate)),
            Cell::new(format_currency(schedule.per_transaction_fee)),
            Cell::new(format_currency(rates::base_monthly_cost(
                *tier,
                BillingTerm::OneYear,
            ))),
            Cell::new(format_currency(rates::base_monthly_cost(
                *tier,
                BillingTerm::ThreeYear,
            ))),
        ]);
    }

    println!("{table}");
    println!("Plus is billed at the greater of the flat minimum and the variable platform fee.");
    Ok(())
}
