//! Report writers: terminal, JSON, and markdown renderings of one
//! estimate. Every writer reads the same snapshot, so the numbers agree
//! across formats by construction.

use crate::calc::MonthPoint;
use crate::core::BreakEven;
use crate::formatting::{format_currency, format_percent, FormattingConfig};
use crate::state::CalculatorSnapshot;
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything a writer needs to render one estimate.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub generated_at: DateTime<Utc>,
    pub snapshot: CalculatorSnapshot,
    /// Cumulative net position per month, for the chart.
    pub cumulative: Vec<MonthPoint>,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Plan Upgrade ROI Estimate")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let s = &report.snapshot;
        writeln!(self.writer, "## Headline")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Current plan | {} ({} term) |",
            s.current_tier, s.term
        )?;
        writeln!(
            self.writer,
            "| Annual sales | {} |",
            format_currency(s.annual_sales)
        )?;
        if let Some(summary) = &s.summary {
            writeln!(
                self.writer,
                "| Annual fee savings | {} |",
                format_currency(summary.annual_fee_savings)
            )?;
            writeln!(
                self.writer,
                "| Annual net savings | {} |",
                format_currency(summary.annual_net_savings)
            )?;
            writeln!(self.writer, "| Break-even | {} |", summary.break_even)?;
        }
        if let Some(vpf) = &s.vpf {
            writeln!(
                self.writer,
                "| Effective Plus monthly cost | {} |",
                format_currency(vpf.effective_cost)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_uplift(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let s = &report.snapshot;
        let Some(uplift) = &s.uplift else {
            return Ok(());
        };
        writeln!(self.writer, "## Revenue Uplift (monthly)")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Scenario | Improvement | Uplift |")?;
        writeln!(self.writer, "|----------|-------------|--------|")?;
        for (name, percent, value) in [
            ("Low", s.scenarios.low, uplift.low),
            ("Average", s.scenarios.average, uplift.average),
            ("Good", s.scenarios.good, uplift.good),
        ] {
            writeln!(
                self.writer,
                "| {name} | +{percent}% | {} |",
                format_currency(value)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_funnel(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        let Some(funnel) = &report.snapshot.funnel else {
            return Ok(());
        };
        writeln!(self.writer, "## Checkout Funnel")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- Drop-off rate: {}",
            format_percent(funnel.drop_off_rate)
        )?;
        writeln!(
            self.writer,
            "- Estimated lost revenue: {}",
            format_currency(funnel.lost_revenue)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_chart(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        if report.cumulative.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Cumulative Net Position")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Month | Net |")?;
        writeln!(self.writer, "|-------|-----|")?;
        for point in &report.cumulative {
            writeln!(
                self.writer,
                "| {} | {} |",
                point.month,
                format_currency(point.cumulative_net)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_uplift(report)?;
        self.write_funnel(report)?;
        self.write_chart(report)?;
        Ok(())
    }
}

pub struct TerminalWriter {
    formatting: FormattingConfig,
}

impl TerminalWriter {
    pub fn new(formatting: FormattingConfig) -> Self {
        formatting.apply();
        Self { formatting }
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &EstimateReport) -> anyhow::Result<()> {
        print_header();
        print_summary(report, &self.formatting);
        print_vpf(report);
        print_uplift(report);
        print_funnel(report);
        print_chart(report);
        Ok(())
    }
}

fn print_header() {
    println!("{}", "Plan Upgrade ROI Estimate".bold().blue());
    println!("{}", "=========================".blue());
    println!();
}

fn print_summary(report: &EstimateReport, formatting: &FormattingConfig) {
    let s = &report.snapshot;
    println!("Current plan: {} ({} term)", s.current_tier, s.term);
    println!("Annual sales: {}", format_currency(s.annual_sales));
    println!();

    let Some(summary) = &s.summary else {
        return;
    };
    println!(
        "  Annual fee savings:  {}",
        formatting.signed_currency(summary.annual_fee_savings)
    );
    println!(
        "  Annual net savings:  {}",
        formatting.signed_currency(summary.annual_net_savings)
    );
    let break_even = match summary.break_even {
        BreakEven::Month(_) => summary.break_even.to_string().green().to_string(),
        BreakEven::NotApplicable => summary.break_even.to_string().dimmed().to_string(),
    };
    println!("  Break-even:          {break_even}");
    println!();
}

fn print_vpf(report: &EstimateReport) {
    let s = &report.snapshot;
    let Some(vpf) = &s.vpf else {
        return;
    };

    println!("{}", "Variable platform fee (monthly)".bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Channel", "Mix", "Rate", "Fee"]);
    for (name, percent, rate, fee) in [
        ("D2C", s.mix.d2c, s.channel_rates.d2c, vpf.per_channel.d2c),
        ("B2B", s.mix.b2b, s.channel_rates.b2b, vpf.per_channel.b2b),
        (
            "Retail",
            s.mix.retail,
            s.channel_rates.retail,
            vpf.per_channel.retail,
        ),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{percent}%")),
            Cell::new(format_percent(rate)),
            Cell::new(format_currency(fee)),
        ]);
    }
    println!("{table}");
    println!(
        "  Computed fee {} vs flat minimum -> effective cost {}",
        format_currency(vpf.computed_vpf),
        format_currency(vpf.effective_cost).bold()
    );
    println!();
}

fn print_uplift(report: &EstimateReport) {
    let s = &report.snapshot;
    let Some(uplift) = &s.uplift else {
        return;
    };

    println!("{}", "Revenue uplift scenarios (monthly)".bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Scenario", "Improvement", "Uplift"]);
    for (name, percent, value) in [
        ("Low", s.scenarios.low, uplift.low),
        ("Average", s.scenarios.average, uplift.average),
        ("Good", s.scenarios.good, uplift.good),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("+{percent}%")),
            Cell::new(format_currency(value)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_funnel(report: &EstimateReport) {
    let Some(funnel) = &report.snapshot.funnel else {
        return;
    };
    println!("{}", "Checkout funnel".bold());
    println!(
        "  Drop-off rate: {}",
        format_percent(funnel.drop_off_rate).yellow()
    );
    println!(
        "  Estimated lost revenue: {}",
        format_currency(funnel.lost_revenue).red()
    );
    println!();
}

const CHART_WIDTH: usize = 40;

fn print_chart(report: &EstimateReport) {
    if report.cumulative.is_empty() {
        return;
    }
    println!("{}", "Cumulative net position".bold());

    let max_abs = report
        .cumulative
        .iter()
        .map(|p| p.cumulative_net.abs())
        .fold(0.0_f64, f64::max);
    for point in &report.cumulative {
        let width = if max_abs > 0.0 {
            ((point.cumulative_net.abs() / max_abs) * CHART_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(width);
        let bar = if point.cumulative_net >= 0.0 {
            bar.green().to_string()
        } else {
            bar.red().to_string()
        };
        println!(
            "  {:>2} {bar} {}",
            point.month,
            format_currency(point.cumulative_net)
        );
    }
    println!();
}

/// Writer for the requested format, targeting stdout.
pub fn create_writer(
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(formatting)),
    }
}
