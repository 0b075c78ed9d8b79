//! The `estimate` command: load inputs, run the calculators, render.

use crate::calc;
use crate::config::RoimapConfig;
use crate::core::{BillingTerm, PlanTier};
use crate::formatting::FormattingConfig;
use crate::input::EstimateInputs;
use crate::io::output::{
    create_writer, EstimateReport, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter,
};
use crate::rates;
use crate::state::{SnapshotPatch, SnapshotStore};
use anyhow::{Context, Result};
use chrono::Utc;
use log::debug;
use std::fs::File;
use std::path::PathBuf;

pub struct EstimateConfig {
    pub inputs: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub plan_override: Option<PlanTier>,
    pub term_override: Option<BillingTerm>,
    pub sales_override: Option<f64>,
    pub aov_override: Option<f64>,
    pub formatting: FormattingConfig,
}

pub fn run_estimate(config: EstimateConfig) -> Result<()> {
    let app_config = RoimapConfig::load(config.config.as_deref())?;
    let inputs = EstimateInputs::load(&config.inputs)?
        .validated()
        .context("invalid inputs")?;

    let store = build_store(&inputs, &app_config, &config);
    let report = build_report(&store, &app_config);

    write_report(&report, &config)
}

/// Seed the store from the inputs file, apply CLI overrides, and run the
/// explicit recompute.
fn build_store(
    inputs: &EstimateInputs,
    app_config: &RoimapConfig,
    config: &EstimateConfig,
) -> SnapshotStore {
    let mut store = SnapshotStore::default();
    store.merge(inputs.to_patch(app_config));

    // Term changes go through set_term so the d2c-rate coupling applies.
    if let Some(term) = config.term_override {
        store.set_term(term);
    }
    let mut overrides = SnapshotPatch::default();
    if let Some(tier) = config.plan_override {
        overrides.current_tier = Some(tier);
        if inputs.current_monthly_cost.is_none() {
            overrides.current_monthly_cost =
                Some(rates::base_monthly_cost(tier, store.snapshot().term));
        }
    }
    overrides.annual_sales = config.sales_override;
    overrides.assumed_aov = config.aov_override;
    store.merge(overrides);

    debug!(
        "estimating upgrade from {} ({} term), annual sales {}",
        store.snapshot().current_tier,
        store.snapshot().term,
        store.snapshot().annual_sales
    );

    store.recalculate();
    store
}

fn build_report(store: &SnapshotStore, app_config: &RoimapConfig) -> EstimateReport {
    let snapshot = store.snapshot().clone();
    let cumulative = match (snapshot.summary.as_ref(), store.plan_costs()) {
        (Some(summary), Some(costs)) => {
            calc::cumulative_position(summary, &costs, app_config.chart_months)
        }
        _ => Vec::new(),
    };
    EstimateReport {
        generated_at: Utc::now(),
        snapshot,
        cumulative,
    }
}

fn write_report(report: &EstimateReport, config: &EstimateConfig) -> Result<()> {
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer: Box<dyn OutputWriter> = match config.format {
                OutputFormat::Json => Box::new(JsonWriter::new(file)),
                OutputFormat::Markdown => Box::new(MarkdownWriter::new(file)),
                OutputFormat::Terminal => {
                    anyhow::bail!("terminal format cannot be written to a file; use json or markdown")
                }
            };
            writer.write_report(report)
        }
        None => create_writer(config.format, config.formatting).write_report(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;

    fn write_inputs(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("inputs.toml");
        fs::write(&path, body).unwrap();
        path
    }

    fn base_config(inputs: PathBuf) -> EstimateConfig {
        EstimateConfig {
            inputs,
            format: OutputFormat::Json,
            output: None,
            config: None,
            plan_override: None,
            term_override: None,
            sales_override: None,
            aov_override: None,
            formatting: FormattingConfig::plain(),
        }
    }

    #[test]
    fn test_build_store_runs_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_inputs(
            &dir,
            indoc! {r#"
                annual_sales = 1500000
                current_plan = "advanced"
                aov = 120.0
                conversion_rate = 2.5
            "#},
        );
        let config = base_config(path.clone());
        let inputs = EstimateInputs::load(&path).unwrap().validated().unwrap();
        let store = build_store(&inputs, &RoimapConfig::default(), &config);
        let s = store.snapshot();
        assert!(s.summary.is_some());
        assert!(s.vpf.is_some());
        assert_eq!(s.annual_sales, 1_500_000.0);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_inputs(
            &dir,
            indoc! {r#"
                annual_sales = 1500000
                current_plan = "advanced"
                term = "three-year"
            "#},
        );
        let mut config = base_config(path.clone());
        config.term_override = Some(BillingTerm::OneYear);
        config.sales_override = Some(2_400_000.0);
        let inputs = EstimateInputs::load(&path).unwrap().validated().unwrap();
        let store = build_store(&inputs, &RoimapConfig::default(), &config);
        let s = store.snapshot();
        assert_eq!(s.term, BillingTerm::OneYear);
        assert_eq!(s.annual_sales, 2_400_000.0);
        // The term override recoupled the d2c rate.
        assert_eq!(
            s.channel_rates.d2c,
            rates::term_pricing(BillingTerm::OneYear).d2c_rate
        );
    }

    #[test]
    fn test_report_chart_honors_config_months() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_inputs(
            &dir,
            indoc! {r#"
                annual_sales = 1500000
                current_plan = "basic"
            "#},
        );
        let config = base_config(path.clone());
        let inputs = EstimateInputs::load(&path).unwrap().validated().unwrap();
        let app_config = RoimapConfig {
            chart_months: 6,
            ..Default::default()
        };
        let store = build_store(&inputs, &app_config, &config);
        let report = build_report(&store, &app_config);
        assert_eq!(report.cumulative.len(), 6);
    }

    #[test]
    fn test_terminal_format_to_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_inputs(
            &dir,
            indoc! {r#"
                annual_sales = 1500000
                current_plan = "basic"
            "#},
        );
        let mut config = base_config(path);
        config.format = OutputFormat::Terminal;
        config.output = Some(dir.path().join("out.txt"));
        let err = run_estimate(config).unwrap_err();
        assert!(err.to_string().contains("terminal format"));
    }
}
