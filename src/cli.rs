use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roimap")]
#[command(about = "Plan-upgrade ROI estimator for e-commerce merchants", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an estimate from an inputs file
    Estimate {
        /// Inputs file (TOML, or JSON with a .json extension)
        inputs: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .roimap.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the current plan tier from the inputs file
        #[arg(long, value_enum)]
        plan: Option<PlanTierArg>,

        /// Override the billing term from the inputs file
        #[arg(long, value_enum)]
        term: Option<BillingTermArg>,

        /// Override annual sales volume
        #[arg(long)]
        sales: Option<f64>,

        /// Override the assumed average order value
        #[arg(long)]
        aov: Option<f64>,

        /// Disable colors and decorations
        #[arg(long)]
        plain: bool,

        /// Increase verbosity (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print the static plan-comparison table
    Plans {
        /// Disable colors and decorations
        #[arg(long)]
        plain: bool,
    },

    /// Write a template inputs file
    Init {
        /// Where to write the template
        #[arg(default_value = "roimap-inputs.toml")]
        path: PathBuf,

        /// Force overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlanTierArg {
    Basic,
    Grow,
    Advanced,
    Plus,
}

impl From<PlanTierArg> for crate::core::PlanTier {
    fn from(t: PlanTierArg) -> Self {
        match t {
            PlanTierArg::Basic => crate::core::PlanTier::Basic,
            PlanTierArg::Grow => crate::core::PlanTier::Grow,
            PlanTierArg::Advanced => crate::core::PlanTier::Advanced,
            PlanTierArg::Plus => crate::core::PlanTier::Plus,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BillingTermArg {
    OneYear,
    ThreeYear,
}

impl From<BillingTermArg> for crate::core::BillingTerm {
    fn from(t: BillingTermArg) -> Self {
        match t {
            BillingTermArg::OneYear => crate::core::BillingTerm::OneYear,
            BillingTermArg::ThreeYear => crate::core::BillingTerm::ThreeYear,
        }
    }
}
