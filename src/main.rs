use anyhow::Result;
use clap::Parser;
use roimap::cli::{Cli, Commands};
use roimap::commands::estimate::EstimateConfig;
use roimap::formatting::FormattingConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            inputs,
            format,
            output,
            config,
            plan,
            term,
            sales,
            aov,
            plain,
            verbosity,
        } => {
            init_logging(verbosity);
            let estimate_config = EstimateConfig {
                inputs,
                format: format.into(),
                output,
                config,
                plan_override: plan.map(Into::into),
                term_override: term.map(Into::into),
                sales_override: sales,
                aov_override: aov,
                formatting: formatting_for(plain),
            };
            roimap::commands::estimate::run_estimate(estimate_config)
        }
        Commands::Plans { plain } => {
            init_logging(0);
            roimap::commands::plans::print_plans(formatting_for(plain))
        }
        Commands::Init { path, force } => {
            init_logging(0);
            roimap::commands::init::init_inputs(&path, force)
        }
    }
}

fn formatting_for(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
