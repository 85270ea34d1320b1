mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use credit_risk_core::CreditRiskError;

use commands::altman::{AltmanArgs, RatiosArgs};
use commands::decision::CombineArgs;
use commands::evaluate::EvaluateArgs;
use commands::structural::{MertonArgs, VolatilityArgs};

/// Corporate credit risk assessment
#[derive(Parser)]
#[command(
    name = "crisk",
    version,
    about = "Corporate credit risk assessment",
    long_about = "A CLI for assessing corporate credit risk with decimal precision. \
                  Combines the Altman Z-Score family (public manufacturing, private or \
                  non-manufacturing, emerging markets) with the Merton distance-to-default \
                  model into a single credit decision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter directive (e.g. debug, credit_risk_core=trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the Altman X1-X5 ratios from statement lines
    Ratios(RatiosArgs),
    /// Compute the Altman Z-Score and zone for a firm type
    Altman(AltmanArgs),
    /// Estimate annualized asset volatility from a total-asset series
    Volatility(VolatilityArgs),
    /// Compute Merton distance-to-default and default probability
    Merton(MertonArgs),
    /// Merge an Altman zone and a Merton zone into a credit decision
    Combine(CombineArgs),
    /// Evaluate a company end to end
    Evaluate(EvaluateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref(), cli.log_json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ratios(args) => commands::altman::run_ratios(args),
        Commands::Altman(args) => commands::altman::run_altman(args),
        Commands::Volatility(args) => commands::structural::run_volatility(args),
        Commands::Merton(args) => commands::structural::run_merton(args),
        Commands::Combine(args) => commands::decision::run_combine(args),
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args),
        Commands::Version => {
            println!("crisk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            match e.downcast_ref::<CreditRiskError>() {
                Some(engine) => eprintln!(
                    "{}: {} ({})",
                    "error".red().bold(),
                    engine.caller_message(),
                    engine
                ),
                None => eprintln!("{}: {}", "error".red().bold(), e),
            }
            process::exit(1);
        }
    }
}
