mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::comparison::CompareArgs;
use commands::pricing::{MonthlyRateArgs, PresentValuesArgs};

/// Present-value comparison of buying versus leasing a car
#[derive(Parser)]
#[command(
    name = "lvb",
    version,
    about = "Compare the present-value cost of buying versus leasing a car",
    long_about = "Discounts the monthly cash flows of buying (purchase, running costs, \
                  resale) and leasing (payments, running costs, per-cycle fees) to \
                  present values with decimal precision, sweeps the horizon year by \
                  year, and reports the breakeven year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Present values of buying and leasing for a single horizon
    PresentValues(PresentValuesArgs),
    /// Sweep horizons year by year and find the breakeven year
    Compare(CompareArgs),
    /// Convert an annual discount rate to its monthly equivalent
    MonthlyRate(MonthlyRateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Chart,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::PresentValues(args) => commands::pricing::run_present_values(args),
        Commands::Compare(args) => commands::comparison::run_compare(args),
        Commands::MonthlyRate(args) => commands::pricing::run_monthly_rate(args),
        Commands::Version => {
            println!("lvb {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
