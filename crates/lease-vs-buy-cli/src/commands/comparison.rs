use clap::Args;
use serde_json::Value;

use lease_vs_buy_core::comparison::{self, ComparisonInput};

use crate::commands::pricing::ScenarioArgs;
use crate::input;

/// Arguments for the horizon sweep and crossover lookup
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompareArgs {
    /// Sweep whole-year horizons from 1 up to this many years
    #[arg(long, alias = "years")]
    pub max_horizon_years: Option<u32>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Path to JSON input file (individual flags override its values)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: ComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ComparisonInput::default()
    };

    let input = ComparisonInput {
        max_horizon_years: args.max_horizon_years.unwrap_or(base.max_horizon_years),
        scenario: args.scenario.apply(base.scenario),
    };
    tracing::debug!(
        max_horizon_years = input.max_horizon_years,
        "running horizon sweep"
    );

    let result = comparison::run_comparison(&input)?;
    Ok(serde_json::to_value(result)?)
}
