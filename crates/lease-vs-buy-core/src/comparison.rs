use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cost_model::{buy_vs_lease_present_values, ScenarioParameters};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LeaseVsBuyResult;

const DEFAULT_MAX_HORIZON_YEARS: u32 = 10;

fn default_max_horizon_years() -> u32 {
    DEFAULT_MAX_HORIZON_YEARS
}

/// Input for a horizon sweep: one set of scenario parameters evaluated at
/// every whole year from 1 to `max_horizon_years`. The scenario's own
/// `horizon_years` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    #[serde(default = "default_max_horizon_years")]
    pub max_horizon_years: u32,
    #[serde(flatten)]
    pub scenario: ScenarioParameters,
}

impl Default for ComparisonInput {
    fn default() -> Self {
        Self {
            max_horizon_years: DEFAULT_MAX_HORIZON_YEARS,
            scenario: ScenarioParameters::default(),
        }
    }
}

/// One year of the sweep table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub years: u32,
    pub present_value_buy: Money,
    pub present_value_lease: Money,
    pub lease_minus_buy: Money,
}

pub type SweepTable = Vec<SweepRow>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub rows: SweepTable,
    /// First year at which the lease PV falls to or below the buy PV
    pub breakeven_year: Option<u32>,
}

/// Price the scenario at each whole-year horizon 1..=max_horizon_years.
pub fn compare_costs_over_time(
    params: &ScenarioParameters,
    max_horizon_years: u32,
) -> LeaseVsBuyResult<SweepTable> {
    (1..=max_horizon_years)
        .map(|years| {
            let (pv_buy, pv_lease) =
                buy_vs_lease_present_values(&params.with_horizon_years(Decimal::from(years)))?;
            let row = SweepRow {
                years,
                present_value_buy: pv_buy,
                present_value_lease: pv_lease,
                lease_minus_buy: pv_lease - pv_buy,
            };
            tracing::debug!(
                years,
                pv_buy = %row.present_value_buy,
                pv_lease = %row.present_value_lease,
                "swept horizon"
            );
            Ok(row)
        })
        .collect()
}

/// Earliest year whose `lease_minus_buy` is at or below zero.
pub fn find_breakeven_year(rows: &[SweepRow]) -> Option<u32> {
    rows.iter()
        .find(|row| row.lease_minus_buy <= Decimal::ZERO)
        .map(|row| row.years)
}

/// Sweep the horizon, locate the breakeven year and wrap both in the
/// standard output envelope.
pub fn run_comparison(
    input: &ComparisonInput,
) -> LeaseVsBuyResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rows = compare_costs_over_time(&input.scenario, input.max_horizon_years)?;
    let breakeven_year = find_breakeven_year(&rows);

    if rows.is_empty() {
        warnings.push("max_horizon_years is 0; nothing was swept".into());
    } else if breakeven_year.is_none() {
        warnings.push(format!(
            "Lease PV stays above buy PV for every horizon up to {} years; no crossover",
            input.max_horizon_years
        ));
    }

    let output = ComparisonOutput {
        rows,
        breakeven_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy vs lease present value sweep over whole-year horizons",
        input,
        warnings,
        elapsed,
        output,
    ))
}
