use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lease_vs_buy_core::cost_model::{self, ScenarioParameters};
use lease_vs_buy_core::time_value;

use crate::input;

/// Scenario parameter flags shared by every pricing command.
///
/// Each flag is optional and, when given, overrides the value from
/// `--input` / stdin (or the built-in default).
#[derive(Args, Debug, Default)]
pub struct ScenarioArgs {
    /// Vehicle purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Monthly lease payment
    #[arg(long)]
    pub lease_payment_monthly: Option<Decimal>,

    /// Lease cycle length in months
    #[arg(long)]
    pub lease_term_months: Option<u32>,

    /// Resale value at the end of the horizon
    #[arg(long)]
    pub resale_value: Option<Decimal>,

    /// Annual discount rate (e.g. 0.03 for 3%)
    #[arg(long, alias = "rate")]
    pub discount_rate_annual: Option<Decimal>,

    /// Annual maintenance when buying
    #[arg(long)]
    pub maintenance_buy_annual: Option<Decimal>,

    /// Annual maintenance when leasing
    #[arg(long)]
    pub maintenance_lease_annual: Option<Decimal>,

    /// Annual insurance when buying
    #[arg(long)]
    pub insurance_buy_annual: Option<Decimal>,

    /// Annual insurance when leasing
    #[arg(long)]
    pub insurance_lease_annual: Option<Decimal>,

    /// Fee at the start of each lease cycle
    #[arg(long)]
    pub lease_acquisition_fee: Option<Decimal>,

    /// Fee at the end of each lease cycle
    #[arg(long)]
    pub lease_disposition_fee: Option<Decimal>,
}

impl ScenarioArgs {
    /// Layer any flags that were given over `base`.
    pub fn apply(&self, base: ScenarioParameters) -> ScenarioParameters {
        ScenarioParameters {
            purchase_price: self.purchase_price.unwrap_or(base.purchase_price),
            lease_payment_monthly: self
                .lease_payment_monthly
                .unwrap_or(base.lease_payment_monthly),
            lease_term_months: self.lease_term_months.unwrap_or(base.lease_term_months),
            horizon_years: base.horizon_years,
            resale_value: self.resale_value.unwrap_or(base.resale_value),
            discount_rate_annual: self
                .discount_rate_annual
                .unwrap_or(base.discount_rate_annual),
            maintenance_buy_annual: self
                .maintenance_buy_annual
                .unwrap_or(base.maintenance_buy_annual),
            maintenance_lease_annual: self
                .maintenance_lease_annual
                .unwrap_or(base.maintenance_lease_annual),
            insurance_buy_annual: self
                .insurance_buy_annual
                .unwrap_or(base.insurance_buy_annual),
            insurance_lease_annual: self
                .insurance_lease_annual
                .unwrap_or(base.insurance_lease_annual),
            lease_acquisition_fee: self
                .lease_acquisition_fee
                .unwrap_or(base.lease_acquisition_fee),
            lease_disposition_fee: self
                .lease_disposition_fee
                .unwrap_or(base.lease_disposition_fee),
        }
    }
}

/// Arguments for a single-horizon buy vs lease calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PresentValuesArgs {
    /// Comparison horizon in years (may be fractional)
    #[arg(long, alias = "years")]
    pub horizon_years: Option<Decimal>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Path to JSON input file (individual flags override its values)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for annual-to-monthly rate conversion
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MonthlyRateArgs {
    /// Annual rate (e.g. 0.03 for 3%)
    #[arg(long)]
    pub annual_rate: Decimal,
}

pub fn run_present_values(args: PresentValuesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: ScenarioParameters = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScenarioParameters::default()
    };

    let mut params = args.scenario.apply(base);
    if let Some(years) = args.horizon_years {
        params.horizon_years = years;
    }
    tracing::debug!(?params, "resolved scenario parameters");

    let result = cost_model::calculate_buy_vs_lease(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_monthly_rate(args: MonthlyRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_rate = time_value::annual_to_monthly_rate(args.annual_rate)?;
    Ok(serde_json::json!({
        "result": {
            "annual_rate": args.annual_rate,
            "monthly_rate": monthly_rate,
        }
    }))
}
