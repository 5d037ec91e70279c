//! Buy-versus-lease cost model.
//!
//! Expands a set of scenario parameters into two monthly cash flow streams
//! and discounts each to a present value:
//!
//! - **Buy**: purchase price paid up front, maintenance and insurance spread
//!   evenly over each month, resale value received in the final month.
//! - **Lease**: monthly payment plus maintenance and insurance, with an
//!   acquisition fee at the start and a disposition fee at the end of every
//!   lease cycle.
//!
//! Present values are negative for net costs, so a larger (less negative)
//! value is the cheaper option.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LeaseVsBuyError;
use crate::time_value::{npv_with_monthly_flows, MONTHS_PER_YEAR};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LeaseVsBuyResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Everything needed to price one buy-versus-lease horizon.
///
/// Every field has a default, so JSON input may supply any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Vehicle purchase price, paid at t=0
    pub purchase_price: Money,
    /// Monthly lease payment
    pub lease_payment_monthly: Money,
    /// Length of one lease cycle in months
    pub lease_term_months: u32,
    /// Comparison horizon in years (may be fractional)
    pub horizon_years: Years,
    /// Resale value received at the end of the horizon when buying
    pub resale_value: Money,
    /// Annual discount rate (e.g. 0.03 = 3%)
    pub discount_rate_annual: Rate,
    /// Annual maintenance when owning
    pub maintenance_buy_annual: Money,
    /// Annual maintenance when leasing
    pub maintenance_lease_annual: Money,
    /// Annual insurance when owning
    pub insurance_buy_annual: Money,
    /// Annual insurance when leasing
    pub insurance_lease_annual: Money,
    /// Fee charged at the start of each lease cycle
    pub lease_acquisition_fee: Money,
    /// Fee charged at the end of each lease cycle
    pub lease_disposition_fee: Money,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            purchase_price: dec!(35000),
            lease_payment_monthly: dec!(400),
            lease_term_months: 36,
            horizon_years: dec!(5),
            resale_value: dec!(15000),
            discount_rate_annual: dec!(0.03),
            maintenance_buy_annual: dec!(1000),
            maintenance_lease_annual: dec!(300),
            insurance_buy_annual: dec!(1200),
            insurance_lease_annual: dec!(1300),
            lease_acquisition_fee: dec!(500),
            lease_disposition_fee: dec!(500),
        }
    }
}

impl ScenarioParameters {
    /// Copy of these parameters with only the horizon replaced.
    pub fn with_horizon_years(&self, horizon_years: Years) -> Self {
        Self {
            horizon_years,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Present values of both scenarios for a single horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Number of monthly periods modelled
    pub total_months: u32,
    /// PV of all buying cash flows (negative = net cost)
    pub present_value_buy: Money,
    /// PV of all leasing cash flows (negative = net cost)
    pub present_value_lease: Money,
    /// PV lease minus PV buy
    pub lease_minus_buy: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a horizon in years to a whole number of months, rounding halves
/// to even (4.5 months -> 4, 7.5 months -> 8).
///
/// A negative horizon is rejected rather than read as zero months, which
/// would otherwise price buying as the bare purchase price and leasing as
/// free.
pub fn total_months(horizon_years: Years) -> LeaseVsBuyResult<u32> {
    if horizon_years < Decimal::ZERO {
        return Err(LeaseVsBuyError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Horizon cannot be negative".into(),
        });
    }
    let too_long = || LeaseVsBuyError::InvalidInput {
        field: "horizon_years".into(),
        reason: format!("Horizon of {horizon_years} years is too long"),
    };
    horizon_years
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or_else(too_long)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u32()
        .ok_or_else(too_long)
}

/// Monthly buying cash flows for months 1..=total_months.
///
/// Running costs are spread evenly; the resale value is credited to the
/// final month only.
pub fn buy_cashflows(params: &ScenarioParameters, total_months: u32) -> Vec<Money> {
    let monthly_cost = (params.maintenance_buy_annual + params.insurance_buy_annual)
        / Decimal::from(MONTHS_PER_YEAR);
    let mut flows = vec![-monthly_cost; total_months as usize];
    if let Some(last) = flows.last_mut() {
        *last += params.resale_value;
    }
    flows
}

/// Monthly leasing cash flows for months 1..=total_months.
///
/// Month `m` (1-indexed) pays the acquisition fee when it opens a lease
/// cycle, `(m - 1) % term == 0`, and the disposition fee when it closes one,
/// `m % term == 0`. A one-month term pays both every month.
pub fn lease_cashflows(
    params: &ScenarioParameters,
    total_months: u32,
) -> LeaseVsBuyResult<Vec<Money>> {
    if total_months == 0 {
        return Ok(Vec::new());
    }
    let term = params.lease_term_months;
    if term == 0 {
        return Err(LeaseVsBuyError::InvalidInput {
            field: "lease_term_months".into(),
            reason: "Lease term must be at least one month".into(),
        });
    }

    let monthly_cost = params.lease_payment_monthly
        + (params.maintenance_lease_annual + params.insurance_lease_annual)
            / Decimal::from(MONTHS_PER_YEAR);

    let flows = (1..=total_months)
        .map(|month| {
            let mut cf = -monthly_cost;
            if (month - 1) % term == 0 {
                cf -= params.lease_acquisition_fee;
            }
            if month % term == 0 {
                cf -= params.lease_disposition_fee;
            }
            cf
        })
        .collect();
    Ok(flows)
}

/// Present values of buying and leasing, `(pv_buy, pv_lease)`.
pub fn buy_vs_lease_present_values(
    params: &ScenarioParameters,
) -> LeaseVsBuyResult<(Money, Money)> {
    let months = total_months(params.horizon_years)?;
    tracing::debug!(
        horizon_years = %params.horizon_years,
        total_months = months,
        "pricing buy and lease scenarios"
    );

    let pv_buy = npv_with_monthly_flows(
        -params.purchase_price,
        &buy_cashflows(params, months),
        params.discount_rate_annual,
    )?;
    let pv_lease = npv_with_monthly_flows(
        Decimal::ZERO,
        &lease_cashflows(params, months)?,
        params.discount_rate_annual,
    )?;

    Ok((pv_buy, pv_lease))
}

/// Price one horizon and wrap the result in the standard output envelope,
/// with warnings for inputs that are valid but likely unintended.
pub fn calculate_buy_vs_lease(
    params: &ScenarioParameters,
) -> LeaseVsBuyResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let months = total_months(params.horizon_years)?;
    let (present_value_buy, present_value_lease) = buy_vs_lease_present_values(params)?;

    let exact_months = params.horizon_years * Decimal::from(MONTHS_PER_YEAR);
    if exact_months != Decimal::from(months) {
        warnings.push(format!(
            "Horizon of {} years is {exact_months} months; rounded to {months}",
            params.horizon_years
        ));
    }
    if params.lease_term_months > 0 && months % params.lease_term_months != 0 {
        warnings.push(format!(
            "Horizon of {months} months ends mid-way through a {}-month lease cycle; \
             no disposition fee is charged for the final cycle",
            params.lease_term_months
        ));
    }
    if params.resale_value > params.purchase_price {
        warnings.push(format!(
            "Resale value ({}) exceeds purchase price ({})",
            params.resale_value, params.purchase_price
        ));
    }

    let output = ScenarioResult {
        total_months: months,
        present_value_buy,
        present_value_lease,
        lease_minus_buy: present_value_lease - present_value_buy,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy vs lease present value (monthly discounting)",
        params,
        warnings,
        elapsed,
        output,
    ))
}
