//! Time-value-of-money helpers: annual-to-monthly rate conversion and
//! present value of a monthly cash flow stream.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LeaseVsBuyError;
use crate::types::{Money, Rate};
use crate::LeaseVsBuyResult;

pub const MONTHS_PER_YEAR: u32 = 12;

const MAX_ROOT_ITERATIONS: u32 = 100;
const ROOT_TOLERANCE: Decimal = dec!(0.000000000000000000001);

/// Convert an annual discount rate to the equivalent monthly rate,
/// `m = (1 + r)^(1/12) - 1`, so that compounding `m` for twelve months
/// reproduces `r`.
///
/// The rate must be greater than -100%; anything at or below that has no
/// real monthly equivalent and is rejected.
pub fn annual_to_monthly_rate(annual_rate: Rate) -> LeaseVsBuyResult<Rate> {
    if annual_rate <= dec!(-1) {
        return Err(LeaseVsBuyError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    if annual_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let root = nth_root(Decimal::ONE + annual_rate, MONTHS_PER_YEAR)?;
    Ok(root - Decimal::ONE)
}

/// Present value of an initial cash flow at t=0 plus a sequence of monthly
/// flows at months 1..N, discounted at the monthly equivalent of
/// `annual_rate`.
///
/// A monthly rate of exactly zero short-circuits to the undiscounted sum.
/// Once the discount factor grows past `Decimal::MAX` the remaining terms are
/// below Decimal resolution and are dropped. A present value too large to
/// represent (rates close to -100%) is an error.
pub fn npv_with_monthly_flows(
    initial_cashflow: Money,
    monthly_flows: &[Money],
    annual_rate: Rate,
) -> LeaseVsBuyResult<Money> {
    let monthly_rate = annual_to_monthly_rate(annual_rate)?;
    if monthly_rate.is_zero() {
        return monthly_flows
            .iter()
            .try_fold(initial_cashflow, |acc, cf| acc.checked_add(*cf))
            .ok_or_else(|| out_of_range(annual_rate, monthly_flows.len()));
    }

    let one_plus_m = Decimal::ONE + monthly_rate;
    let mut discount = Decimal::ONE;
    let mut present_value = initial_cashflow;

    for (idx, cf) in monthly_flows.iter().enumerate() {
        discount = match discount.checked_mul(one_plus_m) {
            Some(d) => d,
            None if one_plus_m > Decimal::ONE => break,
            None => return Err(out_of_range(annual_rate, idx + 1)),
        };
        if cf.is_zero() {
            continue;
        }
        present_value = cf
            .checked_div(discount)
            .and_then(|term| present_value.checked_add(term))
            .ok_or_else(|| out_of_range(annual_rate, idx + 1))?;
    }

    Ok(present_value)
}

fn out_of_range(annual_rate: Rate, month: usize) -> LeaseVsBuyError {
    LeaseVsBuyError::InvalidInput {
        field: "annual_rate".into(),
        reason: format!(
            "Present value at month {month} exceeds the representable range at rate {annual_rate}"
        ),
    }
}

/// Newton's method for the nth root of `a` (a > 0).
/// x_{k+1} = ((n-1)*x_k + a / x_k^(n-1)) / n
///
/// The starting point `1 + (a-1)/n` never lies below the root (Bernoulli),
/// so the iterates decrease monotonically and x^(n-1) cannot grow past its
/// first value.
fn nth_root(a: Decimal, n: u32) -> LeaseVsBuyResult<Decimal> {
    if a == Decimal::ONE {
        return Ok(Decimal::ONE);
    }
    let n_dec = Decimal::from(n);
    let n_minus_1 = n_dec - Decimal::ONE;

    let mut x = Decimal::ONE + (a - Decimal::ONE) / n_dec;

    for _ in 0..MAX_ROOT_ITERATIONS {
        let mut x_pow = Decimal::ONE;
        for _ in 0..(n - 1) {
            x_pow = x_pow
                .checked_mul(x)
                .ok_or_else(|| LeaseVsBuyError::InvalidInput {
                    field: "annual_rate".into(),
                    reason: format!("Rate {} is too large to convert", a - Decimal::ONE),
                })?;
        }
        if x_pow.is_zero() {
            return Err(LeaseVsBuyError::DivisionByZero {
                context: format!("{n}th root iteration"),
            });
        }
        let x_new = (n_minus_1 * x + a / x_pow) / n_dec;
        if (x_new - x).abs() < ROOT_TOLERANCE {
            return Ok(x_new);
        }
        x = x_new;
    }
    Ok(x)
}
