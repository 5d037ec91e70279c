//! Present-value comparison of buying versus leasing a car.
//!
//! [`time_value`] converts annual rates to monthly ones and discounts monthly
//! cash flows; [`cost_model`] builds the buy and lease cash flows and prices
//! them; [`comparison`] sweeps whole-year horizons and finds the crossover
//! year.

pub mod cost_model;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use cost_model::{buy_vs_lease_present_values, calculate_buy_vs_lease, ScenarioParameters};
pub use error::LeaseVsBuyError;
pub use time_value::{annual_to_monthly_rate, npv_with_monthly_flows};
pub use types::*;

/// Standard result type for all lease-vs-buy operations
pub type LeaseVsBuyResult<T> = Result<T, LeaseVsBuyError>;
