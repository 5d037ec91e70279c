use lease_vs_buy_core::cost_model::{self, ScenarioParameters};
use lease_vs_buy_core::time_value;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

fn zero_cost_scenario() -> ScenarioParameters {
    ScenarioParameters {
        purchase_price: Decimal::ZERO,
        lease_payment_monthly: Decimal::ZERO,
        lease_term_months: 36,
        horizon_years: dec!(1),
        resale_value: Decimal::ZERO,
        discount_rate_annual: Decimal::ZERO,
        maintenance_buy_annual: Decimal::ZERO,
        maintenance_lease_annual: Decimal::ZERO,
        insurance_buy_annual: Decimal::ZERO,
        insurance_lease_annual: Decimal::ZERO,
        lease_acquisition_fee: Decimal::ZERO,
        lease_disposition_fee: Decimal::ZERO,
    }
}

// ===========================================================================
// Rate conversion
// ===========================================================================

#[test]
fn test_monthly_rate_round_trips_through_compounding() {
    for r in [dec!(0.001), dec!(0.03), dec!(0.07), dec!(0.5), dec!(-0.2)] {
        let m = time_value::annual_to_monthly_rate(r).unwrap();
        let back = (Decimal::ONE + m).powi(12) - Decimal::ONE;
        assert!(
            (back - r).abs() < dec!(0.0000000001),
            "rate {r} converted to {m} compounds back to {back}"
        );
    }
}

#[test]
fn test_rate_below_minus_one_is_rejected() {
    let err = time_value::annual_to_monthly_rate(dec!(-1.01)).unwrap_err();
    assert!(err.to_string().contains("annual_rate"));
}

// ===========================================================================
// Reference car (default parameters)
// ===========================================================================

#[test]
fn test_default_five_year_reference_values() {
    // Monthly discounting at 3% annual over 60 months
    let (pv_buy, pv_lease) =
        cost_model::buy_vs_lease_present_values(&ScenarioParameters::default()).unwrap();
    assert!(
        (pv_buy - dec!(-32274.0208)).abs() < dec!(0.01),
        "Expected PV buy ~-32274.02, got {pv_buy}"
    );
    assert!(
        (pv_lease - dec!(-31123.7752)).abs() < dec!(0.01),
        "Expected PV lease ~-31123.78, got {pv_lease}"
    );
}

#[test]
fn test_identical_inputs_give_identical_outputs() {
    let params = ScenarioParameters {
        horizon_years: dec!(7.25),
        discount_rate_annual: dec!(0.045),
        ..ScenarioParameters::default()
    };
    let first = cost_model::buy_vs_lease_present_values(&params).unwrap();
    let second = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(first, second);
}

// ===========================================================================
// Edge cases
// ===========================================================================

#[test]
fn test_zero_horizon_gives_purchase_price_only() {
    let params = ScenarioParameters {
        horizon_years: Decimal::ZERO,
        ..ScenarioParameters::default()
    };
    let (pv_buy, pv_lease) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(pv_buy, dec!(-35000));
    assert_eq!(pv_lease, Decimal::ZERO);
}

#[test]
fn test_resale_applied_once_one_year() {
    let params = ScenarioParameters {
        purchase_price: dec!(35000),
        resale_value: dec!(15000),
        ..zero_cost_scenario()
    };
    let (pv_buy, _) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(pv_buy, dec!(-20000));
}

#[test]
fn test_resale_applied_once_long_horizon() {
    let params = ScenarioParameters {
        purchase_price: dec!(35000),
        resale_value: dec!(15000),
        horizon_years: dec!(8),
        ..zero_cost_scenario()
    };
    let (pv_buy, _) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(pv_buy, dec!(-20000));
}

#[test]
fn test_lease_fees_every_twelve_months() {
    let params = ScenarioParameters {
        lease_term_months: 12,
        horizon_years: dec!(3),
        lease_acquisition_fee: dec!(500),
        lease_disposition_fee: dec!(500),
        ..zero_cost_scenario()
    };
    let (_, pv_lease) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(pv_lease, dec!(-3000));

    let flows = cost_model::lease_cashflows(&params, 36).unwrap();
    for month in [1usize, 13, 25] {
        assert_eq!(flows[month - 1], dec!(-500), "acquisition fee in month {month}");
    }
    for month in [12usize, 24, 36] {
        assert_eq!(flows[month - 1], dec!(-500), "disposition fee in month {month}");
    }
}

#[test]
fn test_zero_rate_is_undiscounted_sum() {
    let params = ScenarioParameters {
        discount_rate_annual: Decimal::ZERO,
        horizon_years: dec!(2),
        ..ScenarioParameters::default()
    };
    let months = cost_model::total_months(params.horizon_years).unwrap();
    let buy_sum: Decimal = cost_model::buy_cashflows(&params, months).iter().sum();
    let lease_sum: Decimal = cost_model::lease_cashflows(&params, months)
        .unwrap()
        .iter()
        .sum();
    let (pv_buy, pv_lease) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    assert_eq!(pv_buy, -params.purchase_price + buy_sum);
    assert_eq!(pv_lease, lease_sum);
}

#[test]
fn test_zero_lease_term_with_positive_horizon_errors() {
    let params = ScenarioParameters {
        lease_term_months: 0,
        ..ScenarioParameters::default()
    };
    assert!(cost_model::buy_vs_lease_present_values(&params).is_err());
}

#[test]
fn test_negative_horizon_errors() {
    let params = ScenarioParameters {
        horizon_years: dec!(-2),
        ..ScenarioParameters::default()
    };
    assert!(cost_model::calculate_buy_vs_lease(&params).is_err());
}

#[test]
fn test_huge_horizon_errors() {
    let params = ScenarioParameters {
        horizon_years: Decimal::MAX,
        ..ScenarioParameters::default()
    };
    assert!(cost_model::total_months(params.horizon_years).is_err());
    assert!(cost_model::calculate_buy_vs_lease(&params).is_err());
}

// ===========================================================================
// Extreme rates and horizons
// ===========================================================================

#[test]
fn test_high_rate_long_horizon_prices() {
    let params = ScenarioParameters {
        discount_rate_annual: dec!(1.5),
        horizon_years: dec!(80),
        ..ScenarioParameters::default()
    };
    let (pv_buy, pv_lease) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    // Resale is discounted to nothing; buying is the price plus a perpetuity
    let m = time_value::annual_to_monthly_rate(dec!(1.5)).unwrap();
    let running = dec!(2200) / dec!(12) / m;
    assert!((pv_buy - (dec!(-35000) - running)).abs() < dec!(0.01));
    assert!(pv_lease < Decimal::ZERO);
}

#[test]
fn test_default_car_over_2500_years() {
    let params = ScenarioParameters::default().with_horizon_years(dec!(2500));
    let (pv_buy, _) = cost_model::buy_vs_lease_present_values(&params).unwrap();
    let m = time_value::annual_to_monthly_rate(dec!(0.03)).unwrap();
    let perpetuity = dec!(-35000) - dec!(2200) / dec!(12) / m;
    assert!((pv_buy - perpetuity).abs() < dec!(0.01));
}

#[test]
fn test_rate_near_minus_one_errors() {
    let flows = vec![dec!(-1000); 120];
    assert!(time_value::npv_with_monthly_flows(Decimal::ZERO, &flows, dec!(-0.999999)).is_err());
}
