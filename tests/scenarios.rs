//! End-to-end scenarios through the public entry point.

use au_property::{
    LoanInput, PropertyInput, PropertyType, StateCode, annual_breakdown, calculate_lmi,
    calculate_property_data, calculate_stamp_duty, monthly_repayment,
};
use proptest::prelude::{prop_assert_eq, proptest};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario() -> PropertyInput {
    PropertyInput {
        property_value: Some(dec!(600_000)),
        deposit: Some(dec!(120_000)),
        property_type: Some(PropertyType::House),
        state: Some(StateCode::Nsw),
        start_year: Some(2025),
        ..Default::default()
    }
}

#[test]
fn nsw_standard_purchase_pays_bracket_duty() {
    assert_eq!(
        calculate_stamp_duty(dec!(600_000), false, false, StateCode::Nsw),
        dec!(11_152) + (dec!(600_000) - dec!(372_000)) * dec!(0.045)
    );
}

#[test]
fn nsw_first_home_buyer_under_threshold_pays_nothing() {
    assert_eq!(
        calculate_stamp_duty(dec!(750_000), true, false, StateCode::Nsw),
        Decimal::ZERO
    );
}

#[test]
fn thirty_year_loan_repayment() {
    assert_eq!(monthly_repayment(dec!(400_000), dec!(6), 30), dec!(2_398.20));
}

#[test]
fn lmi_boundaries() {
    assert_eq!(calculate_lmi(dec!(80), dec!(500_000)), Some(Decimal::ZERO));
    assert_eq!(calculate_lmi(dec!(96), dec!(500_000)), None);
}

#[test]
fn full_term_repays_the_principal() {
    let principal = dec!(350_000);
    let repaid: Decimal = (1..=25)
        .map(|year| annual_breakdown(year, principal, dec!(5.75), 25, false).principal)
        .sum();
    assert!((repaid - principal).abs() <= dec!(0.25), "repaid {repaid}");
}

#[test]
fn owner_occupier_never_earns_rent_or_tax_returns() {
    let data = calculate_property_data(&PropertyInput {
        is_living_here: Some(true),
        weekly_rent: Some(dec!(700)),
        rental_growth: Some(dec!(20)),
        ..scenario()
    });
    assert_eq!(data.projections.len(), 5);
    for projection in &data.projections {
        assert_eq!(projection.rental_income, Decimal::ZERO);
        assert_eq!(projection.tax_return, Some(Decimal::ZERO));
        assert_eq!(projection.taxable_amount, Some(Decimal::ZERO));
    }
}

#[test]
fn five_year_capital_growth() {
    let data = calculate_property_data(&PropertyInput {
        property_value: Some(dec!(500_000)),
        deposit: Some(dec!(100_000)),
        capital_growth: Some(dec!(3)),
        ..scenario()
    });
    let last = data.projections.last().unwrap();
    assert_eq!(last.year, 2029);
    assert_eq!(last.property_value, dec!(579_637));
}

#[test]
fn negatively_geared_investment_gets_tax_returns() {
    let data = calculate_property_data(&PropertyInput {
        deposit: Some(dec!(60_000)),
        is_living_here: Some(false),
        weekly_rent: Some(dec!(550)),
        rental_growth: Some(dec!(10)),
        strata_fees: Some(dec!(1_000)),
        ..scenario()
    });
    let first = &data.projections[0];
    assert_eq!(first.rental_income, dec!(27_500));
    assert!(first.tax_return.unwrap() > Decimal::ZERO);
    assert!(first.net_cash_flow.unwrap() < Decimal::ZERO);

    // Returns accumulate rent and refunds year on year.
    let returns: Vec<Decimal> = data.projections.iter().map(|p| p.returns.unwrap()).collect();
    assert!(returns.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unfinanceable_scenario_is_visible_in_results() {
    let data = calculate_property_data(&PropertyInput {
        deposit: Some(dec!(15_000)),
        ..scenario()
    });
    assert_eq!(data.loan.lmi, None);
    assert!(data.projections.iter().all(|p| p.spent.is_none() && p.roi.is_none()));
    assert!(data.projections.iter().all(|p| p.tax_return == Some(Decimal::ZERO)));

    let json = serde_json::to_value(&data).unwrap();
    assert!(json["loan"]["amount"].is_null());
    assert!(json["projections"][0]["equity"].is_null());
    assert_eq!(json["projections"][0]["taxReturn"].as_f64(), Some(0.0));
}

#[rstest]
#[case(StateCode::Nsw)]
#[case(StateCode::Vic)]
#[case(StateCode::Qld)]
#[case(StateCode::Sa)]
#[case(StateCode::Wa)]
#[case(StateCode::Tas)]
#[case(StateCode::Nt)]
#[case(StateCode::Act)]
fn every_state_produces_a_complete_projection(#[case] state: StateCode) {
    let data = calculate_property_data(&PropertyInput {
        state: Some(state),
        is_living_here: Some(false),
        weekly_rent: Some(dec!(600)),
        projection_years: Some(10),
        ..scenario()
    });
    assert_eq!(data.projections.len(), 10);
    assert!(data.stamp_duty > Decimal::ZERO);
    assert!(data.expenses.government_fees > Decimal::ZERO);
    assert!(data.projections.iter().all(|p| p.equity.is_some()));
}

#[test]
fn reads_partial_json_with_camel_case_keys() {
    let input: PropertyInput = serde_json::from_str(
        r#"{
            "propertyValue": 600000,
            "deposit": 120000,
            "propertyType": "house",
            "isLivingHere": false,
            "weeklyRent": 600,
            "loan": { "term": 25, "includeStampDuty": true },
            "expenses": { "ongoing": { "council": 2400 } },
            "state": "vic",
            "startYear": 2025
        }"#,
    )
    .unwrap();

    assert_eq!(input.loan.unwrap().term, Some(25));
    assert_eq!(input.state, Some(StateCode::Vic));

    let data = calculate_property_data(&input);
    assert_eq!(data.expenses.ongoing.council, dec!(2_400));
    assert_eq!(data.expenses.ongoing.water, dec!(1_200));
    assert!(data.loan.include_stamp_duty);

    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["state"], "VIC");
    assert_eq!(json["projections"].as_array().unwrap().len(), 5);
    assert!(json["loan"]["monthlyMortgage"].is_number());
}

#[test]
fn unknown_state_in_json_falls_back_to_nsw() {
    let input: PropertyInput =
        serde_json::from_str(r#"{ "propertyValue": 600000, "state": "XX" }"#).unwrap();
    let data = calculate_property_data(&input);
    assert_eq!(data.state, StateCode::Nsw);
    assert_eq!(data.stamp_duty, dec!(21_412));
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(32))]

    #[test]
    fn prop_recalculation_is_idempotent(
        value in 0u32..3_000_000,
        deposit_pct in 0u32..101,
        fhb in proptest::bool::ANY,
        living_here in proptest::bool::ANY,
        brand_new in proptest::bool::ANY,
        type_index in 0usize..4,
        state_index in 0usize..8,
        interest_only in proptest::bool::ANY,
        include_duty in proptest::bool::ANY,
        term in 0u32..60,
        rate_bp in 0u32..1500,
        weekly_rent in 0u32..2_000,
        growth_bp in 0u32..1000,
    ) {
        let types = [
            PropertyType::House,
            PropertyType::Townhouse,
            PropertyType::Apartment,
            PropertyType::Land,
        ];
        let value = Decimal::from(value);
        let input = PropertyInput {
            property_value: Some(value),
            deposit: Some(value * Decimal::from(deposit_pct) / dec!(100)),
            first_home_buyer: Some(fhb),
            is_living_here: Some(living_here),
            property_type: Some(types[type_index]),
            is_brand_new: Some(brand_new),
            loan: Some(LoanInput {
                is_interest_only: Some(interest_only),
                term: Some(term),
                interest: Some(Decimal::from(rate_bp) / dec!(100)),
                include_stamp_duty: Some(include_duty),
            }),
            weekly_rent: Some(Decimal::from(weekly_rent)),
            capital_growth: Some(Decimal::from(growth_bp) / dec!(100)),
            state: Some(StateCode::ALL[state_index]),
            start_year: Some(2025),
            ..Default::default()
        };

        let first = calculate_property_data(&input);
        let second = calculate_property_data(&first.as_input());
        prop_assert_eq!(first, second);
    }
}
