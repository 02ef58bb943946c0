use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::expenses::normalize_expenses;
use crate::grant::first_home_owner_grant;
use crate::lmi::calculate_lmi;
use crate::loan::{interest_only_repayment, loan_to_value_ratio, monthly_repayment};
use crate::money::{currency_or, percent_or};
use crate::projection::{
    DEFAULT_PROJECTION_YEARS, LoanTerms, ProjectionParams, calculate_multi_year_projections,
};
use crate::property::{LoanDetails, LoanInput, PropertyData, PropertyInput, PropertyType};
use crate::stamp_duty::calculate_stamp_duty;

pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;
pub const MIN_LOAN_TERM_YEARS: u32 = 1;
pub const MAX_LOAN_TERM_YEARS: u32 = 50;
pub const DEFAULT_INTEREST_RATE: Decimal = dec!(6.0);
pub const DEFAULT_CAPITAL_GROWTH: Decimal = dec!(3.0);
pub const MAX_PROJECTION_YEARS: u32 = 50;

/// Calculates a complete scenario from partial input.
///
/// This is the only entry point screens and stores should depend on. Missing
/// fields take their defaults, negative amounts become zero, and percentages
/// are clamped to `[0, 100]`; nothing is rejected. Out-of-range values that
/// are stored as entered (such as a 60 year term) are reported by
/// [`validate_property_data`] and clamped only for the arithmetic.
///
/// Recalculating the result's [`PropertyData::as_input`] yields an identical
/// result.
///
/// [`validate_property_data`]: crate::validate_property_data
pub fn calculate_property_data(input: &PropertyInput) -> PropertyData {
    let property_value = currency_or(input.property_value, Decimal::ZERO);
    let deposit = currency_or(input.deposit, Decimal::ZERO);
    let first_home_buyer = input.first_home_buyer.unwrap_or(false);
    let is_living_here = input.is_living_here.unwrap_or(true);
    let property_type = input.property_type;
    let is_brand_new = input.is_brand_new.unwrap_or(false);
    let weekly_rent = currency_or(input.weekly_rent, Decimal::ZERO);
    let rental_growth = currency_or(input.rental_growth, Decimal::ZERO);
    let strata_fees = currency_or(input.strata_fees, Decimal::ZERO);
    let capital_growth = percent_or(input.capital_growth, DEFAULT_CAPITAL_GROWTH);
    let state = input.state.unwrap_or_default();
    let projection_years = input
        .projection_years
        .unwrap_or(DEFAULT_PROJECTION_YEARS)
        .clamp(1, MAX_PROJECTION_YEARS);
    let start_year = input
        .start_year
        .unwrap_or_else(|| chrono::Local::now().year());

    let is_land = property_type == Some(PropertyType::Land);
    let is_investment = !is_living_here;

    let stamp_duty = calculate_stamp_duty(property_value, first_home_buyer, is_land, state);
    let rebate = first_home_owner_grant(
        property_value,
        first_home_buyer,
        is_brand_new,
        is_living_here,
        is_land,
        state,
    );
    let expenses = normalize_expenses(input.expenses.as_ref(), property_type, is_living_here, state);
    let loan = derive_loan(
        &input.loan.unwrap_or_default(),
        property_value,
        deposit,
        stamp_duty,
    );

    log::debug!(
        "{} {}: duty {}, rebate {}, lvr {}%, lmi {:?}, loan {:?}",
        state,
        property_value,
        stamp_duty,
        rebate,
        loan.lvr,
        loan.lmi,
        loan.amount
    );

    let loan_terms = match (loan.amount, loan.monthly_mortgage) {
        (Some(amount), Some(monthly_repayment)) => Some(LoanTerms {
            amount,
            annual_rate_pct: loan.interest,
            term_years: effective_term(loan.term),
            is_interest_only: loan.is_interest_only,
            monthly_repayment,
        }),
        _ => {
            log::debug!("LVR {}% cannot be insured, loan figures left undefined", loan.lvr);
            None
        }
    };

    let projections = calculate_multi_year_projections(&ProjectionParams {
        start_year,
        years: projection_years,
        purchase_price: property_value,
        deposit,
        rebate,
        stamp_duty,
        stamp_duty_financed: loan.include_stamp_duty,
        one_time_expenses: expenses.one_time_total,
        ongoing_expenses: expenses.ongoing_total,
        strata_annual: strata_fees * dec!(4),
        weekly_rent,
        rental_growth_per_week: rental_growth,
        capital_growth_rate: capital_growth,
        is_investment,
        loan: loan_terms,
    });

    PropertyData {
        property_value,
        deposit,
        first_home_buyer,
        is_living_here,
        property_type,
        is_brand_new,
        loan,
        weekly_rent,
        rental_growth,
        strata_fees,
        capital_growth,
        stamp_duty,
        rebate,
        expenses,
        projections,
        state,
        projection_years,
        start_year,
    }
}

fn effective_term(term: u32) -> u32 {
    term.clamp(MIN_LOAN_TERM_YEARS, MAX_LOAN_TERM_YEARS)
}

/// Sizes the loan: purchase shortfall, optionally the stamp duty, plus LMI.
fn derive_loan(
    input: &LoanInput,
    property_value: Decimal,
    deposit: Decimal,
    stamp_duty: Decimal,
) -> LoanDetails {
    let is_interest_only = input.is_interest_only.unwrap_or(false);
    let term = input.term.unwrap_or(DEFAULT_LOAN_TERM_YEARS);
    let interest = percent_or(input.interest, DEFAULT_INTEREST_RATE);
    let include_stamp_duty = input.include_stamp_duty.unwrap_or(false);

    let mut base_loan = (property_value - deposit).max(Decimal::ZERO);
    if include_stamp_duty {
        base_loan += stamp_duty;
    }

    let lvr = loan_to_value_ratio(base_loan, property_value);
    let lmi = calculate_lmi(lvr, base_loan);
    let amount = lmi.map(|premium| base_loan + premium);
    let monthly_mortgage = amount.map(|amount| {
        if is_interest_only {
            interest_only_repayment(amount, interest)
        } else {
            monthly_repayment(amount, interest, effective_term(term))
        }
    });

    LoanDetails {
        is_interest_only,
        term,
        interest,
        include_stamp_duty,
        lvr,
        lmi,
        amount,
        monthly_mortgage,
    }
}
