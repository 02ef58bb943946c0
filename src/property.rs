use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::{Expenses, ExpensesInput};
use crate::state::StateCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Townhouse,
    Apartment,
    Land,
}

/// Loan options as edited by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub is_interest_only: Option<bool>,
    /// Term in years.
    pub term: Option<u32>,
    /// Annual interest rate as a percentage (e.g. 6.1 for 6.1%).
    pub interest: Option<Decimal>,
    /// Whether stamp duty is added to the loan rather than paid up front.
    pub include_stamp_duty: Option<bool>,
}

/// The loan with its derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub is_interest_only: bool,
    pub term: u32,
    pub interest: Decimal,
    pub include_stamp_duty: bool,
    /// Loan-to-value ratio of the loan before insurance, in per cent.
    pub lvr: Decimal,
    /// Mortgage insurance premium; `None` when the LVR cannot be insured.
    pub lmi: Option<Decimal>,
    /// Total borrowed including capitalised insurance.
    pub amount: Option<Decimal>,
    pub monthly_mortgage: Option<Decimal>,
}

impl LoanDetails {
    pub fn as_input(&self) -> LoanInput {
        LoanInput {
            is_interest_only: Some(self.is_interest_only),
            term: Some(self.term),
            interest: Some(self.interest),
            include_stamp_duty: Some(self.include_stamp_duty),
        }
    }

    /// Whether an insurer can quote the loan at all.
    pub fn is_financeable(&self) -> bool {
        self.amount.is_some()
    }
}

/// One calendar year of a projection.
///
/// Figures that depend on the loan are `None` in every year when the loan
/// cannot be quoted. An owner-occupier's tax figures are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub year: i32,
    pub property_value: Decimal,
    /// Cash in minus cash out for this year alone.
    pub net_cash_flow: Option<Decimal>,
    pub rental_income: Decimal,
    pub weekly_rent: Decimal,
    pub tax_return: Option<Decimal>,
    pub taxable_amount: Option<Decimal>,
    pub equity: Option<Decimal>,
    /// Cumulative amount spent since purchase.
    pub spent: Option<Decimal>,
    /// Cumulative rental income plus tax returns.
    pub returns: Option<Decimal>,
    /// Return on investment in per cent.
    pub roi: Option<Decimal>,
    pub annual_interest: Option<Decimal>,
}

/// A scenario as edited by the user. Every field is optional; missing fields
/// take the documented defaults in [`calculate_property_data`].
///
/// [`calculate_property_data`]: crate::calculate_property_data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub property_value: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub first_home_buyer: Option<bool>,
    pub is_living_here: Option<bool>,
    pub property_type: Option<PropertyType>,
    pub is_brand_new: Option<bool>,
    pub loan: Option<LoanInput>,
    pub weekly_rent: Option<Decimal>,
    /// Dollars per week added to the rent each year.
    pub rental_growth: Option<Decimal>,
    /// Strata levies per quarter.
    pub strata_fees: Option<Decimal>,
    /// Capital growth in per cent per year.
    pub capital_growth: Option<Decimal>,
    pub expenses: Option<ExpensesInput>,
    pub state: Option<StateCode>,
    pub projection_years: Option<u32>,
    pub start_year: Option<i32>,
}

/// A fully calculated scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub property_value: Decimal,
    pub deposit: Decimal,
    pub first_home_buyer: bool,
    pub is_living_here: bool,
    pub property_type: Option<PropertyType>,
    pub is_brand_new: bool,
    pub loan: LoanDetails,
    pub weekly_rent: Decimal,
    pub rental_growth: Decimal,
    pub strata_fees: Decimal,
    pub capital_growth: Decimal,
    pub stamp_duty: Decimal,
    /// First home owner grant received.
    pub rebate: Decimal,
    pub expenses: Expenses,
    pub projections: Vec<Projection>,
    pub state: StateCode,
    pub projection_years: u32,
    pub start_year: i32,
}

impl PropertyData {
    pub fn is_land(&self) -> bool {
        self.property_type == Some(PropertyType::Land)
    }

    pub fn is_investment(&self) -> bool {
        !self.is_living_here
    }

    /// The input that recalculates to this exact scenario.
    pub fn as_input(&self) -> PropertyInput {
        PropertyInput {
            property_value: Some(self.property_value),
            deposit: Some(self.deposit),
            first_home_buyer: Some(self.first_home_buyer),
            is_living_here: Some(self.is_living_here),
            property_type: self.property_type,
            is_brand_new: Some(self.is_brand_new),
            loan: Some(self.loan.as_input()),
            weekly_rent: Some(self.weekly_rent),
            rental_growth: Some(self.rental_growth),
            strata_fees: Some(self.strata_fees),
            capital_growth: Some(self.capital_growth),
            expenses: Some(self.expenses.as_input()),
            state: Some(self.state),
            projection_years: Some(self.projection_years),
            start_year: Some(self.start_year),
        }
    }
}
