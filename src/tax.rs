//! Negative gearing approximation for investment properties.
//!
//! Deductible costs above rental income are refunded at a single flat marginal
//! rate. Owner-occupied scenarios never reach this module.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::round_dollars;

/// Building depreciation claimed each year, as a share of property value.
pub const DEPRECIATION_RATE: Decimal = dec!(0.025);

/// Marginal tax rate applied to a net rental loss.
pub const MARGINAL_TAX_RATE: Decimal = dec!(0.30);

/// Inputs to a year's taxable cost. One-time expenses are only passed for the
/// first projection year; later years pass zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxableCostInput {
    pub annual_interest: Decimal,
    pub one_time_expenses: Decimal,
    pub ongoing_expenses: Decimal,
    pub strata_annual: Decimal,
    pub depreciation: Decimal,
    pub annual_rental_income: Decimal,
}

pub fn calculate_depreciation(property_value: Decimal) -> Decimal {
    round_dollars(property_value * DEPRECIATION_RATE)
}

/// Deductions minus rental income. Positive means a net loss.
pub fn calculate_taxable_cost(input: &TaxableCostInput) -> Decimal {
    round_dollars(input.annual_interest)
        + input.one_time_expenses
        + input.ongoing_expenses
        + input.strata_annual
        + input.depreciation
        - input.annual_rental_income
}

/// Refund for a net loss; nothing when the property is positively geared.
pub fn calculate_tax_return(taxable_cost: Decimal) -> Decimal {
    if taxable_cost > Decimal::ZERO {
        round_dollars(taxable_cost * MARGINAL_TAX_RATE)
    } else {
        Decimal::ZERO
    }
}
