//! Year-by-year projection of value, cash flow, equity and return.
//!
//! Each year is derived from the state carried out of the previous year
//! (cumulative principal, rent and tax returns, current value and rent) plus the
//! fixed scenario inputs in [`ProjectionParams`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::loan::annual_breakdown;
use crate::money::{round_cents, round_dollars, round_half_up};
use crate::property::Projection;
use crate::tax::{
    TaxableCostInput, calculate_depreciation, calculate_tax_return, calculate_taxable_cost,
};

/// Rented weeks per year after a 3% vacancy allowance on 52 weeks.
pub const RENTED_WEEKS_PER_YEAR: Decimal = dec!(50);

pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

/// A loan that could be quoted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub amount: Decimal,
    pub annual_rate_pct: Decimal,
    pub term_years: u32,
    pub is_interest_only: bool,
    pub monthly_repayment: Decimal,
}

/// Fixed inputs to a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub start_year: i32,
    pub years: u32,
    pub purchase_price: Decimal,
    pub deposit: Decimal,
    /// First home owner grant.
    pub rebate: Decimal,
    pub stamp_duty: Decimal,
    /// Stamp duty was added to the loan instead of paid up front.
    pub stamp_duty_financed: bool,
    pub one_time_expenses: Decimal,
    pub ongoing_expenses: Decimal,
    pub strata_annual: Decimal,
    pub weekly_rent: Decimal,
    pub rental_growth_per_week: Decimal,
    /// Capital growth in per cent per year.
    pub capital_growth_rate: Decimal,
    pub is_investment: bool,
    /// `None` when the loan cannot be quoted.
    pub loan: Option<LoanTerms>,
}

#[derive(Debug, Clone, Copy)]
struct CarriedState {
    property_value: Decimal,
    weekly_rent: Decimal,
    cumulative_principal: Decimal,
    cumulative_rental_income: Decimal,
    cumulative_tax_returns: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct LoanYear {
    net_cash_flow: Decimal,
    tax_return: Decimal,
    taxable_amount: Decimal,
    equity: Decimal,
    spent: Decimal,
    returns: Decimal,
    roi: Decimal,
    annual_interest: Decimal,
}

impl ProjectionParams {
    /// Deposit net of the grant, one-time costs and any duty paid in cash.
    pub fn upfront_costs(&self) -> Decimal {
        let duty_paid_in_cash = if self.stamp_duty_financed {
            Decimal::ZERO
        } else {
            self.stamp_duty
        };
        self.deposit - self.rebate + self.one_time_expenses + duty_paid_in_cash
    }
}

/// Projects the scenario over `params.years` calendar years from `start_year`.
pub fn calculate_multi_year_projections(params: &ProjectionParams) -> Vec<Projection> {
    let mut state = CarriedState {
        property_value: params.purchase_price,
        weekly_rent: params.weekly_rent,
        cumulative_principal: Decimal::ZERO,
        cumulative_rental_income: Decimal::ZERO,
        cumulative_tax_returns: Decimal::ZERO,
    };
    let growth_factor = Decimal::ONE + params.capital_growth_rate / dec!(100);

    let mut projections = Vec::with_capacity(params.years as usize);
    for index in 0..params.years {
        if params.is_investment && index > 0 {
            state.weekly_rent += params.rental_growth_per_week;
        }
        let rental_income = if params.is_investment {
            state.weekly_rent * RENTED_WEEKS_PER_YEAR
        } else {
            Decimal::ZERO
        };

        state.property_value *= growth_factor;

        let loan_year = params
            .loan
            .map(|loan| project_loan_year(params, &loan, index, rental_income, &mut state));

        if let Some(year) = &loan_year {
            log::debug!(
                "Projection year {}: value {}, equity {}, roi {}%",
                index + 1,
                round_dollars(state.property_value),
                year.equity,
                year.roi
            );
        }

        // Owner-occupiers have nothing to claim whether or not the loan exists.
        let (tax_return, taxable_amount) = if params.is_investment {
            (
                loan_year.map(|y| y.tax_return),
                loan_year.map(|y| y.taxable_amount),
            )
        } else {
            (Some(Decimal::ZERO), Some(Decimal::ZERO))
        };

        projections.push(Projection {
            year: params.start_year.saturating_add(index as i32),
            property_value: round_dollars(state.property_value),
            net_cash_flow: loan_year.map(|y| y.net_cash_flow),
            rental_income: round_dollars(rental_income),
            weekly_rent: if params.is_investment {
                round_cents(state.weekly_rent)
            } else {
                Decimal::ZERO
            },
            tax_return,
            taxable_amount,
            equity: loan_year.map(|y| y.equity),
            spent: loan_year.map(|y| y.spent),
            returns: loan_year.map(|y| y.returns),
            roi: loan_year.map(|y| y.roi),
            annual_interest: loan_year.map(|y| y.annual_interest),
        });
    }

    projections
}

fn project_loan_year(
    params: &ProjectionParams,
    loan: &LoanTerms,
    index: u32,
    rental_income: Decimal,
    state: &mut CarriedState,
) -> LoanYear {
    let breakdown = annual_breakdown(
        index + 1,
        loan.amount,
        loan.annual_rate_pct,
        loan.term_years,
        loan.is_interest_only,
    );
    state.cumulative_principal += breakdown.principal;

    let one_time_this_year = if index == 0 {
        params.one_time_expenses
    } else {
        Decimal::ZERO
    };

    let (taxable_amount, tax_return) = if params.is_investment {
        let taxable = calculate_taxable_cost(&TaxableCostInput {
            annual_interest: breakdown.interest,
            one_time_expenses: one_time_this_year,
            ongoing_expenses: params.ongoing_expenses,
            strata_annual: params.strata_annual,
            depreciation: calculate_depreciation(state.property_value),
            annual_rental_income: rental_income,
        });
        let tax_return = calculate_tax_return(taxable);
        state.cumulative_rental_income += rental_income;
        state.cumulative_tax_returns += tax_return;
        (taxable, tax_return)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let annual_mortgage = loan.monthly_repayment * dec!(12);
    let recurring_costs = annual_mortgage + params.strata_annual + params.ongoing_expenses;
    let spent = params.upfront_costs() + recurring_costs * Decimal::from(index + 1);

    let capital_growth_total = state.property_value - params.purchase_price + params.rebate;
    let equity = (params.deposit - params.rebate) + state.cumulative_principal + capital_growth_total;

    let returns = state.cumulative_rental_income + state.cumulative_tax_returns;
    let roi = if spent.is_zero() {
        Decimal::ZERO
    } else {
        (returns + capital_growth_total - spent) / spent * dec!(100)
    };

    let net_cash_flow =
        rental_income + tax_return - annual_mortgage - params.strata_annual - params.ongoing_expenses
            - one_time_this_year;

    LoanYear {
        net_cash_flow: round_dollars(net_cash_flow),
        tax_return,
        taxable_amount: round_dollars(taxable_amount),
        equity: round_dollars(equity),
        spent: round_dollars(spent),
        returns: round_dollars(returns),
        roi: round_half_up(roi, 2),
        annual_interest: round_dollars(breakdown.interest),
    }
}
