//! Loan repayments and the year-by-year split between principal and interest.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::{clamp_percent, round_cents, round_dollars, round_half_up};

/// Principal and interest paid during one loan year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualBreakdown {
    /// Principal repaid in the year.
    pub principal: Decimal,
    /// Interest charged in the year.
    pub interest: Decimal,
}

/// Payment details for a single month of an amortizing loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthPayment {
    /// 1-based month since settlement.
    pub month: u32,
    /// The remaining balance of the loan after the payment.
    pub new_balance: Decimal,
    /// The portion of the payment that goes towards reducing the principal.
    pub amortization: Decimal,
    /// The portion of the payment that covers interest.
    pub interest: Decimal,
}

/// Converts an annual percentage into the monthly decimal rate.
///
/// 6 (per cent per year) becomes 0.005 per month.
pub fn monthly_rate(annual_rate_pct: Decimal) -> Decimal {
    annual_rate_pct / dec!(1200)
}

/// Level monthly repayment for a principal-and-interest loan.
///
/// Uses the annuity formula `P * r / (1 - (1 + r)^-n)` with `r` the monthly rate
/// and `n = term_years * 12`, rounded to cents. Returns zero when there is no
/// principal, no interest or no term.
pub fn monthly_repayment(principal: Decimal, annual_rate_pct: Decimal, term_years: u32) -> Decimal {
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || term_years == 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    let months = u64::from(term_years) * 12;

    // P * r * (1 + r)^n / ((1 + r)^n - 1), which needs no negative power.
    let payment = match (Decimal::ONE + r).checked_powu(months) {
        Some(growth) if growth > Decimal::ONE => r
            .checked_mul(growth)
            .and_then(|factor| factor.checked_div(growth - Decimal::ONE))
            .and_then(|factor| principal.checked_mul(factor)),
        // Rate too small to register over the term.
        Some(_) => principal.checked_div(Decimal::from(months)),
        // (1 + r)^n overflowed; the repayment has converged to the interest.
        None => principal.checked_mul(r),
    };

    payment.map(round_cents).unwrap_or(Decimal::ZERO)
}

/// Monthly repayment of an interest-only loan, rounded to cents.
pub fn interest_only_repayment(principal: Decimal, annual_rate_pct: Decimal) -> Decimal {
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_cents(principal * monthly_rate(annual_rate_pct))
}

/// Principal and interest paid during `year` (1-based) of the loan.
///
/// Interest-only loans pay a constant `principal * r * 12` of interest and no
/// principal. Principal-and-interest loans are simulated month by month from
/// the first repayment so each year reflects the true amortization schedule;
/// the final month clears whatever balance remains after cent rounding.
///
/// Years outside `1..=term_years` pay nothing.
pub fn annual_breakdown(
    year: u32,
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_years: u32,
    is_interest_only: bool,
) -> AnnualBreakdown {
    if year == 0 || year > term_years {
        return AnnualBreakdown::default();
    }
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO {
        return AnnualBreakdown::default();
    }

    let r = monthly_rate(annual_rate_pct);

    if is_interest_only {
        return AnnualBreakdown {
            principal: Decimal::ZERO,
            interest: round_cents(principal * r * dec!(12)),
        };
    }

    let first_month = (year - 1) * 12 + 1;
    let last_month = year * 12;
    let (principal_paid, interest_paid) =
        amortization_schedule(principal, annual_rate_pct, term_years, last_month)
            .iter()
            .filter(|m| m.month >= first_month)
            .fold((Decimal::ZERO, Decimal::ZERO), |(p, i), m| {
                (p + m.amortization, i + m.interest)
            });

    AnnualBreakdown {
        principal: round_cents(principal_paid),
        interest: round_cents(interest_paid),
    }
}

/// Simulates a principal-and-interest loan month by month, up to and including
/// `through_month`.
///
/// Each month pays the cent-rounded [`monthly_repayment`]; the schedule ends
/// early once the balance is cleared, and the last month of the term repays
/// whatever balance is left.
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate_pct: Decimal,
    term_years: u32,
    through_month: u32,
) -> Vec<MonthPayment> {
    let payment = monthly_repayment(principal, annual_rate_pct, term_years);
    if payment.is_zero() {
        return Vec::new();
    }

    let r = monthly_rate(annual_rate_pct);
    let total_months = term_years * 12;
    let last_month = through_month.min(total_months);

    let mut balance = principal;
    let mut schedule = Vec::with_capacity(last_month as usize);
    for month in 1..=last_month {
        if balance <= Decimal::ZERO {
            break;
        }

        let interest = balance * r;
        let mut amortization = payment - interest;
        if month == total_months || amortization > balance {
            amortization = balance;
        }
        balance -= amortization;

        schedule.push(MonthPayment {
            month,
            new_balance: balance.max(Decimal::ZERO),
            amortization,
            interest,
        });
    }
    schedule
}

/// Loan-to-value ratio as a percentage in `[0, 100]`, rounded to two decimals.
pub fn loan_to_value_ratio(loan: Decimal, property_value: Decimal) -> Decimal {
    if property_value <= Decimal::ZERO || loan <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let ratio = loan
        .checked_div(property_value)
        .map(|r| r * dec!(100))
        .unwrap_or(Decimal::ZERO);
    round_half_up(clamp_percent(ratio), 2)
}

/// Deposit needed to reach `lvr` per cent on a purchase, rounded to the dollar.
pub fn deposit_from_lvr(property_value: Decimal, lvr: Decimal) -> Decimal {
    if property_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let share = Decimal::ONE - clamp_percent(lvr) / dec!(100);
    round_dollars(property_value * share).max(Decimal::ZERO)
}
