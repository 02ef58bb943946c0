//! First home owner grants.
//!
//! The grant is the "rebate" the projection subtracts from the buyer's outlay.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::state::StateCode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrantRule {
    pub amount: Decimal,
    /// Highest eligible purchase price, `None` when uncapped.
    pub value_cap: Option<Decimal>,
}

impl StateCode {
    /// The state's first home owner grant, `None` where it has been abolished.
    pub fn grant_rule(self) -> Option<GrantRule> {
        let (amount, value_cap) = match self {
            StateCode::Nsw => (dec!(10_000), Some(dec!(750_000))),
            StateCode::Vic => (dec!(10_000), Some(dec!(750_000))),
            StateCode::Qld => (dec!(30_000), Some(dec!(750_000))),
            StateCode::Sa => (dec!(15_000), None),
            StateCode::Wa => (dec!(10_000), Some(dec!(750_000))),
            StateCode::Tas => (dec!(10_000), None),
            StateCode::Nt => (dec!(50_000), None),
            StateCode::Act => return None,
        };
        Some(GrantRule { amount, value_cap })
    }
}

/// Grant payable for a purchase.
///
/// Only first home buyers moving into a brand-new dwelling qualify; vacant land
/// and investment purchases receive nothing.
pub fn first_home_owner_grant(
    value: Decimal,
    is_first_home_buyer: bool,
    is_brand_new: bool,
    is_living_here: bool,
    is_land: bool,
    state: StateCode,
) -> Decimal {
    if !is_first_home_buyer || !is_brand_new || !is_living_here || is_land {
        return Decimal::ZERO;
    }
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match state.grant_rule() {
        Some(rule) if rule.value_cap.is_none_or(|cap| value <= cap) => rule.amount,
        _ => Decimal::ZERO,
    }
}
