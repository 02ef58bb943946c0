//! Lender's mortgage insurance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::{clamp_percent, round_dollars, round_half_up};

/// LVR at or below which no insurance is charged.
pub const LMI_FREE_LVR: Decimal = dec!(80);

/// Premium rates keyed by the highest LVR each tier covers.
pub const LMI_TIERS: [(Decimal, Decimal); 10] = [
    (dec!(82), dec!(0.0037)),
    (dec!(84), dec!(0.0070)),
    (dec!(86), dec!(0.0125)),
    (dec!(88), dec!(0.0175)),
    (dec!(90), dec!(0.0230)),
    (dec!(91), dec!(0.0280)),
    (dec!(92), dec!(0.0330)),
    (dec!(93), dec!(0.0420)),
    (dec!(94), dec!(0.0520)),
    (dec!(95), dec!(0.0600)),
];

/// Premium rate for an LVR above [`LMI_FREE_LVR`], `None` past the last tier.
pub fn lmi_rate(lvr: Decimal) -> Option<Decimal> {
    LMI_TIERS
        .iter()
        .find(|(upper, _)| lvr <= *upper)
        .map(|(_, rate)| *rate)
}

/// Calculates the LMI premium for a loan.
///
/// `lvr` is a percentage and is clamped to `[0, 100]` and rounded to two
/// decimals before the tier lookup. Loans at or under 80% pay nothing.
///
/// Returns `None` when the LVR is above 95%: no insurer will quote the loan, and
/// callers must carry that through instead of treating it as a zero premium.
pub fn calculate_lmi(lvr: Decimal, loan_amount: Decimal) -> Option<Decimal> {
    if loan_amount <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let lvr = round_half_up(clamp_percent(lvr), 2);
    if lvr <= LMI_FREE_LVR {
        return Some(Decimal::ZERO);
    }

    lmi_rate(lvr).map(|rate| round_dollars(loan_amount * rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(dec!(80.01), dec!(1_480))]
    #[case(dec!(82), dec!(1_480))]
    #[case(dec!(85), dec!(5_000))]
    #[case(dec!(90), dec!(9_200))]
    #[case(dec!(90.5), dec!(11_200))]
    #[case(dec!(95), dec!(24_000))]
    fn premium_follows_tiers(#[case] lvr: Decimal, #[case] expected: Decimal) {
        assert_eq!(calculate_lmi(lvr, dec!(400_000)), Some(expected));
    }

    #[test]
    fn no_premium_at_or_below_eighty_percent() {
        assert_eq!(calculate_lmi(dec!(80), dec!(400_000)), Some(Decimal::ZERO));
        assert_eq!(calculate_lmi(dec!(80.004), dec!(400_000)), Some(Decimal::ZERO));
        assert_eq!(calculate_lmi(dec!(-20), dec!(400_000)), Some(Decimal::ZERO));
    }

    #[test]
    fn above_ninety_five_percent_cannot_be_quoted() {
        assert_eq!(calculate_lmi(dec!(96), dec!(400_000)), None);
        assert_eq!(calculate_lmi(dec!(95.01), dec!(400_000)), None);
        assert_eq!(calculate_lmi(dec!(140), dec!(400_000)), None);
    }

    #[test]
    fn empty_loan_pays_nothing() {
        assert_eq!(calculate_lmi(dec!(96), Decimal::ZERO), Some(Decimal::ZERO));
        assert_eq!(calculate_lmi(dec!(90), dec!(-1)), Some(Decimal::ZERO));
    }
}
