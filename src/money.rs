//! Rounding and clamping helpers for currency and percentage figures.
//!
//! Every figure the engine stores is rounded "half up" (ties go towards positive
//! infinity), which is how scenario figures have always been displayed to users.
//! `Decimal::round_dp` defaults to banker's rounding, so it is never used directly.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Largest currency amount accepted from user input.
///
/// Anything above this is clamped so that compounding over a long projection can
/// never overflow `Decimal`.
pub const MAX_CURRENCY: Decimal = dec!(1_000_000_000_000);

/// Upper bound for any percentage input.
pub const MAX_PERCENT: Decimal = dec!(100);

/// Rounds half up to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}

/// Rounds to the nearest whole dollar.
pub fn round_dollars(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Rounds to the nearest cent.
pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// Resolves an optional currency input: missing falls back to `default`,
/// negatives become zero and huge values are capped at [`MAX_CURRENCY`].
pub fn currency_or(value: Option<Decimal>, default: Decimal) -> Decimal {
    value.unwrap_or(default).clamp(Decimal::ZERO, MAX_CURRENCY)
}

/// Resolves an optional percentage input into `[0, 100]`.
pub fn percent_or(value: Option<Decimal>, default: Decimal) -> Decimal {
    value.unwrap_or(default).clamp(Decimal::ZERO, MAX_PERCENT)
}

/// Clamps a percentage into `[0, 100]`.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_PERCENT)
}
