//! Checked integer fixed-point helpers.
//!
//! Every amount in the workspace is an `i128` token quantity. Division always
//! truncates toward zero, which for the non-negative operands used by the
//! contracts is a floor: fractional remainders are dropped, never credited.
//! Helpers return `None` on overflow or a zero denominator and callers map
//! that to their own `ArithmeticOverflow` error.

/// Denominator for basis-point rates and percentages (100 % = 10 000).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Seconds in a 365-day year, the period `apy_bps` is quoted over.
pub const SECONDS_PER_YEAR: i128 = 31_536_000;

/// Multipliers are expressed in hundredths: 100 = 1×, 150 = 1.5×.
pub const MULTIPLIER_PRECISION: i128 = 100;

/// Scale of the compounding vault's price-per-share.
pub const SHARE_PRECISION: i128 = 1_000_000_000_000_000_000;

/// `a * b / denom`, floored, or `None` on overflow / zero denominator.
pub fn mul_div_floor(a: i128, b: i128, denom: i128) -> Option<i128> {
    if denom == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denom)
}

/// Floor of `amount * bps / 10 000`.
pub fn apply_bps(amount: i128, bps: u32) -> Option<i128> {
    mul_div_floor(amount, i128::from(bps), BPS_DENOMINATOR)
}

pub fn checked_add(a: i128, b: i128) -> Option<i128> {
    a.checked_add(b)
}

pub fn checked_sub(a: i128, b: i128) -> Option<i128> {
    a.checked_sub(b)
}

/// `a - b`, clamped at zero.
pub fn saturating_sub_floor_zero(a: i128, b: i128) -> i128 {
    let diff = a.saturating_sub(b);
    if diff < 0 {
        0
    } else {
        diff
    }
}
