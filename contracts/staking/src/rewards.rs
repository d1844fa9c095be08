//! Pure reward arithmetic.
//!
//! Nothing here touches storage, so every rounding decision can be tested in
//! isolation. All divisions floor: a fractional unit of reward is dropped for
//! good rather than carried to the next window.

use common::math::{self, BPS_DENOMINATOR, MULTIPLIER_PRECISION, SECONDS_PER_YEAR};
use soroban_sdk::contracttype;

/// How a gross reward is divided on harvest.
///
/// `caller_fee + treasury_fee + net == gross` always holds.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeBreakdown {
    pub gross: i128,
    pub caller_fee: i128,
    pub treasury_fee: i128,
    pub net: i128,
}

/// Seconds of accrual owed since `last_accrual`, clamped to `end_time`.
pub fn accrual_window(now: u64, end_time: u64, last_accrual: u64) -> u64 {
    now.min(end_time).saturating_sub(last_accrual)
}

/// Simple interest on `principal` at `apy_bps` for `elapsed` seconds.
pub fn base_reward(principal: i128, apy_bps: u32, elapsed: u64) -> Option<i128> {
    let numerator = principal
        .checked_mul(i128::from(apy_bps))?
        .checked_mul(i128::from(elapsed))?;
    numerator.checked_div(SECONDS_PER_YEAR.checked_mul(BPS_DENOMINATOR)?)
}

pub fn apply_multiplier(base: i128, multiplier: u32) -> Option<i128> {
    math::mul_div_floor(base, i128::from(multiplier), MULTIPLIER_PRECISION)
}

pub fn split_fees(gross: i128, caller_fee_bps: u32, claim_fee_bps: u32) -> Option<FeeBreakdown> {
    let caller_fee = math::apply_bps(gross, caller_fee_bps)?;
    let treasury_fee = math::apply_bps(gross, claim_fee_bps)?;
    let net = math::checked_sub(math::checked_sub(gross, caller_fee)?, treasury_fee)?;
    Some(FeeBreakdown {
        gross,
        caller_fee,
        treasury_fee,
        net,
    })
}
