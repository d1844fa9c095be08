//! Reward accrual for a single position and the bookkeeping of settling it.

use common::math;
use soroban_sdk::{Address, Env};

use crate::config::StakingConfig;
use crate::interfaces::ValueRouterClient;
use crate::ledger::UserStake;
use crate::multiplier;
use crate::pool::{Pool, PoolConfig};
use crate::rewards;
use crate::ContractError;

/// Effective reward owed to `holder` for `stake`, in reward-asset units.
///
/// Base interest is denominated in the deposit asset, revalued into the
/// reward asset when the two differ, then multiplied.
pub fn pending_reward(
    env: &Env,
    config: &StakingConfig,
    pool: &Pool,
    stake: &UserStake,
    holder: &Address,
    now: u64,
) -> Result<i128, ContractError> {
    if stake.principal <= 0 {
        return Ok(0);
    }
    let elapsed = rewards::accrual_window(now, pool.config.end_time, stake.last_accrual);
    if elapsed == 0 {
        return Ok(0);
    }
    let base = rewards::base_reward(stake.principal, pool.config.apy_bps, elapsed)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if base == 0 {
        return Ok(0);
    }

    let valued = value_in_reward_asset(env, &pool.config, base)?;
    let multiplier = multiplier::resolve_multiplier(env, config, &pool.config, holder)?;
    rewards::apply_multiplier(valued, multiplier).ok_or(ContractError::ArithmeticOverflow)
}

/// Marks `gross` as settled and moves the accrual cursor forward.
///
/// The cursor never moves backwards, even if `end_time` was pulled in
/// below it after the last settlement.
pub fn settle(
    pool: &mut Pool,
    stake: &mut UserStake,
    gross: i128,
    now: u64,
) -> Result<(), ContractError> {
    stake.last_accrual = stake.last_accrual.max(pool.config.accrual_end(now));
    if gross == 0 {
        return Ok(());
    }
    stake.total_claimed =
        math::checked_add(stake.total_claimed, gross).ok_or(ContractError::ArithmeticOverflow)?;
    pool.total_rewards_paid = math::checked_add(pool.total_rewards_paid, gross)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(())
}

fn value_in_reward_asset(
    env: &Env,
    config: &PoolConfig,
    amount: i128,
) -> Result<i128, ContractError> {
    if config.is_single_asset() {
        return Ok(amount);
    }
    match &config.router {
        Some(router) => {
            let out = ValueRouterClient::new(env, router).get_amount_out(
                &amount,
                &config.deposit_token,
                &config.reward_token,
            );
            if out < 0 {
                return Err(ContractError::InvalidInput);
            }
            Ok(out)
        }
        None => Ok(amount),
    }
}
