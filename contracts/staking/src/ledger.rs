//! Stake ledger: one [`UserStake`] per `(pool, user)` plus the list of pools
//! each user has ever entered.
//!
//! Every principal change goes through [`credit`] or [`debit`], which move
//! the position and the pool's `total_staked` together so the two can never
//! drift apart.

use common::{math, storage};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::pool::Pool;
use crate::ContractError;

const STAKE: Symbol = symbol_short!("STK");
const USER_POOLS: Symbol = symbol_short!("USR_POOLS");

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserStake {
    /// Currently staked, withdrawable (subject to lock) amount.
    pub principal: i128,
    /// Deposits plus reinvested rewards, ever.
    pub total_invested: i128,
    /// When the current position was opened.
    pub joined_at: u64,
    /// Reward has been settled up to this timestamp.
    pub last_accrual: u64,
    /// Gross rewards settled for this position so far.
    pub total_claimed: i128,
    pub lock_expiry: u64,
}

impl UserStake {
    pub fn is_locked(&self, now: u64, lock_duration: u64) -> bool {
        lock_duration > 0 && now < self.lock_expiry
    }
}

fn stake_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (STAKE, pool_id, user.clone())
}

fn user_pools_key(user: &Address) -> (Symbol, Address) {
    (USER_POOLS, user.clone())
}

pub fn load(env: &Env, pool_id: u32, user: &Address) -> UserStake {
    env.storage()
        .persistent()
        .get(&stake_key(pool_id, user))
        .unwrap_or_default()
}

pub fn save(env: &Env, pool_id: u32, user: &Address, stake: &UserStake) {
    let key = stake_key(pool_id, user);
    env.storage().persistent().set(&key, stake);
    storage::bump(env, &key);
}

/// Pools `user` has held a position in, in order of first entry.
pub fn user_pools(env: &Env, user: &Address) -> Vec<u32> {
    env.storage()
        .persistent()
        .get(&user_pools_key(user))
        .unwrap_or(Vec::new(env))
}

pub fn track_pool(env: &Env, user: &Address, pool_id: u32) {
    let mut pools = user_pools(env, user);
    if pools.contains(pool_id) {
        return;
    }
    pools.push_back(pool_id);
    let key = user_pools_key(user);
    env.storage().persistent().set(&key, &pools);
    storage::bump(env, &key);
}

/// Adds `amount` to the position and the pool total.
///
/// A position receiving principal while empty is (re)opened: its join time
/// and lock expiry are set from `now`. Top-ups never move the lock.
pub fn credit(
    pool: &mut Pool,
    stake: &mut UserStake,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let new_total =
        math::checked_add(pool.total_staked, amount).ok_or(ContractError::ArithmeticOverflow)?;
    if new_total > pool.config.hard_cap {
        return Err(ContractError::HardcapReached);
    }

    if stake.principal == 0 {
        stake.joined_at = now;
        stake.last_accrual = now;
        stake.lock_expiry = now.saturating_add(pool.config.lock_duration);
    }
    stake.principal =
        math::checked_add(stake.principal, amount).ok_or(ContractError::ArithmeticOverflow)?;
    stake.total_invested = math::checked_add(stake.total_invested, amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    pool.total_staked = new_total;
    Ok(())
}

/// Removes `amount` from the position and the pool total.
pub fn debit(pool: &mut Pool, stake: &mut UserStake, amount: i128) -> Result<(), ContractError> {
    if amount > stake.principal {
        return Err(ContractError::AmountExceedsBalance);
    }
    stake.principal =
        math::checked_sub(stake.principal, amount).ok_or(ContractError::ArithmeticOverflow)?;
    pool.total_staked =
        math::checked_sub(pool.total_staked, amount).ok_or(ContractError::ArithmeticOverflow)?;
    Ok(())
}
