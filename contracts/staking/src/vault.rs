//! Compounding vault.
//!
//! For every single-asset pool the vault owns one ordinary stake-ledger
//! position, held under the contract's own address, and issues shares
//! against it. Harvesting re-stakes the net reward into that position without
//! minting shares, so each share's claim on the underlying grows.
//!
//! Settled reward that does not fit under the pool's hard cap is parked in
//! [`VaultState::unstaked_reward`]. It belongs to the shareholders like the
//! staked principal does, but earns nothing until a harvest finds room to
//! stake it.

use common::math::{self, SHARE_PRECISION};
use common::storage;
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol};

use crate::config::StakingConfig;
use crate::events;
use crate::ledger::{self, UserStake};
use crate::pool::{self, Pool};
use crate::rewards::{self, FeeBreakdown};
use crate::settlement;
use crate::ContractError;

const VAULT_STATE: Symbol = symbol_short!("VLT_STATE");
const VAULT_USER: Symbol = symbol_short!("VLT_USR");

/// A depositor's stake in one pool's vault.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultUser {
    pub shares: i128,
    /// Cumulative amount deposited, for reporting.
    pub deposited: i128,
    /// Set when the user's first shares in this pool are minted.
    pub lock_expiry: u64,
    pub last_deposit: u64,
}

/// Per-pool share supply and the reward held outside the stake ledger.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultState {
    pub total_shares: i128,
    pub unstaked_reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultInfo {
    pub pool_id: u32,
    pub total_shares: i128,
    /// `staked + unstaked_reward`, the amount all shares redeem for.
    pub total_underlying: i128,
    /// Principal of the vault's ledger position.
    pub staked: i128,
    pub unstaked_reward: i128,
    /// Reward accrued on the underlying and not yet compounded.
    pub pending: i128,
    pub price_per_share: i128,
}

// ── Share math ───────────────────────────────────────────────────────────────

pub fn shares_for_deposit(amount: i128, total_shares: i128, total_underlying: i128) -> Option<i128> {
    if total_shares == 0 || total_underlying == 0 {
        return Some(amount);
    }
    math::mul_div_floor(amount, total_shares, total_underlying)
}

pub fn amount_for_shares(shares: i128, total_shares: i128, total_underlying: i128) -> Option<i128> {
    if total_shares == 0 {
        return Some(0);
    }
    math::mul_div_floor(shares, total_underlying, total_shares)
}

pub fn price_per_full_share(total_underlying: i128, total_shares: i128) -> Option<i128> {
    if total_shares == 0 {
        return Some(SHARE_PRECISION);
    }
    math::mul_div_floor(total_underlying, SHARE_PRECISION, total_shares)
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn state_key(pool_id: u32) -> (Symbol, u32) {
    (VAULT_STATE, pool_id)
}

fn user_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (VAULT_USER, pool_id, user.clone())
}

pub fn load_state(env: &Env, pool_id: u32) -> VaultState {
    env.storage()
        .persistent()
        .get(&state_key(pool_id))
        .unwrap_or_default()
}

fn save_state(env: &Env, pool_id: u32, state: &VaultState) {
    let key = state_key(pool_id);
    env.storage().persistent().set(&key, state);
    storage::bump(env, &key);
}

pub fn load_user(env: &Env, pool_id: u32, user: &Address) -> VaultUser {
    env.storage()
        .persistent()
        .get(&user_key(pool_id, user))
        .unwrap_or_default()
}

fn save_user(env: &Env, pool_id: u32, user: &Address, account: &VaultUser) {
    let key = user_key(pool_id, user);
    env.storage().persistent().set(&key, account);
    storage::bump(env, &key);
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn holder(env: &Env) -> Address {
    env.current_contract_address()
}

fn load_compoundable(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let pool = pool::load(env, pool_id)?;
    if !pool.config.is_single_asset() {
        return Err(ContractError::AssetMismatch);
    }
    Ok(pool)
}

/// Underlying redeemable by all shares together.
pub fn underlying(position: &UserStake, state: &VaultState) -> Option<i128> {
    math::checked_add(position.principal, state.unstaked_reward)
}

/// Settles the vault's pending reward, fee-free, into `unstaked_reward`.
///
/// Runs before every principal or share change so that reward accrued so far
/// is counted once and belongs to the shares outstanding while it accrued.
fn settle_pending(
    env: &Env,
    config: &StakingConfig,
    pool: &mut Pool,
    position: &mut UserStake,
    state: &mut VaultState,
    now: u64,
) -> Result<(), ContractError> {
    let pending = settlement::pending_reward(env, config, pool, position, &holder(env), now)?;
    settlement::settle(pool, position, pending, now)?;
    state.unstaked_reward = math::checked_add(state.unstaked_reward, pending)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(())
}

/// Moves as much of `unstaked_reward` into the ledger position as the hard
/// cap allows. Returns the amount staked.
fn stake_unstaked(
    pool: &mut Pool,
    position: &mut UserStake,
    state: &mut VaultState,
    now: u64,
) -> Result<i128, ContractError> {
    let room = math::saturating_sub_floor_zero(pool.config.hard_cap, pool.total_staked);
    let amount = state.unstaked_reward.min(room);
    if amount <= 0 {
        return Ok(0);
    }
    ledger::credit(pool, position, amount, now)?;
    state.unstaked_reward =
        math::checked_sub(state.unstaked_reward, amount).ok_or(ContractError::ArithmeticOverflow)?;
    Ok(amount)
}

// ── Operations ───────────────────────────────────────────────────────────────

pub fn deposit(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    pool_id: u32,
    amount: i128,
) -> Result<i128, ContractError> {
    let mut pool = load_compoundable(env, pool_id)?;
    let now = env.ledger().timestamp();
    pool.check_deposit(now, amount)?;

    let vault = holder(env);
    let mut position = ledger::load(env, pool_id, &vault);
    let mut state = load_state(env, pool_id);
    settle_pending(env, config, &mut pool, &mut position, &mut state, now)?;

    let before = underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
    let shares = shares_for_deposit(amount, state.total_shares, before)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if shares <= 0 {
        return Err(ContractError::InvalidInput);
    }
    ledger::credit(&mut pool, &mut position, amount, now)?;

    let mut account = load_user(env, pool_id, user);
    if account.shares == 0 {
        account.lock_expiry = now.saturating_add(pool.config.lock_duration);
    }
    account.shares =
        math::checked_add(account.shares, shares).ok_or(ContractError::ArithmeticOverflow)?;
    account.deposited =
        math::checked_add(account.deposited, amount).ok_or(ContractError::ArithmeticOverflow)?;
    account.last_deposit = now;

    state.total_shares =
        math::checked_add(state.total_shares, shares).ok_or(ContractError::ArithmeticOverflow)?;
    save_state(env, pool_id, &state);
    save_user(env, pool_id, user, &account);
    ledger::save(env, pool_id, &vault, &position);
    pool::save(env, &pool);

    token::Client::new(env, &pool.config.deposit_token).transfer(user, &vault, &amount);

    events::publish_vault_deposit(env, pool_id, user.clone(), amount, shares);
    Ok(shares)
}

pub fn withdraw(
    env: &Env,
    config: &StakingConfig,
    user: &Address,
    pool_id: u32,
    shares: i128,
) -> Result<i128, ContractError> {
    if shares <= 0 {
        return Err(ContractError::NothingToWithdraw);
    }
    let mut pool = load_compoundable(env, pool_id)?;
    let mut account = load_user(env, pool_id, user);
    if shares > account.shares {
        return Err(ContractError::WithdrawExceedsBalance);
    }
    let now = env.ledger().timestamp();
    if pool.config.lock_duration > 0 && now < account.lock_expiry {
        return Err(ContractError::LockedPeriodActive);
    }

    let vault = holder(env);
    let mut position = ledger::load(env, pool_id, &vault);
    let mut state = load_state(env, pool_id);
    settle_pending(env, config, &mut pool, &mut position, &mut state, now)?;

    let total = underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
    let amount = amount_for_shares(shares, state.total_shares, total)
        .ok_or(ContractError::ArithmeticOverflow)?;

    // Unstaked reward is paid out first; the rest comes off the position.
    let from_reward = amount.min(state.unstaked_reward);
    let from_principal =
        math::checked_sub(amount, from_reward).ok_or(ContractError::ArithmeticOverflow)?;
    state.unstaked_reward = math::checked_sub(state.unstaked_reward, from_reward)
        .ok_or(ContractError::ArithmeticOverflow)?;
    ledger::debit(&mut pool, &mut position, from_principal)?;

    account.shares =
        math::checked_sub(account.shares, shares).ok_or(ContractError::ArithmeticOverflow)?;
    state.total_shares =
        math::checked_sub(state.total_shares, shares).ok_or(ContractError::ArithmeticOverflow)?;
    save_state(env, pool_id, &state);
    save_user(env, pool_id, user, &account);
    ledger::save(env, pool_id, &vault, &position);
    pool::save(env, &pool);

    if amount > 0 {
        token::Client::new(env, &pool.config.deposit_token).transfer(&vault, user, &amount);
    }

    events::publish_vault_withdraw(env, pool_id, user.clone(), shares, amount);
    Ok(amount)
}

/// Settles the vault position's reward, pays the fees and re-stakes the rest
/// together with any reward parked earlier, as far as the hard cap allows.
pub fn harvest(
    env: &Env,
    config: &StakingConfig,
    caller: &Address,
    pool_id: u32,
) -> Result<FeeBreakdown, ContractError> {
    let mut pool = load_compoundable(env, pool_id)?;
    let now = env.ledger().timestamp();
    let vault = holder(env);
    let mut position = ledger::load(env, pool_id, &vault);

    let gross = settlement::pending_reward(env, config, &pool, &position, &vault, now)?;
    if gross <= 0 {
        return Err(ContractError::ZeroClaimable);
    }
    let split = rewards::split_fees(gross, config.caller_fee_bps, config.claim_fee_bps)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let mut state = load_state(env, pool_id);
    settlement::settle(&mut pool, &mut position, gross, now)?;
    state.unstaked_reward = math::checked_add(state.unstaked_reward, split.net)
        .ok_or(ContractError::ArithmeticOverflow)?;
    stake_unstaked(&mut pool, &mut position, &mut state, now)?;
    save_state(env, pool_id, &state);
    ledger::save(env, pool_id, &vault, &position);
    pool::save(env, &pool);

    let total = underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
    let price =
        price_per_full_share(total, state.total_shares).ok_or(ContractError::ArithmeticOverflow)?;

    let reward = token::Client::new(env, &pool.config.reward_token);
    if split.caller_fee > 0 {
        reward.transfer(&vault, caller, &split.caller_fee);
    }
    if split.treasury_fee > 0 {
        reward.transfer(&vault, &config.treasury, &split.treasury_fee);
    }

    events::publish_vault_harvest(
        env,
        pool_id,
        caller.clone(),
        &split,
        state.unstaked_reward,
        price,
    );
    Ok(split)
}

/// Harvests every vault with shares outstanding and something pending.
/// Returns the summed net reward.
pub fn harvest_all(
    env: &Env,
    config: &StakingConfig,
    caller: &Address,
) -> Result<i128, ContractError> {
    let mut net: i128 = 0;
    let mut harvested = false;

    for pool_id in 0..pool::count(env) {
        if load_state(env, pool_id).total_shares == 0 {
            continue;
        }
        let split = match harvest(env, config, caller, pool_id) {
            Ok(split) => split,
            Err(ContractError::ZeroClaimable) | Err(ContractError::AssetMismatch) => continue,
            Err(e) => return Err(e),
        };
        net = math::checked_add(net, split.net).ok_or(ContractError::ArithmeticOverflow)?;
        harvested = true;
    }

    if !harvested {
        return Err(ContractError::ZeroClaimable);
    }
    Ok(net)
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn info(env: &Env, config: &StakingConfig, pool_id: u32) -> Result<VaultInfo, ContractError> {
    let pool = pool::load(env, pool_id)?;
    let vault = holder(env);
    let position = ledger::load(env, pool_id, &vault);
    let state = load_state(env, pool_id);
    let total = underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
    let pending = settlement::pending_reward(
        env,
        config,
        &pool,
        &position,
        &vault,
        env.ledger().timestamp(),
    )?;
    Ok(VaultInfo {
        pool_id,
        total_shares: state.total_shares,
        total_underlying: total,
        staked: position.principal,
        unstaked_reward: state.unstaked_reward,
        pending,
        price_per_share: price_per_full_share(total, state.total_shares)
            .ok_or(ContractError::ArithmeticOverflow)?,
    })
}

/// Current underlying value of `user`'s shares in a pool.
pub fn user_balance(env: &Env, pool_id: u32, user: &Address) -> Result<i128, ContractError> {
    let account = load_user(env, pool_id, user);
    if account.shares == 0 {
        return Ok(0);
    }
    let position = ledger::load(env, pool_id, &holder(env));
    let state = load_state(env, pool_id);
    let total = underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
    amount_for_shares(account.shares, state.total_shares, total)
        .ok_or(ContractError::ArithmeticOverflow)
}

pub fn preview_harvest(
    env: &Env,
    config: &StakingConfig,
    pool_id: u32,
) -> Result<FeeBreakdown, ContractError> {
    let pending = info(env, config, pool_id)?.pending;
    rewards::split_fees(pending, config.caller_fee_bps, config.claim_fee_bps)
        .ok_or(ContractError::ArithmeticOverflow)
}
