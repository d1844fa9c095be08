//! Pool registry: configuration, lifecycle phase and storage of every pool.
//!
//! Pools are addressed by a dense `u32` index assigned at creation. Their
//! lifecycle is never stored; [`PoolPhase::at`] derives it from the ledger
//! timestamp and the configured window each time it is needed.

use common::storage;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

/// Administrator-supplied pool parameters. Replaced wholesale by `set_pool`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub deposit_token: Address,
    /// May equal `deposit_token`; only single-asset pools can be compounded.
    pub reward_token: Address,
    /// Values deposit-asset rewards in reward-asset units when the two differ.
    pub router: Option<Address>,
    /// Annual reward rate in basis points (2 400 = 24 %).
    pub apy_bps: u32,
    /// Seconds a position stays locked after it is opened. 0 disables locking.
    pub lock_duration: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub min_deposit: i128,
    pub max_deposit: i128,
    pub hard_cap: i128,
    /// Bonus for NFT holders, in hundredths (200 = 2×).
    pub nft_multiplier: u32,
    pub nft_multiplier_active: bool,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.start_time >= self.end_time {
            return Err(ContractError::InvalidInput);
        }
        if self.min_deposit < 0 || self.max_deposit <= 0 || self.min_deposit > self.max_deposit {
            return Err(ContractError::InvalidInput);
        }
        if self.hard_cap <= 0 {
            return Err(ContractError::InvalidInput);
        }
        if self.nft_multiplier_active && self.nft_multiplier < 100 {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    pub fn is_single_asset(&self) -> bool {
        self.deposit_token == self.reward_token
    }

    /// Accrual never runs past `end_time`.
    pub fn accrual_end(&self, now: u64) -> u64 {
        now.min(self.end_time)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub config: PoolConfig,
    /// Sum of every position's principal, the vault's included.
    pub total_staked: i128,
    /// Gross rewards settled out of this pool so far.
    pub total_rewards_paid: i128,
}

impl Pool {
    /// Checks a single incoming deposit against the pool's window and bounds.
    ///
    /// The hard cap is enforced when principal is credited, since reinvested
    /// rewards count against it too.
    pub fn check_deposit(&self, now: u64, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::AmountZero);
        }
        if amount < self.config.min_deposit || amount > self.config.max_deposit {
            return Err(ContractError::AmountExceedsBounds);
        }
        if PoolPhase::at(now, &self.config) != PoolPhase::Open {
            return Err(ContractError::StakingDisabled);
        }
        Ok(())
    }
}

/// Lifecycle of a pool relative to the current ledger time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolPhase {
    /// Before `start_time`: no deposits yet.
    Pending = 0,
    /// Accepting deposits.
    Open = 1,
    /// At or after `end_time`: exits and harvests only.
    Closed = 2,
}

impl PoolPhase {
    pub fn at(now: u64, config: &PoolConfig) -> Self {
        if now < config.start_time {
            PoolPhase::Pending
        } else if now < config.end_time {
            PoolPhase::Open
        } else {
            PoolPhase::Closed
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    if id >= count(env) {
        return Err(ContractError::InvalidPoolId);
    }
    env.storage()
        .persistent()
        .get(&pool_key(id))
        .ok_or(ContractError::InvalidPoolId)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    storage::bump(env, &key);
}

/// Appends a fresh pool and returns its id.
pub fn push(env: &Env, config: PoolConfig) -> u32 {
    let id = count(env);
    save(
        env,
        &Pool {
            id,
            config,
            total_staked: 0,
            total_rewards_paid: 0,
        },
    );
    env.storage().instance().set(&POOL_COUNT, &id.saturating_add(1));
    id
}

pub fn load_all(env: &Env) -> Vec<Pool> {
    let mut pools = Vec::new(env);
    for id in 0..count(env) {
        if let Ok(pool) = load(env, id) {
            pools.push_back(pool);
        }
    }
    pools
}
