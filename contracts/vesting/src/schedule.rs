//! Vesting strategies and the pure release curve.
//!
//! A strategy unlocks `initial_unlock_bps` of an allocation at `start`, holds
//! through the cliff, then releases the remainder linearly over `duration`:
//!
//! ```text
//!   vested
//!     ^                              ___________ total
//!     |                          __/
//!     |                      __/
//!     |        _____________/  <- linear over `duration`
//!     |       |  initial
//!     +-------+-------------+-------------+------> time
//!           start     start+cliff    start+cliff+duration
//! ```

use common::math::{self, BPS_DENOMINATOR};
use common::storage;
use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::ContractError;

const STRATEGY: Symbol = symbol_short!("STRAT");
const STRATEGY_COUNT: Symbol = symbol_short!("STRAT_CNT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingStrategy {
    pub id: u32,
    pub name: String,
    /// Seconds after `start` before linear release begins.
    pub cliff: u64,
    pub start: u64,
    /// Seconds of linear release after the cliff.
    pub duration: u64,
    /// Released at `start`, in basis points of the allocation.
    pub initial_unlock_bps: u32,
    pub revocable: bool,
}

impl VestingStrategy {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.initial_unlock_bps > BPS_DENOMINATOR as u32 {
            return Err(ContractError::InvalidInput);
        }
        if self.start.checked_add(self.cliff).and_then(|t| t.checked_add(self.duration)).is_none() {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    pub fn cliff_end(&self) -> u64 {
        self.start.saturating_add(self.cliff)
    }

    pub fn end(&self) -> u64 {
        self.cliff_end().saturating_add(self.duration)
    }
}

/// Where a strategy stands at a given time. Never stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VestingPhase {
    Unreached = 0,
    Cliff = 1,
    Linear = 2,
    FullyVested = 3,
}

impl VestingPhase {
    pub fn at(now: u64, strategy: &VestingStrategy) -> Self {
        if now < strategy.start {
            VestingPhase::Unreached
        } else if now < strategy.cliff_end() {
            VestingPhase::Cliff
        } else if now < strategy.end() {
            VestingPhase::Linear
        } else {
            VestingPhase::FullyVested
        }
    }
}

/// Amount of `total` vested under `strategy` at `now`. Non-decreasing in
/// `now` and never above `total`.
pub fn vested_amount(total: i128, strategy: &VestingStrategy, now: u64) -> Option<i128> {
    match VestingPhase::at(now, strategy) {
        VestingPhase::Unreached => Some(0),
        VestingPhase::Cliff => math::apply_bps(total, strategy.initial_unlock_bps),
        VestingPhase::Linear => {
            let initial = math::apply_bps(total, strategy.initial_unlock_bps)?;
            let remaining = math::checked_sub(total, initial)?;
            let elapsed = now - strategy.cliff_end();
            let linear = math::mul_div_floor(
                remaining,
                i128::from(elapsed),
                i128::from(strategy.duration),
            )?;
            math::checked_add(initial, linear)
        }
        VestingPhase::FullyVested => Some(total),
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn strategy_key(id: u32) -> (Symbol, u32) {
    (STRATEGY, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&STRATEGY_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, id: u32) -> Result<VestingStrategy, ContractError> {
    if id >= count(env) {
        return Err(ContractError::StrategyNotFound);
    }
    env.storage()
        .persistent()
        .get(&strategy_key(id))
        .ok_or(ContractError::StrategyNotFound)
}

pub fn save(env: &Env, strategy: &VestingStrategy) {
    let key = strategy_key(strategy.id);
    env.storage().persistent().set(&key, strategy);
    storage::bump(env, &key);
}

/// Stores `strategy` under the next free id, which it returns.
pub fn push(env: &Env, mut strategy: VestingStrategy) -> u32 {
    let id = count(env);
    strategy.id = id;
    save(env, &strategy);
    env.storage()
        .instance()
        .set(&STRATEGY_COUNT, &id.saturating_add(1));
    id
}

pub fn load_all(env: &Env) -> Vec<VestingStrategy> {
    let mut strategies = Vec::new(env);
    for id in 0..count(env) {
        if let Ok(strategy) = load(env, id) {
            strategies.push_back(strategy);
        }
    }
    strategies
}
