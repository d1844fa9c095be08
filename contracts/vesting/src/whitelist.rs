//! Per-strategy allocations and the list of accounts holding one.

use common::{math, storage};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::schedule::{self, VestingStrategy};
use crate::ContractError;

const ENTRY: Symbol = symbol_short!("WL");
const MEMBERS: Symbol = symbol_short!("WL_USERS");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEntry {
    /// Total allocation under the strategy.
    pub amount: i128,
    /// Already transferred out. Never exceeds `amount`.
    pub released: i128,
    pub revoked: bool,
    /// Vested amount frozen at revocation.
    pub revoked_vested: i128,
    pub claiming_enabled: bool,
}

impl WhitelistEntry {
    pub fn new(amount: i128) -> Self {
        Self {
            amount,
            released: 0,
            revoked: false,
            revoked_vested: 0,
            claiming_enabled: true,
        }
    }

    /// Vested at `now`; frozen once revoked.
    pub fn vested(&self, strategy: &VestingStrategy, now: u64) -> Result<i128, ContractError> {
        if self.revoked {
            return Ok(self.revoked_vested);
        }
        schedule::vested_amount(self.amount, strategy, now).ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn releasable(&self, strategy: &VestingStrategy, now: u64) -> Result<i128, ContractError> {
        Ok(math::saturating_sub_floor_zero(
            self.vested(strategy, now)?,
            self.released,
        ))
    }
}

fn entry_key(strategy_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (ENTRY, strategy_id, user.clone())
}

fn members_key(strategy_id: u32) -> (Symbol, u32) {
    (MEMBERS, strategy_id)
}

pub fn has(env: &Env, strategy_id: u32, user: &Address) -> bool {
    env.storage().persistent().has(&entry_key(strategy_id, user))
}

pub fn load(env: &Env, strategy_id: u32, user: &Address) -> Result<WhitelistEntry, ContractError> {
    env.storage()
        .persistent()
        .get(&entry_key(strategy_id, user))
        .ok_or(ContractError::NotWhitelisted)
}

pub fn save(env: &Env, strategy_id: u32, user: &Address, entry: &WhitelistEntry) {
    let key = entry_key(strategy_id, user);
    env.storage().persistent().set(&key, entry);
    storage::bump(env, &key);
}

pub fn members(env: &Env, strategy_id: u32) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(strategy_id))
        .unwrap_or(Vec::new(env))
}

/// Creates a fresh entry for `user`. Fails if one already exists.
pub fn insert(env: &Env, strategy_id: u32, user: &Address, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    if has(env, strategy_id, user) {
        return Err(ContractError::AlreadyWhitelisted);
    }
    save(env, strategy_id, user, &WhitelistEntry::new(amount));

    let mut list = members(env, strategy_id);
    list.push_back(user.clone());
    let key = members_key(strategy_id);
    env.storage().persistent().set(&key, &list);
    storage::bump(env, &key);
    Ok(())
}
