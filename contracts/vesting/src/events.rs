#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::schedule::VestingStrategy;

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when a strategy is added or replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyEvent {
    pub strategy_id: u32,
    pub start: u64,
    pub cliff: u64,
    pub duration: u64,
    pub initial_unlock_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistedEvent {
    pub strategy_id: u32,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimingToggledEvent {
    pub strategy_id: u32,
    pub user: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub strategy_id: u32,
    pub user: Address,
    pub caller: Address,
    pub amount: i128,
    pub total_released: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevokedEvent {
    pub strategy_id: u32,
    pub user: Address,
    pub vested: i128,
    pub unvested: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxTransferSetEvent {
    pub amount: i128,
    pub active: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenSetEvent {
    pub token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRescuedEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_strategy_added(env: &Env, strategy: &VestingStrategy) {
    publish_strategy(env, symbol_short!("STRAT_ADD"), strategy);
}

pub fn publish_strategy_updated(env: &Env, strategy: &VestingStrategy) {
    publish_strategy(env, symbol_short!("STRAT_SET"), strategy);
}

fn publish_strategy(env: &Env, topic: Symbol, strategy: &VestingStrategy) {
    env.events().publish(
        (topic, strategy.id),
        StrategyEvent {
            strategy_id: strategy.id,
            start: strategy.start,
            cliff: strategy.cliff,
            duration: strategy.duration,
            initial_unlock_bps: strategy.initial_unlock_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_whitelisted(env: &Env, strategy_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WL_SET"), user.clone()),
        WhitelistedEvent {
            strategy_id,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claiming_toggled(env: &Env, strategy_id: u32, user: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("WL_CLAIM"), user.clone()),
        ClaimingToggledEvent {
            strategy_id,
            user,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(
    env: &Env,
    strategy_id: u32,
    user: Address,
    caller: Address,
    amount: i128,
    total_released: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), user.clone()),
        ClaimedEvent {
            strategy_id,
            user,
            caller,
            amount,
            total_released,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_revoked(env: &Env, strategy_id: u32, user: Address, vested: i128, unvested: i128) {
    env.events().publish(
        (symbol_short!("REVOKED"), user.clone()),
        RevokedEvent {
            strategy_id,
            user,
            vested,
            unvested,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_max_transfer_set(env: &Env, amount: i128, active: bool) {
    env.events().publish(
        (symbol_short!("MAX_XFER"),),
        MaxTransferSetEvent {
            amount,
            active,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_set(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("TOKEN_SET"),),
        TokenSetEvent {
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_rescued(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RESCUED"), to.clone()),
        TokenRescuedEvent {
            token,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
