#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::rewards::FeeBreakdown;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub treasury: Address,
    pub timestamp: u64,
}

/// Fired when a pool is added or its configuration replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfiguredEvent {
    pub pool_id: u32,
    pub apy_bps: u32,
    pub end_time: u64,
    pub hard_cap: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    /// Pending reward folded into principal by this stake.
    pub reinvested: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub reward: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub caller: Address,
    pub gross: i128,
    pub caller_fee: i128,
    pub treasury_fee: i128,
    pub net: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultDepositEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub shares: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultWithdrawEvent {
    pub pool_id: u32,
    pub user: Address,
    pub shares: i128,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the vault compounds a pool's reward back into its position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultHarvestEvent {
    pub pool_id: u32,
    pub caller: Address,
    pub gross: i128,
    pub caller_fee: i128,
    pub treasury_fee: i128,
    pub net: i128,
    /// Reward still held outside the position for lack of cap room.
    pub unstaked_reward: i128,
    pub price_per_share: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesSetEvent {
    pub caller_fee_bps: u32,
    pub claim_fee_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasurySetEvent {
    pub treasury: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollaboratorsSetEvent {
    pub nft_collection: Option<Address>,
    pub tier_source: Option<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub operator: Address,
    pub paused: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, treasury: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(env: &Env, pool_id: u32, apy_bps: u32, end_time: u64, hard_cap: i128) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolConfiguredEvent {
            pool_id,
            apy_bps,
            end_time,
            hard_cap,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pool_id: u32, apy_bps: u32, end_time: u64, hard_cap: i128) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolConfiguredEvent {
            pool_id,
            apy_bps,
            end_time,
            hard_cap,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    reinvested: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            pool_id,
            staker,
            amount,
            reinvested,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            pool_id,
            staker,
            amount,
            reward,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvested(
    env: &Env,
    pool_id: u32,
    user: Address,
    caller: Address,
    split: &FeeBreakdown,
) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone()),
        HarvestedEvent {
            pool_id,
            user,
            caller,
            gross: split.gross,
            caller_fee: split.caller_fee,
            treasury_fee: split.treasury_fee,
            net: split.net,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vault_deposit(env: &Env, pool_id: u32, user: Address, amount: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("V_DEPOSIT"), user.clone()),
        VaultDepositEvent {
            pool_id,
            user,
            amount,
            shares,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vault_withdraw(env: &Env, pool_id: u32, user: Address, shares: i128, amount: i128) {
    env.events().publish(
        (symbol_short!("V_WITHDR"), user.clone()),
        VaultWithdrawEvent {
            pool_id,
            user,
            shares,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vault_harvest(
    env: &Env,
    pool_id: u32,
    caller: Address,
    split: &FeeBreakdown,
    unstaked_reward: i128,
    price_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("V_HARVEST"), pool_id),
        VaultHarvestEvent {
            pool_id,
            caller,
            gross: split.gross,
            caller_fee: split.caller_fee,
            treasury_fee: split.treasury_fee,
            net: split.net,
            unstaked_reward,
            price_per_share,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fees_set(env: &Env, caller_fee_bps: u32, claim_fee_bps: u32) {
    env.events().publish(
        (symbol_short!("FEES_SET"),),
        FeesSetEvent {
            caller_fee_bps,
            claim_fee_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_set(env: &Env, treasury: Address) {
    env.events().publish(
        (symbol_short!("TRSY_SET"),),
        TreasurySetEvent {
            treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_collaborators_set(
    env: &Env,
    nft_collection: Option<Address>,
    tier_source: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("COLLAB"),),
        CollaboratorsSetEvent {
            nft_collection,
            tier_source,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, operator: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSED"), operator.clone()),
        PauseChangedEvent {
            operator,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}
