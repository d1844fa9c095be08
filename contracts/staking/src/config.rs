use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");
const PAUSED: Symbol = symbol_short!("PAUSED");

/// Default share of every harvest paid to whoever triggered it (0.25 %).
pub const DEFAULT_CALLER_FEE_BPS: u32 = 25;
/// Default share of every harvest sent to the treasury (0.5 %).
pub const DEFAULT_CLAIM_FEE_BPS: u32 = 50;
/// Upper bound on `caller_fee_bps + claim_fee_bps` (10 %).
pub const MAX_TOTAL_FEE_BPS: u32 = 1_000;

/// Contract-wide settings written by `initialize` and the admin setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Receives the claim fee of every harvest.
    pub treasury: Address,
    pub caller_fee_bps: u32,
    pub claim_fee_bps: u32,
    /// Collection whose holders get a pool's NFT multiplier.
    pub nft_collection: Option<Address>,
    /// Service answering `multiplier_of(account)` for tier bonuses.
    pub tier_source: Option<Address>,
}

impl StakingConfig {
    pub fn new(
        treasury: Address,
        nft_collection: Option<Address>,
        tier_source: Option<Address>,
    ) -> Self {
        Self {
            treasury,
            caller_fee_bps: DEFAULT_CALLER_FEE_BPS,
            claim_fee_bps: DEFAULT_CLAIM_FEE_BPS,
            nft_collection,
            tier_source,
        }
    }
}

pub fn validate_fees(caller_fee_bps: u32, claim_fee_bps: u32) -> Result<(), ContractError> {
    let total = caller_fee_bps
        .checked_add(claim_fee_bps)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if total > MAX_TOTAL_FEE_BPS {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn has(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}
