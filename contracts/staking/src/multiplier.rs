use common::math::{self, MULTIPLIER_PRECISION};
use soroban_sdk::{Address, Env};

use crate::config::StakingConfig;
use crate::interfaces::{NftCollectionClient, TierSourceClient};
use crate::pool::PoolConfig;
use crate::ContractError;

/// 1×, in hundredths.
pub const BASE_MULTIPLIER: u32 = 100;

/// Multiplies the optional NFT and tier bonuses onto the 1× base.
pub fn compose_multiplier(nft_bonus: Option<u32>, tier_bonus: Option<u32>) -> Option<u32> {
    let mut multiplier = i128::from(BASE_MULTIPLIER);
    for bonus in [nft_bonus, tier_bonus].into_iter().flatten() {
        multiplier = math::mul_div_floor(multiplier, i128::from(bonus), MULTIPLIER_PRECISION)?;
    }
    u32::try_from(multiplier).ok()
}

/// Effective multiplier for `user` in a pool, read from the configured
/// collaborators. Has no side effects.
pub fn resolve_multiplier(
    env: &Env,
    config: &StakingConfig,
    pool: &PoolConfig,
    user: &Address,
) -> Result<u32, ContractError> {
    let nft_bonus = match (&config.nft_collection, pool.nft_multiplier_active) {
        (Some(collection), true) => {
            if NftCollectionClient::new(env, collection).balance(user) >= 1 {
                Some(pool.nft_multiplier)
            } else {
                None
            }
        }
        _ => None,
    };

    let tier_bonus = match &config.tier_source {
        Some(source) => match TierSourceClient::new(env, source).multiplier_of(user) {
            0 => None,
            bonus => Some(bonus),
        },
        None => None,
    };

    compose_multiplier(nft_bonus, tier_bonus).ok_or(ContractError::ArithmeticOverflow)
}
