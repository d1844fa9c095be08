//! Collaborator contracts the staking contract reads from.
//!
//! Each is a narrow client trait; any contract exposing the same function
//! signature can be plugged in through the admin setters or pool config.

use soroban_sdk::{contractclient, Address, Env};

/// NFT collection used for the holder bonus. Read-only.
#[contractclient(name = "NftCollectionClient")]
pub trait NftCollection {
    fn balance(env: Env, owner: Address) -> i128;
}

/// Tier service mapping an account's aggregate deposits to a bonus.
///
/// Returns hundredths (150 = 1.5×); 0 means the account has no tier.
#[contractclient(name = "TierSourceClient")]
pub trait TierSource {
    fn multiplier_of(env: Env, account: Address) -> u32;
}

/// Values `amount_in` of `token_in` in units of `token_out`.
#[contractclient(name = "ValueRouterClient")]
pub trait ValueRouter {
    fn get_amount_out(env: Env, amount_in: i128, token_in: Address, token_out: Address) -> i128;
}
