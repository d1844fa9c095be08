//! Ledger-level properties driven through the contract client.
//!
//! Invariants tested:
//! - Pool `total_staked` equals the sum of every position, vault included
//! - `unstake` pays exactly principal plus the reward pending at that moment
//! - Vault price per share never falls across harvests

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::{PoolConfig, StakingContract, StakingContractClient};

const DAY: u64 = 86_400;
const START: u64 = 1_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address, u32) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &Address::generate(&env), &None, &None);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    StellarAssetClient::new(&env, &token).mint(&contract_id, &1_000_000_000_000);

    let pool_id = client.add_pool(
        &admin,
        &PoolConfig {
            deposit_token: token.clone(),
            reward_token: token.clone(),
            router: None,
            apy_bps: 2_400,
            lock_duration: 0,
            start_time: START,
            end_time: START + 365 * DAY,
            min_deposit: 1,
            max_deposit: 1_000_000_000,
            hard_cap: 1_000_000_000_000,
            nft_multiplier: 100,
            nft_multiplier_active: false,
        },
    );

    (env, client, token, pool_id)
}

fn funded_user(env: &Env, token: &Address) -> Address {
    let user = Address::generate(env);
    StellarAssetClient::new(env, token).mint(&user, &10_000_000_000);
    user
}

fn advance(env: &Env, seconds: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + seconds);
}

/// One step of a random workload: (actor, action, amount, days to wait).
fn op_strategy() -> impl Strategy<Value = (usize, u8, i128, u64)> {
    (0usize..3, 0u8..4, 1i128..=1_000_000i128, 0u64..=20)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_total_staked_is_sum_of_positions(ops in prop::collection::vec(op_strategy(), 1..16)) {
        let (env, client, token, pool_id) = setup();
        let users = [
            funded_user(&env, &token),
            funded_user(&env, &token),
            funded_user(&env, &token),
        ];

        for (actor, action, amount, days) in ops {
            let user = &users[actor];
            match action {
                0 => { let _ = client.try_stake(user, &pool_id, &amount); }
                1 => {
                    let held = client.get_stake(&pool_id, user).principal;
                    if held > 0 {
                        let _ = client.try_unstake(user, &pool_id, &(amount % held + 1));
                    }
                }
                2 => { let _ = client.try_vault_deposit(user, &pool_id, &amount); }
                _ => {
                    let shares = client.get_vault_user(&pool_id, user).shares;
                    if shares > 0 {
                        let _ = client.try_vault_withdraw(user, &pool_id, &(amount % shares + 1));
                    }
                }
            }
            advance(&env, days * DAY);

            let mut sum: i128 = users
                .iter()
                .map(|u| client.get_stake(&pool_id, u).principal)
                .sum();
            sum += client.get_vault(&pool_id).staked;
            prop_assert_eq!(client.get_pool(&pool_id).total_staked, sum);
        }
    }

    #[test]
    fn prop_unstake_pays_principal_plus_pending(
        amount in 1i128..=1_000_000_000i128,
        days in 0u64..=400,
        fraction in 1i128..=100i128,
    ) {
        let (env, client, token, pool_id) = setup();
        let user = funded_user(&env, &token);
        let tokens = TokenClient::new(&env, &token);

        client.stake(&user, &pool_id, &amount);
        advance(&env, days * DAY);

        let pending = client.get_pending_reward(&pool_id, &user);
        let withdraw = (amount * fraction / 100).max(1);
        let before = tokens.balance(&user);
        let reward = client.unstake(&user, &pool_id, &withdraw);

        prop_assert_eq!(reward, pending);
        prop_assert_eq!(tokens.balance(&user) - before, withdraw + pending);
    }

    #[test]
    fn prop_vault_share_price_never_falls(
        deposit in 1_000i128..=1_000_000_000i128,
        waits in prop::collection::vec(1u64..=60, 1..6),
    ) {
        let (env, client, token, pool_id) = setup();
        let user = funded_user(&env, &token);
        let keeper = Address::generate(&env);

        client.vault_deposit(&user, &pool_id, &deposit);
        let mut last = client.get_price_per_full_share(&pool_id);
        for days in waits {
            advance(&env, days * DAY);
            let _ = client.try_vault_harvest(&keeper, &pool_id);
            let price = client.get_price_per_full_share(&pool_id);
            prop_assert!(price >= last);
            last = price;
        }
    }
}
