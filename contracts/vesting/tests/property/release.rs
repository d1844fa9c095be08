//! Claim and revocation properties driven through the contract client.
//!
//! Invariants tested:
//! - `released` never exceeds the allocation, whatever the claim timing
//! - After revocation the vested amount stays constant

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, String};
use vesting::{VestingContract, VestingContractClient};

const START: u64 = 1_000;

fn setup(revocable: bool) -> (Env, VestingContractClient<'static>, Address, u32) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VestingContract, ());
    let client = VestingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &token);
    StellarAssetClient::new(&env, &token).mint(&contract_id, &1_000_000_000_000);

    let id = client.add_vesting_strategy(
        &admin,
        &String::from_str(&env, "prop"),
        &500,
        &START,
        &50_000,
        &1_500,
        &revocable,
    );
    (env, client, admin, id)
}

fn advance(env: &Env, seconds: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + seconds);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_released_never_exceeds_allocation(
        amount in 1i128..=1_000_000_000i128,
        waits in prop::collection::vec(0u64..=20_000, 1..8),
    ) {
        let (env, client, admin, id) = setup(false);
        let user = Address::generate(&env);
        client.add_whitelist(&admin, &id, &user, &amount);

        for wait in waits {
            advance(&env, wait);
            let _ = client.try_claim_distribution(&user, &id, &user);
            let entry = client.get_whitelist(&id, &user);
            prop_assert!(entry.released <= entry.amount);
            prop_assert!(entry.released <= client.get_vest_amount(&id, &user));
        }
    }

    #[test]
    fn prop_revoked_vested_is_constant(
        amount in 1i128..=1_000_000_000i128,
        revoke_at in 0u64..=60_000,
        later in 1u64..=1_000_000,
    ) {
        let (env, client, admin, id) = setup(true);
        let user = Address::generate(&env);
        client.add_whitelist(&admin, &id, &user, &amount);

        advance(&env, revoke_at);
        client.revoke(&admin, &id, &user);
        let frozen = client.get_vest_amount(&id, &user);

        advance(&env, later);
        prop_assert_eq!(client.get_vest_amount(&id, &user), frozen);
    }
}
