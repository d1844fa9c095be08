#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking::{PoolConfig, StakingContract, StakingContractClient};

const DAY: u64 = 86_400;
const START: u64 = 1_000;
const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { pool: u8, amount: u32 },
    Unstake { pool: u8, amount: u32 },
    Harvest { pool: u8 },
    ClaimAll,
    VaultDeposit { pool: u8, amount: u32 },
    VaultWithdraw { pool: u8, shares: u32 },
    VaultHarvest { pool: u8 },
    Wait { hours: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
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
    let sac = StellarAssetClient::new(&env, &token);
    sac.mint(&contract_id, &i128::from(u64::MAX));

    // One unlocked pool and one locked pool with a tight cap.
    let mut pools = [0u32; 2];
    for (slot, (lock, cap)) in [(0u64, i128::MAX / 4), (3 * DAY, 50_000_000_000i128)]
        .into_iter()
        .enumerate()
    {
        pools[slot] = client.add_pool(
            &admin,
            &PoolConfig {
                deposit_token: token.clone(),
                reward_token: token.clone(),
                router: None,
                apy_bps: 2_400,
                lock_duration: lock,
                start_time: START,
                end_time: START + 365 * DAY,
                min_deposit: 1,
                max_deposit: i128::from(u32::MAX),
                hard_cap: cap,
                nft_multiplier: 100,
                nft_multiplier_active: false,
            },
        );
    }

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in &users {
        sac.mint(user, &i128::from(u64::MAX));
    }

    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % USERS];
        let pick = |p: u8| pools[usize::from(p) % pools.len()];
        match action {
            FuzzAction::Stake { pool, amount } => {
                let _ = client.try_stake(user, &pick(pool), &i128::from(amount));
            }
            FuzzAction::Unstake { pool, amount } => {
                let _ = client.try_unstake(user, &pick(pool), &i128::from(amount));
            }
            FuzzAction::Harvest { pool } => {
                let _ = client.try_harvest(&admin, &pick(pool), user);
            }
            FuzzAction::ClaimAll => {
                let _ = client.try_claim_all(user);
            }
            FuzzAction::VaultDeposit { pool, amount } => {
                let _ = client.try_vault_deposit(user, &pick(pool), &i128::from(amount));
            }
            FuzzAction::VaultWithdraw { pool, shares } => {
                let _ = client.try_vault_withdraw(user, &pick(pool), &i128::from(shares));
            }
            FuzzAction::VaultHarvest { pool } => {
                let _ = client.try_vault_harvest(user, &pick(pool));
            }
            FuzzAction::Wait { hours } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(hours) * 3_600);
            }
        }

        // Ledger invariant: every pool's total equals the sum of its positions.
        for id in pools {
            let pool = client.get_pool(&id);
            let mut sum = client.get_stake(&id, &contract_id).principal;
            for u in &users {
                sum += client.get_stake(&id, u).principal;
            }
            assert_eq!(pool.total_staked, sum);
            assert!(pool.total_staked <= pool.config.hard_cap);
            assert!(client.get_price_per_full_share(&id) > 0);
        }
    }
});
