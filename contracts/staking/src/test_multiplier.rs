extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test_support::{Fixture, DAY};

/// 50 000 at 12 % for 30 days accrues 493 base reward.
const PRINCIPAL: i128 = 50_000;

fn nft_pool(f: &Fixture, active: bool) -> u32 {
    let mut cfg = f.pool_config(1_200);
    cfg.nft_multiplier = 200;
    cfg.nft_multiplier_active = active;
    f.add_pool(&cfg)
}

#[test]
fn test_no_collaborators_means_base_multiplier() {
    let f = Fixture::new();
    let id = nft_pool(&f, true);
    let user = Address::generate(&f.env);

    assert_eq!(f.client.get_multiplier(&id, &user), 100);
}

#[test]
fn test_nft_holder_earns_double_and_claims_it() {
    let f = Fixture::new();
    let nft = f.register_nft();
    f.client
        .set_collaborators(&f.admin, &Some(nft.address.clone()), &None);
    let id = nft_pool(&f, true);
    let user = f.user_with(&f.token, PRINCIPAL);
    nft.set_balance(&user, &1);

    f.client.stake(&user, &id, &PRINCIPAL);
    f.advance(30 * DAY);

    assert_eq!(f.client.get_multiplier(&id, &user), 200);
    assert_eq!(f.client.get_pending_reward(&id, &user), 986);

    // 986 gross: 2 caller fee (to the user), 4 treasury, 980 net.
    assert_eq!(f.client.claim_all(&user), 980);
    assert_eq!(f.balance(&f.token, &user), 982);
    assert_eq!(f.balance(&f.token, &f.treasury), 4);
}

#[test]
fn test_nft_and_tier_bonuses_compose() {
    let f = Fixture::new();
    let nft = f.register_nft();
    let tier = f.register_tier();
    f.client.set_collaborators(
        &f.admin,
        &Some(nft.address.clone()),
        &Some(tier.address.clone()),
    );
    let id = nft_pool(&f, true);
    let user = f.user_with(&f.token, PRINCIPAL);
    nft.set_balance(&user, &3);
    tier.set_multiplier(&user, &150);

    f.client.stake(&user, &id, &PRINCIPAL);
    f.advance(30 * DAY);

    assert_eq!(f.client.get_multiplier(&id, &user), 300);
    assert_eq!(f.client.get_pending_reward(&id, &user), 1_479);
}

#[test]
fn test_inactive_pool_flag_ignores_nft() {
    let f = Fixture::new();
    let nft = f.register_nft();
    f.client
        .set_collaborators(&f.admin, &Some(nft.address.clone()), &None);
    let id = nft_pool(&f, false);
    let user = Address::generate(&f.env);
    nft.set_balance(&user, &1);

    assert_eq!(f.client.get_multiplier(&id, &user), 100);
}

#[test]
fn test_non_holder_and_untiered_account_get_base() {
    let f = Fixture::new();
    let nft = f.register_nft();
    let tier = f.register_tier();
    f.client.set_collaborators(
        &f.admin,
        &Some(nft.address.clone()),
        &Some(tier.address.clone()),
    );
    let id = nft_pool(&f, true);
    let user = Address::generate(&f.env);

    assert_eq!(f.client.get_multiplier(&id, &user), 100);

    tier.set_multiplier(&user, &125);
    assert_eq!(f.client.get_multiplier(&id, &user), 125);
}

#[test]
fn test_clearing_collaborators_drops_bonus() {
    let f = Fixture::new();
    let nft = f.register_nft();
    f.client
        .set_collaborators(&f.admin, &Some(nft.address.clone()), &None);
    let id = nft_pool(&f, true);
    let user = Address::generate(&f.env);
    nft.set_balance(&user, &1);
    assert_eq!(f.client.get_multiplier(&id, &user), 200);

    f.client.set_collaborators(&f.admin, &None, &None);
    assert_eq!(f.client.get_config().nft_collection, None);
    assert_eq!(f.client.get_multiplier(&id, &user), 100);
}
