extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{testutils::Address as _, Address};

use crate::test_support::Fixture;
use crate::ContractError;

#[test]
fn test_initializer_is_super_admin() {
    let f = Fixture::new();

    assert_eq!(f.client.get_admin_tier(&f.admin), Some(AdminTier::SuperAdmin));
    assert_eq!(f.client.get_admins().len(), 1);
}

#[test]
fn test_contract_admin_can_configure_pools() {
    let f = Fixture::new();
    let manager = Address::generate(&f.env);
    f.client
        .promote_admin(&f.admin, &manager, &AdminTier::ContractAdmin);

    let id = f.client.add_pool(&manager, &f.pool_config(2_400));
    f.client.set_pool(&manager, &id, &f.pool_config(1_200));
    f.client.set_fees(&manager, &10, &20);

    assert_eq!(f.client.get_pool(&id).config.apy_bps, 1_200);
    assert_eq!(f.client.get_admins().len(), 2);
}

#[test]
fn test_operator_can_pause_but_not_configure() {
    let f = Fixture::new();
    let operator = Address::generate(&f.env);
    f.client
        .promote_admin(&f.admin, &operator, &AdminTier::OperatorAdmin);

    f.client.pause(&operator);
    assert!(f.client.is_paused());
    f.client.unpause(&operator);
    assert!(!f.client.is_paused());

    match f.client.try_add_pool(&operator, &f.pool_config(2_400)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let treasury = Address::generate(&f.env);
    match f.client.try_set_treasury(&operator, &treasury) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_only_super_admin_promotes() {
    let f = Fixture::new();
    let manager = Address::generate(&f.env);
    let target = Address::generate(&f.env);
    f.client
        .promote_admin(&f.admin, &manager, &AdminTier::ContractAdmin);

    let result = f
        .client
        .try_promote_admin(&manager, &target, &AdminTier::OperatorAdmin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(f.client.get_admin_tier(&target), None);
}

#[test]
fn test_demote_revokes_access() {
    let f = Fixture::new();
    let manager = Address::generate(&f.env);
    f.client
        .promote_admin(&f.admin, &manager, &AdminTier::ContractAdmin);
    f.client.demote_admin(&f.admin, &manager);

    assert_eq!(f.client.get_admin_tier(&manager), None);
    assert_eq!(f.client.get_admins().len(), 1);
    match f.client.try_add_pool(&manager, &f.pool_config(2_400)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_bootstrap_admin_cannot_be_demoted() {
    let f = Fixture::new();
    let second = Address::generate(&f.env);
    f.client
        .promote_admin(&f.admin, &second, &AdminTier::SuperAdmin);

    match f.client.try_demote_admin(&second, &f.admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(f.client.get_admin_tier(&f.admin), Some(AdminTier::SuperAdmin));
}
