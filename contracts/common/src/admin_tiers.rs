use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::storage;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy shared by the staking and vesting contracts.
///
/// - `SuperAdmin`    – everything below, plus promoting and demoting admins.
/// - `ContractAdmin` – pool / strategy configuration, fees, collaborators,
///                     whitelist management and revocation.
/// - `OperatorAdmin` – pause and unpause only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// True if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Assign `tier` to `admin`. Callers verify authorization beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    storage::bump(env, &key);
    track_admin(env, admin);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage().persistent().get(&tier_key(admin))
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&tier_key(admin));
    untrack_admin(env, admin);
}

/// Returns `false` if `caller` has no tier or one below `min_tier`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    match get_admin_tier(env, caller) {
        Some(tier) => tier.has_at_least(min_tier),
        None => false,
    }
}

// ── SuperAdmin Registry ──────────────────────────────────────────────────────

/// Records the bootstrap super admin during `initialize`.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&SUPER_ADMIN, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Assign `tier` to `target` on behalf of `caller`.
///
/// Returns `false` (and changes nothing) unless `caller` is a `SuperAdmin`.
/// `caller` must already have been authenticated via `require_auth()`.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    true
}

/// Strip every tier from `target`. SuperAdmin only; the bootstrap super
/// admin cannot be demoted.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    if get_super_admin(env).as_ref() == Some(target) {
        return false;
    }
    remove_admin_tier(env, target);
    true
}

// ── Admin list ───────────────────────────────────────────────────────────────

pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if admins.contains(admin) {
        return;
    }
    admins.push_back(admin.clone());
    env.storage().persistent().set(&ADMIN_LIST, &admins);
    storage::bump(env, &ADMIN_LIST);
}

fn untrack_admin(env: &Env, admin: &Address) {
    let admins = list_admins(env);
    let mut kept = Vec::new(env);
    for a in admins.iter() {
        if a != *admin {
            kept.push_back(a);
        }
    }
    env.storage().persistent().set(&ADMIN_LIST, &kept);
}
