#![no_std]

pub mod events;
pub mod schedule;
pub mod whitelist;

use common::admin_tiers::{self, AdminTier};
use common::{math, storage};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, String, Symbol, Vec,
};

pub use schedule::{VestingPhase, VestingStrategy};
pub use whitelist::WhitelistEntry;

// ── Storage key constants ────────────────────────────────────────────────────

const TOKEN: Symbol = symbol_short!("TOKEN");
const MAX_TRANSFER: Symbol = symbol_short!("MAX_XFER");

// ── Contract errors ──────────────────────────────────────────────────────────

/// Lifecycle, auth and validation codes sit below 100, numbered the same in
/// every contract of the workspace; contract-specific codes start at 100.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidInput = 30,
    ArithmeticOverflow = 31,
    StrategyNotFound = 100,
    StrategyNotRevocable = 101,
    AlreadyRevoked = 102,
    AlreadyWhitelisted = 103,
    NotWhitelisted = 104,
    ClaimingDisabled = 105,
    ZeroClaimable = 106,
    ArraySizeMismatch = 107,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Per-call ceiling on distribution transfers.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaxTransfer {
    pub amount: i128,
    pub active: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct VestingContract;

#[contractimpl]
impl VestingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract with the token it distributes. `admin` becomes
    /// the `SuperAdmin`.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&TOKEN) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&TOKEN, &token);
        admin_tiers::set_super_admin(&env, &admin);
        storage::bump_instance(&env);

        events::publish_initialized(&env, admin, token);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&TOKEN)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Strategies ──────────────────────────────────────────────────────────

    /// Register a strategy and return its id. Requires `ContractAdmin`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_vesting_strategy(
        env: Env,
        caller: Address,
        name: String,
        cliff: u64,
        start: u64,
        duration: u64,
        initial_unlock_bps: u32,
        revocable: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut strategy = VestingStrategy {
            id: 0,
            name,
            cliff,
            start,
            duration,
            initial_unlock_bps,
            revocable,
        };
        strategy.validate()?;
        strategy.id = schedule::push(&env, strategy.clone());

        events::publish_strategy_added(&env, &strategy);
        Ok(strategy.id)
    }

    /// Replace an existing strategy. Entries already revoked keep their
    /// frozen amount.
    #[allow(clippy::too_many_arguments)]
    pub fn set_vesting_strategy(
        env: Env,
        caller: Address,
        strategy_id: u32,
        name: String,
        cliff: u64,
        start: u64,
        duration: u64,
        initial_unlock_bps: u32,
        revocable: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        schedule::load(&env, strategy_id)?;

        let strategy = VestingStrategy {
            id: strategy_id,
            name,
            cliff,
            start,
            duration,
            initial_unlock_bps,
            revocable,
        };
        strategy.validate()?;
        schedule::save(&env, &strategy);

        events::publish_strategy_updated(&env, &strategy);
        Ok(())
    }

    pub fn get_vesting_info(env: Env, strategy_id: u32) -> Result<VestingStrategy, ContractError> {
        schedule::load(&env, strategy_id)
    }

    pub fn get_all_vesting_pools(env: Env) -> Vec<VestingStrategy> {
        schedule::load_all(&env)
    }

    pub fn get_vesting_phase(env: Env, strategy_id: u32) -> Result<VestingPhase, ContractError> {
        let strategy = schedule::load(&env, strategy_id)?;
        Ok(VestingPhase::at(env.ledger().timestamp(), &strategy))
    }

    // ── Whitelist ───────────────────────────────────────────────────────────

    pub fn add_whitelist(
        env: Env,
        caller: Address,
        strategy_id: u32,
        user: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        schedule::load(&env, strategy_id)?;

        whitelist::insert(&env, strategy_id, &user, amount)?;
        events::publish_whitelisted(&env, strategy_id, user, amount);
        Ok(())
    }

    /// Whitelist `users[i]` for `amounts[i]`. All or nothing.
    pub fn batch_add_whitelist(
        env: Env,
        caller: Address,
        strategy_id: u32,
        users: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        if users.len() != amounts.len() {
            return Err(ContractError::ArraySizeMismatch);
        }
        schedule::load(&env, strategy_id)?;

        for (user, amount) in users.iter().zip(amounts.iter()) {
            whitelist::insert(&env, strategy_id, &user, amount)?;
            events::publish_whitelisted(&env, strategy_id, user, amount);
        }
        Ok(())
    }

    /// Change an allocation. It may not drop below what was already released.
    pub fn set_whitelist(
        env: Env,
        caller: Address,
        strategy_id: u32,
        user: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        schedule::load(&env, strategy_id)?;

        let mut entry = whitelist::load(&env, strategy_id, &user)?;
        if amount < 0 || amount < entry.released {
            return Err(ContractError::InvalidInput);
        }
        entry.amount = amount;
        if entry.revoked {
            entry.revoked_vested = entry.revoked_vested.min(amount);
        }
        whitelist::save(&env, strategy_id, &user, &entry);

        events::publish_whitelisted(&env, strategy_id, user, amount);
        Ok(())
    }

    pub fn set_claiming_enabled(
        env: Env,
        caller: Address,
        strategy_id: u32,
        user: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut entry = whitelist::load(&env, strategy_id, &user)?;
        entry.claiming_enabled = enabled;
        whitelist::save(&env, strategy_id, &user, &entry);

        events::publish_claiming_toggled(&env, strategy_id, user, enabled);
        Ok(())
    }

    pub fn get_whitelist(
        env: Env,
        strategy_id: u32,
        user: Address,
    ) -> Result<WhitelistEntry, ContractError> {
        schedule::load(&env, strategy_id)?;
        whitelist::load(&env, strategy_id, &user)
    }

    pub fn has_whitelist(env: Env, strategy_id: u32, user: Address) -> bool {
        whitelist::has(&env, strategy_id, &user)
    }

    /// Every account whitelisted under a strategy, in insertion order.
    pub fn get_whitelist_pool(env: Env, strategy_id: u32) -> Result<Vec<Address>, ContractError> {
        schedule::load(&env, strategy_id)?;
        Ok(whitelist::members(&env, strategy_id))
    }

    // ── Release ─────────────────────────────────────────────────────────────

    pub fn get_vest_amount(env: Env, strategy_id: u32, user: Address) -> Result<i128, ContractError> {
        let strategy = schedule::load(&env, strategy_id)?;
        let entry = whitelist::load(&env, strategy_id, &user)?;
        entry.vested(&strategy, env.ledger().timestamp())
    }

    pub fn get_releasable_amount(
        env: Env,
        strategy_id: u32,
        user: Address,
    ) -> Result<i128, ContractError> {
        let strategy = schedule::load(&env, strategy_id)?;
        let entry = whitelist::load(&env, strategy_id, &user)?;
        entry.releasable(&strategy, env.ledger().timestamp())
    }

    /// Transfer `user`'s releasable tokens to them. `caller` is either the
    /// user or a `ContractAdmin` acting on their behalf.
    ///
    /// With the per-call cap active only up to the cap moves, and `released`
    /// grows by exactly what was transferred.
    pub fn claim_distribution(
        env: Env,
        caller: Address,
        strategy_id: u32,
        user: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if caller != user {
            Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        }

        let strategy = schedule::load(&env, strategy_id)?;
        let mut entry = whitelist::load(&env, strategy_id, &user)?;
        let releasable = entry.releasable(&strategy, env.ledger().timestamp())?;
        if releasable == 0 {
            return Err(ContractError::ZeroClaimable);
        }
        if !entry.claiming_enabled {
            return Err(ContractError::ClaimingDisabled);
        }

        let cap = Self::get_max_token_transfer(env.clone());
        let amount = if cap.active {
            releasable.min(cap.amount)
        } else {
            releasable
        };
        if amount <= 0 {
            return Err(ContractError::ZeroClaimable);
        }

        entry.released =
            math::checked_add(entry.released, amount).ok_or(ContractError::ArithmeticOverflow)?;
        whitelist::save(&env, strategy_id, &user, &entry);
        storage::bump_instance(&env);

        let token = Self::get_token(env.clone())?;
        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &user, &amount);

        events::publish_claimed(&env, strategy_id, user, caller, amount, entry.released);
        Ok(amount)
    }

    /// Freeze `user`'s vesting at what has vested so far. Requires
    /// `ContractAdmin` and a revocable strategy.
    pub fn revoke(
        env: Env,
        caller: Address,
        strategy_id: u32,
        user: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let strategy = schedule::load(&env, strategy_id)?;
        if !strategy.revocable {
            return Err(ContractError::StrategyNotRevocable);
        }
        let mut entry = whitelist::load(&env, strategy_id, &user)?;
        if entry.revoked {
            return Err(ContractError::AlreadyRevoked);
        }

        let vested = entry.vested(&strategy, env.ledger().timestamp())?;
        entry.revoked = true;
        entry.revoked_vested = vested;
        whitelist::save(&env, strategy_id, &user, &entry);

        let unvested = math::saturating_sub_floor_zero(entry.amount, vested);
        events::publish_revoked(&env, strategy_id, user, vested, unvested);
        Ok(())
    }

    // ── Token configuration ─────────────────────────────────────────────────

    pub fn set_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        env.storage().instance().set(&TOKEN, &token);
        events::publish_token_set(&env, token);
        Ok(())
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    /// This contract's balance of `token`.
    pub fn get_total_token(env: Env, token: Address) -> i128 {
        token::Client::new(&env, &token).balance(&env.current_contract_address())
    }

    /// Cap every distribution transfer at `amount` while `active`.
    pub fn set_max_token_transfer(
        env: Env,
        caller: Address,
        amount: i128,
        active: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage()
            .instance()
            .set(&MAX_TRANSFER, &MaxTransfer { amount, active });
        events::publish_max_transfer_set(&env, amount, active);
        Ok(())
    }

    pub fn get_max_token_transfer(env: Env) -> MaxTransfer {
        env.storage()
            .instance()
            .get(&MAX_TRANSFER)
            .unwrap_or_default()
    }

    /// Move `amount` of any token held by the contract to `caller`.
    pub fn transfer_token(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &caller, &amount);
        events::publish_token_rescued(&env, token, caller, amount);
        Ok(())
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    pub fn get_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&TOKEN) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::require_tier(env, caller, min_tier) {
            return Ok(());
        }
        Err(ContractError::Unauthorized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
