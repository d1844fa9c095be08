#![no_std]

pub mod config;
pub mod events;
pub mod interfaces;
pub mod ledger;
pub mod multiplier;
pub mod pool;
pub mod rewards;
pub mod settlement;
pub mod vault;

use common::admin_tiers::{self, AdminTier};
use common::{math, storage};
use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub use config::StakingConfig;
pub use ledger::UserStake;
pub use pool::{Pool, PoolConfig, PoolPhase};
pub use rewards::FeeBreakdown;
pub use vault::{VaultInfo, VaultState, VaultUser};

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
    Paused = 40,
    InvalidPoolId = 100,
    AmountZero = 101,
    AmountExceedsBounds = 102,
    AmountExceedsBalance = 103,
    HardcapReached = 104,
    StakingDisabled = 105,
    LockedPeriodActive = 106,
    ZeroClaimable = 107,
    NothingToWithdraw = 108,
    WithdrawExceedsBalance = 109,
    AssetMismatch = 110,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`          – becomes the `SuperAdmin`.
    /// * `treasury`       – receives the claim fee of every harvest.
    /// * `nft_collection` – optional collection for the per-pool holder bonus.
    /// * `tier_source`    – optional service answering `multiplier_of`.
    pub fn initialize(
        env: Env,
        admin: Address,
        treasury: Address,
        nft_collection: Option<Address>,
        tier_source: Option<Address>,
    ) -> Result<(), ContractError> {
        if config::has(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        config::save(&env, &StakingConfig::new(treasury.clone(), nft_collection, tier_source));
        admin_tiers::set_super_admin(&env, &admin);
        storage::bump_instance(&env);

        events::publish_initialized(&env, admin, treasury);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::has(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        config::load(&env)
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Append a pool and return its id. Requires `ContractAdmin`.
    pub fn add_pool(env: Env, caller: Address, pool_config: PoolConfig) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        pool_config.validate()?;

        let (apy_bps, end_time, hard_cap) =
            (pool_config.apy_bps, pool_config.end_time, pool_config.hard_cap);
        let id = pool::push(&env, pool_config);

        events::publish_pool_added(&env, id, apy_bps, end_time, hard_cap);
        Ok(id)
    }

    /// Replace an existing pool's configuration, keeping its totals.
    ///
    /// Accrual is always clamped at evaluation time, so moving `end_time`
    /// never rewrites reward that has already accrued.
    pub fn set_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        pool_config: PoolConfig,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut pool = pool::load(&env, pool_id)?;
        pool_config.validate()?;
        if pool_config.hard_cap < pool.total_staked {
            return Err(ContractError::HardcapReached);
        }
        pool.config = pool_config;
        pool::save(&env, &pool);

        events::publish_pool_updated(
            &env,
            pool_id,
            pool.config.apy_bps,
            pool.config.end_time,
            pool.config.hard_cap,
        );
        Ok(())
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn get_pools(env: Env) -> Vec<Pool> {
        pool::load_all(&env)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn get_pool_phase(env: Env, pool_id: u32) -> Result<PoolPhase, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        Ok(PoolPhase::at(env.ledger().timestamp(), &pool.config))
    }

    // ── Contract-wide settings ──────────────────────────────────────────────

    /// Requires `ContractAdmin`. The two fees together may not exceed 10 %.
    pub fn set_fees(
        env: Env,
        caller: Address,
        caller_fee_bps: u32,
        claim_fee_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        config::validate_fees(caller_fee_bps, claim_fee_bps)?;

        let mut cfg = config::load(&env)?;
        cfg.caller_fee_bps = caller_fee_bps;
        cfg.claim_fee_bps = claim_fee_bps;
        config::save(&env, &cfg);

        events::publish_fees_set(&env, caller_fee_bps, claim_fee_bps);
        Ok(())
    }

    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut cfg = config::load(&env)?;
        cfg.treasury = treasury.clone();
        config::save(&env, &cfg);

        events::publish_treasury_set(&env, treasury);
        Ok(())
    }

    /// Point the multiplier resolver at a new NFT collection and tier source.
    /// `None` disables the corresponding bonus.
    pub fn set_collaborators(
        env: Env,
        caller: Address,
        nft_collection: Option<Address>,
        tier_source: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let mut cfg = config::load(&env)?;
        cfg.nft_collection = nft_collection.clone();
        cfg.tier_source = tier_source.clone();
        config::save(&env, &cfg);

        events::publish_collaborators_set(&env, nft_collection, tier_source);
        Ok(())
    }

    /// Halt every user-facing mutation. Requires `OperatorAdmin`.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_pause_state(&env, caller, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_pause_state(&env, caller, false)
    }

    pub fn is_paused(env: Env) -> bool {
        config::is_paused(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` into a pool.
    ///
    /// Reward pending on an existing position is settled first without a
    /// fee: folded into principal when the pool pays in its deposit asset,
    /// paid out in the reward asset otherwise.
    pub fn stake(env: Env, staker: Address, pool_id: u32, amount: i128) -> Result<(), ContractError> {
        let cfg = Self::require_active(&env)?;
        staker.require_auth();
        Self::require_external(&env, &staker)?;

        let mut pool = pool::load(&env, pool_id)?;
        let now = env.ledger().timestamp();
        pool.check_deposit(now, amount)?;

        let mut position = ledger::load(&env, pool_id, &staker);
        let pending = settlement::pending_reward(&env, &cfg, &pool, &position, &staker, now)?;
        settlement::settle(&mut pool, &mut position, pending, now)?;

        let mut reinvested = 0;
        let mut paid_out = 0;
        if pending > 0 {
            if pool.config.is_single_asset() {
                ledger::credit(&mut pool, &mut position, pending, now)?;
                reinvested = pending;
            } else {
                paid_out = pending;
            }
        }
        ledger::credit(&mut pool, &mut position, amount, now)?;

        ledger::save(&env, pool_id, &staker, &position);
        ledger::track_pool(&env, &staker, pool_id);
        pool::save(&env, &pool);

        let contract = env.current_contract_address();
        token::Client::new(&env, &pool.config.deposit_token).transfer(&staker, &contract, &amount);
        if paid_out > 0 {
            token::Client::new(&env, &pool.config.reward_token).transfer(
                &contract,
                &staker,
                &paid_out,
            );
        }

        events::publish_staked(&env, pool_id, staker, amount, reinvested, pool.total_staked);
        Ok(())
    }

    /// Withdraw `amount` of principal together with the pending reward.
    /// Returns the reward paid.
    pub fn unstake(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        staker.require_auth();
        Self::require_external(&env, &staker)?;

        if amount <= 0 {
            return Err(ContractError::AmountZero);
        }
        let mut pool = pool::load(&env, pool_id)?;
        let mut position = ledger::load(&env, pool_id, &staker);
        if amount > position.principal {
            return Err(ContractError::AmountExceedsBalance);
        }
        let now = env.ledger().timestamp();
        if position.is_locked(now, pool.config.lock_duration) {
            return Err(ContractError::LockedPeriodActive);
        }

        let reward = settlement::pending_reward(&env, &cfg, &pool, &position, &staker, now)?;
        settlement::settle(&mut pool, &mut position, reward, now)?;
        ledger::debit(&mut pool, &mut position, amount)?;

        ledger::save(&env, pool_id, &staker, &position);
        pool::save(&env, &pool);

        let contract = env.current_contract_address();
        let deposit = token::Client::new(&env, &pool.config.deposit_token);
        if pool.config.is_single_asset() {
            let payout = math::checked_add(amount, reward).ok_or(ContractError::ArithmeticOverflow)?;
            deposit.transfer(&contract, &staker, &payout);
        } else {
            deposit.transfer(&contract, &staker, &amount);
            if reward > 0 {
                token::Client::new(&env, &pool.config.reward_token).transfer(
                    &contract,
                    &staker,
                    &reward,
                );
            }
        }

        events::publish_unstaked(&env, pool_id, staker, amount, reward, pool.total_staked);
        Ok(reward)
    }

    /// Pay out `user`'s pending reward in a pool. Anyone may trigger it and
    /// collects the caller fee for doing so.
    pub fn harvest(
        env: Env,
        caller: Address,
        pool_id: u32,
        user: Address,
    ) -> Result<FeeBreakdown, ContractError> {
        let cfg = Self::require_active(&env)?;
        caller.require_auth();
        Self::require_external(&env, &user)?;
        Self::harvest_position(&env, &cfg, pool_id, &user, &caller)
    }

    /// Harvest every pool `user` holds a position in, with `user` as caller.
    /// Returns the summed net reward.
    ///
    /// Each pool is harvested on its own: a pool that fails (nothing pending,
    /// a bad router quote, overflow) is skipped and the others still pay.
    /// `harvest_position` only fails before it writes anything, so a skipped
    /// pool is left untouched.
    pub fn claim_all(env: Env, user: Address) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        user.require_auth();
        Self::require_external(&env, &user)?;

        let mut total_net: i128 = 0;
        let mut harvested = false;
        for pool_id in ledger::user_pools(&env, &user).iter() {
            let Ok(split) = Self::harvest_position(&env, &cfg, pool_id, &user, &user) else {
                continue;
            };
            total_net =
                math::checked_add(total_net, split.net).ok_or(ContractError::ArithmeticOverflow)?;
            harvested = true;
        }

        if !harvested {
            return Err(ContractError::ZeroClaimable);
        }
        Ok(total_net)
    }

    // ── Position reads ──────────────────────────────────────────────────────

    pub fn get_pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let cfg = config::load(&env)?;
        let pool = pool::load(&env, pool_id)?;
        let position = ledger::load(&env, pool_id, &user);
        settlement::pending_reward(&env, &cfg, &pool, &position, &user, env.ledger().timestamp())
    }

    pub fn preview_harvest(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<FeeBreakdown, ContractError> {
        let cfg = config::load(&env)?;
        let gross = Self::get_pending_reward(env, pool_id, user)?;
        rewards::split_fees(gross, cfg.caller_fee_bps, cfg.claim_fee_bps)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn get_stake(env: Env, pool_id: u32, user: Address) -> Result<UserStake, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &user))
    }

    pub fn get_user_pools(env: Env, user: Address) -> Vec<u32> {
        ledger::user_pools(&env, &user)
    }

    /// Effective multiplier for `user` in a pool, in hundredths.
    pub fn get_multiplier(env: Env, pool_id: u32, user: Address) -> Result<u32, ContractError> {
        let cfg = config::load(&env)?;
        let pool = pool::load(&env, pool_id)?;
        multiplier::resolve_multiplier(&env, &cfg, &pool.config, &user)
    }

    /// Everything `user` has at work across all pools: direct principal plus
    /// the current value of their vault shares.
    pub fn get_total_deposit(env: Env, user: Address) -> Result<i128, ContractError> {
        let contract = env.current_contract_address();
        let mut total: i128 = 0;
        for pool_id in 0..pool::count(&env) {
            if user != contract {
                let principal = ledger::load(&env, pool_id, &user).principal;
                total = math::checked_add(total, principal)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            }
            let in_vault = vault::user_balance(&env, pool_id, &user)?;
            total = math::checked_add(total, in_vault).ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    // ── Vault ───────────────────────────────────────────────────────────────

    /// Deposit into a pool's compounding vault. Returns the shares minted.
    pub fn vault_deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        user.require_auth();
        vault::deposit(&env, &cfg, &user, pool_id, amount)
    }

    /// Burn `shares` for their share of the underlying.
    pub fn vault_withdraw(
        env: Env,
        user: Address,
        pool_id: u32,
        shares: i128,
    ) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        user.require_auth();
        vault::withdraw(&env, &cfg, &user, pool_id, shares)
    }

    pub fn vault_withdraw_all(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        user.require_auth();
        let shares = vault::load_user(&env, pool_id, &user).shares;
        vault::withdraw(&env, &cfg, &user, pool_id, shares)
    }

    /// Compound a vault's pending reward. The caller earns the caller fee.
    pub fn vault_harvest(
        env: Env,
        caller: Address,
        pool_id: u32,
    ) -> Result<FeeBreakdown, ContractError> {
        let cfg = Self::require_active(&env)?;
        caller.require_auth();
        vault::harvest(&env, &cfg, &caller, pool_id)
    }

    pub fn vault_harvest_all(env: Env, caller: Address) -> Result<i128, ContractError> {
        let cfg = Self::require_active(&env)?;
        caller.require_auth();
        vault::harvest_all(&env, &cfg, &caller)
    }

    /// Underlying per 10^18 shares.
    pub fn get_price_per_full_share(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        pool::load(&env, pool_id)?;
        let position = ledger::load(&env, pool_id, &env.current_contract_address());
        let state = vault::load_state(&env, pool_id);
        let underlying =
            vault::underlying(&position, &state).ok_or(ContractError::ArithmeticOverflow)?;
        vault::price_per_full_share(underlying, state.total_shares)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn get_vault(env: Env, pool_id: u32) -> Result<VaultInfo, ContractError> {
        let cfg = config::load(&env)?;
        vault::info(&env, &cfg, pool_id)
    }

    pub fn get_vault_user(env: Env, pool_id: u32, user: Address) -> Result<VaultUser, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(vault::load_user(&env, pool_id, &user))
    }

    pub fn get_vault_balance(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        pool::load(&env, pool_id)?;
        vault::user_balance(&env, pool_id, &user)
    }

    pub fn get_vault_pending(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        Ok(Self::get_vault(env, pool_id)?.pending)
    }

    pub fn preview_vault_harvest(env: Env, pool_id: u32) -> Result<FeeBreakdown, ContractError> {
        let cfg = config::load(&env)?;
        vault::preview_harvest(&env, &cfg, pool_id)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Promotes or assigns a target address to the specified admin tier.
    ///
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

    /// Removes the admin tier from the target address entirely.
    ///
    /// Only a `SuperAdmin` may call this, and never against the bootstrap admin.
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
        if !config::has(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard for user-facing mutations: initialized and not paused.
    fn require_active(env: &Env) -> Result<StakingConfig, ContractError> {
        let cfg = config::load(env)?;
        if config::is_paused(env) {
            return Err(ContractError::Paused);
        }
        storage::bump_instance(env);
        Ok(cfg)
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

    /// The contract's own address holds the vault positions; they move only
    /// through the vault entry points.
    fn require_external(env: &Env, account: &Address) -> Result<(), ContractError> {
        if *account == env.current_contract_address() {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    fn set_pause_state(env: &Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_admin_tier(env, &caller, &AdminTier::OperatorAdmin)?;
        config::set_paused(env, paused);
        events::publish_pause_changed(env, caller, paused);
        Ok(())
    }

    fn harvest_position(
        env: &Env,
        cfg: &StakingConfig,
        pool_id: u32,
        user: &Address,
        caller: &Address,
    ) -> Result<FeeBreakdown, ContractError> {
        let mut pool = pool::load(env, pool_id)?;
        let mut position = ledger::load(env, pool_id, user);
        let now = env.ledger().timestamp();

        let gross = settlement::pending_reward(env, cfg, &pool, &position, user, now)?;
        if gross <= 0 {
            return Err(ContractError::ZeroClaimable);
        }
        let split = rewards::split_fees(gross, cfg.caller_fee_bps, cfg.claim_fee_bps)
            .ok_or(ContractError::ArithmeticOverflow)?;

        settlement::settle(&mut pool, &mut position, gross, now)?;
        ledger::save(env, pool_id, user, &position);
        pool::save(env, &pool);

        let contract = env.current_contract_address();
        let reward = token::Client::new(env, &pool.config.reward_token);
        if split.caller_fee > 0 {
            reward.transfer(&contract, caller, &split.caller_fee);
        }
        if split.treasury_fee > 0 {
            reward.transfer(&contract, &cfg.treasury, &split.treasury_fee);
        }
        if split.net > 0 {
            reward.transfer(&contract, user, &split.net);
        }

        events::publish_harvested(env, pool_id, user.clone(), caller.clone(), &split);
        Ok(split)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_admin_tiers;

#[cfg(test)]
mod test_multiplier;

#[cfg(test)]
mod test_vault;
