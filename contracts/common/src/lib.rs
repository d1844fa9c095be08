//! Shared utilities for the staking and vesting contracts.
//!
//! This crate provides:
//! - [`math`]: checked fixed-point helpers used by reward and vesting math.
//! - [`admin_tiers`]: the three-tier admin hierarchy.
//! - [`storage`]: persistent-entry TTL helpers.
//!
//! Each contract defines its own `ContractError`. Both keep lifecycle, auth
//! and validation failures on the same codes below **100** and number their
//! contract-specific errors from 100 up.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod admin_tiers;
pub mod math;
pub mod storage;

pub use admin_tiers::*;
