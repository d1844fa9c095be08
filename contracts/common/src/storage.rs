use soroban_sdk::{Env, IntoVal, Val};

/// Persistent entries are bumped whenever they drop below this many ledgers.
pub const TTL_THRESHOLD: u32 = 518_400;
/// ...and extended to this many ledgers, the network maximum for an entry.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extend the TTL of a persistent entry that was just read or written.
pub fn bump<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extend the TTL of the contract instance (and every instance key).
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
