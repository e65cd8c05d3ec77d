//! Day index derived from ledger time. Days roll over at UTC midnight.

use soroban_sdk::Env;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub fn day_of(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY
}

pub(crate) fn current_day(env: &Env) -> u64 {
    day_of(env.ledger().timestamp())
}
