//! Protocol constants and configuration defaults.

/// Stroops in one unit of the native asset
pub const ONE_UNIT: i128 = 10_000_000;

/// Default minimum stake (0.0001 units)
pub const DEFAULT_MIN_STAKE: i128 = 1_000;

/// Default maximum stake. Stakes are re-encrypted as 64-bit values, so any
/// configured maximum must also fit in a u64.
pub const DEFAULT_MAX_STAKE: i128 = 1_000_000 * ONE_UNIT;

/// Coprocessor protocol version this contract is built against
pub const SUPPORTED_PROTOCOL_ID: u32 = 1;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;
pub(crate) const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
