//! Contract error types for the confidential prediction contract.

use soroban_sdk::contracterror;

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Owner or config not set - call initialize first
    NotInitialized = 2,
    /// Caller is not the owner, or the new owner is not acceptable
    InvalidOwner = 3,
    /// User already predicted this asset for the target day
    PredictionExists = 4,
    /// Price for this asset and day is already recorded
    PriceAlreadyRecorded = 5,
    /// Price for the requested day is not recorded yet
    PriceNotReady = 6,
    /// No unclaimed prediction with a stake for this asset and day
    NothingToClaim = 7,
    /// Stake below the configured minimum
    StakeTooLow = 8,
    /// Stake above the configured maximum
    StakeTooLarge = 9,
    /// Coprocessor runs a protocol version this contract does not target
    ProtocolUnsupported = 10,
    /// Stake limits must satisfy 0 < min <= max <= u64::MAX
    InvalidStakeLimits = 11,
    /// Encrypted input was rejected by the coprocessor
    InvalidInputProof = 12,
    /// Arithmetic overflow occurred
    Overflow = 13,
}
