#![no_std]
//! # Confidential Daily Price Prediction
//!
//! Soroban contract where users stake the native asset on whether tomorrow's
//! closing price of ETH or BTC lands above or below a price they pick.
//! Predicted price, direction and settlement price stay encrypted; outcomes
//! are decided by an FHE coprocessor and credited as encrypted points.
//!
//! ## Key Features
//! - Day-indexed, write-once encrypted price ledger (owner reported)
//! - One prediction per user, asset and day, with native-asset escrow
//! - Oblivious settlement: compare, select and add run on every claim
//! - Encrypted points balance with explicit decryption grants

mod clock;
mod constants;
mod contract;
mod errors;
mod events;
mod fhe;
mod settlement;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{day_of, SECONDS_PER_DAY};
pub use constants::{DEFAULT_MAX_STAKE, DEFAULT_MIN_STAKE, ONE_UNIT, SUPPORTED_PROTOCOL_ID};
pub use contract::{OraclePredictionContract, OraclePredictionContractClient};
pub use errors::ContractError;
pub use events::{OwnershipTransferred, PredictionClaimed, PredictionSubmitted, PriceRecorded};
pub use fhe::{CoprocessorClient, Ebool, Euint64};
pub use types::{Asset, ClaimReceipt, Config, DailyPrice, DataKey, Prediction};
