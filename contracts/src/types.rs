//! Type definitions for the confidential prediction contract.

use soroban_sdk::{contracttype, Address, BytesN, Env};

/// Assets that can be predicted
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Asset {
    Eth = 0,
    Btc = 1,
}

/// Storage keys for contract data
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Config,
    DailyPrice(Asset, u64),
    Prediction(Address, Asset, u64),
    Points(Address),
}

/// Deployment parameters fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub coprocessor: Address,  // FHE coprocessor contract
    pub stake_token: Address,  // Native asset contract used for escrow
    pub min_stake: i128,       // Inclusive, in stroops
    pub max_stake: i128,       // Inclusive, in stroops
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DailyPrice {
    pub price: BytesN<32>,   // euint64 handle, closing price in cents
    pub timestamp: u64,      // Ledger time of recording
    pub recorded: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prediction {
    pub price: BytesN<32>,          // euint64 handle
    pub expect_higher: BytesN<32>,  // ebool handle
    pub stake: i128,
    pub claimed: bool,
    pub target_day: u64,
}

/// Handles produced by one settlement, all granted to the claimer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimReceipt {
    pub outcome: BytesN<32>,       // ebool, prediction was correct
    pub reward: BytesN<32>,        // euint64, stake or zero
    pub total_points: BytesN<32>,  // euint64, new points balance
}

/// The all-zero handle marks "nothing stored"
pub fn zero_handle(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

impl DailyPrice {
    pub fn empty(env: &Env) -> Self {
        DailyPrice {
            price: zero_handle(env),
            timestamp: 0,
            recorded: false,
        }
    }
}

impl Prediction {
    pub fn empty(env: &Env) -> Self {
        Prediction {
            price: zero_handle(env),
            expect_higher: zero_handle(env),
            stake: 0,
            claimed: false,
            target_day: 0,
        }
    }
}
