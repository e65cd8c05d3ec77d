//! Events published by the confidential prediction contract. Secret values
//! only ever appear as handles.

use soroban_sdk::{contractevent, Address, BytesN};

use crate::types::Asset;

#[contractevent(topics = ["price_recorded"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceRecorded {
    pub asset: Asset,
    pub day: u64,
    pub timestamp: u64,
}

#[contractevent(topics = ["prediction_submitted"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredictionSubmitted {
    pub user: Address,
    pub asset: Asset,
    pub target_day: u64,
    pub stake: i128,
}

#[contractevent(topics = ["prediction_claimed"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredictionClaimed {
    pub user: Address,
    pub asset: Asset,
    pub day: u64,
    pub outcome: BytesN<32>,
    pub reward: BytesN<32>,
    pub total_points: BytesN<32>,
}

#[contractevent(topics = ["ownership_transferred"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}
