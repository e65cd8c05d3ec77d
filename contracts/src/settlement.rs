//! Oblivious settlement of a single prediction.
//!
//! The comparison inputs are secret, so there is no branch on the outcome:
//! every claim issues the same coprocessor calls in the same order, and the
//! reward is picked by an encrypted select over both precomputed branches.

use crate::fhe::{Ebool, Euint64, Fhe};

pub struct Settlement {
    /// Encrypted "prediction was correct"
    pub outcome: Ebool,
    /// Stake if correct, zero otherwise
    pub reward: Euint64,
    pub total_points: Euint64,
}

pub fn settle(
    fhe: &Fhe,
    recorded_price: &Euint64,
    predicted_price: &Euint64,
    expect_higher: &Ebool,
    stake: u64,
    points: Option<Euint64>,
) -> Settlement {
    // Ties count as "not higher"
    let actual_higher = fhe.gt(recorded_price, predicted_price);
    let outcome = fhe.eq(&actual_higher, expect_higher);

    let stake = fhe.as_u64(stake);
    let zero = fhe.as_u64(0);
    let reward = fhe.select(&outcome, &stake, &zero);

    let base = points.unwrap_or(zero);
    let total_points = fhe.add(&base, &reward);

    Settlement {
        outcome,
        reward,
        total_points,
    }
}
