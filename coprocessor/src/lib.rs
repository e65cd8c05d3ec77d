#![no_std]
//! # Mock FHE Coprocessor
//!
//! Deterministic stand-in for the encryption subsystem used by the
//! confidential prediction contract. Values are kept in the clear behind
//! opaque 32-byte handles so that contracts and tests can run the whole
//! encrypted flow on a plain Soroban ledger.
//!
//! ## Key Features
//! - Input bundles bound to a (contract, user) pair by a hash proof
//! - Comparison, equality, select and wrapping addition over handles
//! - Explicit grant table: only granted accounts can compute on or decrypt a handle
//! - Public decryption and time-boxed user decryption for the relayer path

mod contract;
mod errors;
mod types;

#[cfg(test)]
mod tests;

pub use contract::{CoprocessorContract, CoprocessorContractClient};
pub use errors::CoprocessorError;
pub use types::{Ciphertext, DataKey, EncryptedInput, FheType, InputBinding, InputValue};
