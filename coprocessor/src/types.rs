//! Type definitions for the mock FHE coprocessor.

use soroban_sdk::{contracttype, Address, Bytes, BytesN, Vec};

/// Storage keys for coprocessor data
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    ProtocolId,
    Nonce,
    Ciphertext(BytesN<32>),
    InputBinding(BytesN<32>),
    Grant(BytesN<32>, Address),
    PublicDecrypt(BytesN<32>),
}

/// Encrypted value types understood by the coprocessor
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FheType {
    Bool = 0,
    Uint64 = 5,
}

/// Value held behind a handle. Booleans are stored as 0 or 1.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Ciphertext {
    pub fhe_type: FheType,
    pub value: u64,
}

/// Ties an input handle to the contract and user it was encrypted for
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct InputBinding {
    pub contract: Address,
    pub user: Address,
    pub proof: Bytes,
}

/// Cleartext handed to the client-side encryption stand-in
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Uint64(u64),
    Bool(bool),
}

/// Handles plus the single proof covering all of them
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct EncryptedInput {
    pub handles: Vec<BytesN<32>>,
    pub proof: Bytes,
}
