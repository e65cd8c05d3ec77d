//! Typed access to the FHE coprocessor.
//!
//! Handles are opaque references into the coprocessor's ciphertext store.
//! This module never looks behind them; it only forwards them to the
//! coprocessor's verify, compute and grant entry points on behalf of this
//! contract.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

use crate::errors::ContractError;

/// Interface of the encryption subsystem, as called from this contract
#[allow(dead_code)]
#[contractclient(name = "CoprocessorClient")]
pub trait Coprocessor {
    fn protocol_id(env: Env) -> u32;

    fn verify_u64(
        env: Env,
        caller: Address,
        user: Address,
        handle: BytesN<32>,
        proof: Bytes,
    ) -> BytesN<32>;

    fn verify_bool(
        env: Env,
        caller: Address,
        user: Address,
        handle: BytesN<32>,
        proof: Bytes,
    ) -> BytesN<32>;

    fn as_u64(env: Env, caller: Address, value: u64) -> BytesN<32>;

    fn gt(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn eq(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn select(
        env: Env,
        caller: Address,
        condition: BytesN<32>,
        if_true: BytesN<32>,
        if_false: BytesN<32>,
    ) -> BytesN<32>;

    fn add(env: Env, caller: Address, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    fn allow(env: Env, caller: Address, handle: BytesN<32>, account: Address);

    fn make_publicly_decryptable(env: Env, caller: Address, handle: BytesN<32>);
}

/// Handle to an encrypted 64-bit unsigned integer
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Euint64(BytesN<32>);

/// Handle to an encrypted boolean
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ebool(BytesN<32>);

impl Euint64 {
    pub fn from_handle(handle: BytesN<32>) -> Self {
        Euint64(handle)
    }

    pub fn handle(&self) -> &BytesN<32> {
        &self.0
    }

    pub fn into_handle(self) -> BytesN<32> {
        self.0
    }
}

impl Ebool {
    pub fn from_handle(handle: BytesN<32>) -> Self {
        Ebool(handle)
    }

    pub fn handle(&self) -> &BytesN<32> {
        &self.0
    }

    pub fn into_handle(self) -> BytesN<32> {
        self.0
    }
}

/// Coprocessor session bound to the current contract. Every result handle
/// is granted to this contract by the coprocessor.
pub struct Fhe<'a> {
    client: CoprocessorClient<'a>,
    this: Address,
}

impl<'a> Fhe<'a> {
    pub fn new(env: &'a Env, coprocessor: &Address) -> Self {
        Fhe {
            client: CoprocessorClient::new(env, coprocessor),
            this: env.current_contract_address(),
        }
    }

    /// `None` when the coprocessor cannot report a protocol id
    pub fn protocol_id(&self) -> Option<u32> {
        match self.client.try_protocol_id() {
            Ok(Ok(id)) => Some(id),
            _ => None,
        }
    }

    pub fn verify_u64(
        &self,
        user: &Address,
        handle: &BytesN<32>,
        proof: &Bytes,
    ) -> Result<Euint64, ContractError> {
        match self.client.try_verify_u64(&self.this, user, handle, proof) {
            Ok(Ok(verified)) => Ok(Euint64(verified)),
            _ => Err(ContractError::InvalidInputProof),
        }
    }

    pub fn verify_bool(
        &self,
        user: &Address,
        handle: &BytesN<32>,
        proof: &Bytes,
    ) -> Result<Ebool, ContractError> {
        match self.client.try_verify_bool(&self.this, user, handle, proof) {
            Ok(Ok(verified)) => Ok(Ebool(verified)),
            _ => Err(ContractError::InvalidInputProof),
        }
    }

    pub fn as_u64(&self, value: u64) -> Euint64 {
        Euint64(self.client.as_u64(&self.this, &value))
    }

    pub fn gt(&self, lhs: &Euint64, rhs: &Euint64) -> Ebool {
        Ebool(self.client.gt(&self.this, &lhs.0, &rhs.0))
    }

    pub fn eq(&self, lhs: &Ebool, rhs: &Ebool) -> Ebool {
        Ebool(self.client.eq(&self.this, &lhs.0, &rhs.0))
    }

    pub fn select(&self, condition: &Ebool, if_true: &Euint64, if_false: &Euint64) -> Euint64 {
        Euint64(
            self.client
                .select(&self.this, &condition.0, &if_true.0, &if_false.0),
        )
    }

    pub fn add(&self, lhs: &Euint64, rhs: &Euint64) -> Euint64 {
        Euint64(self.client.add(&self.this, &lhs.0, &rhs.0))
    }

    pub fn allow(&self, handle: &BytesN<32>, account: &Address) {
        self.client.allow(&self.this, handle, account);
    }

    pub fn make_publicly_decryptable(&self, handle: &BytesN<32>) {
        self.client.make_publicly_decryptable(&self.this, handle);
    }
}
