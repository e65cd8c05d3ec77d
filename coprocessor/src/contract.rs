//! Core contract implementation for the mock FHE coprocessor.

use soroban_sdk::{contract, contractimpl, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::errors::CoprocessorError;
use crate::types::{Ciphertext, DataKey, EncryptedInput, FheType, InputBinding, InputValue};

const DAY_IN_LEDGERS: u32 = 17280;
const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

const SECONDS_PER_DAY: u64 = 86_400;
/// Longest validity window a user decryption request may ask for
pub const MAX_DECRYPT_DAYS: u32 = 365;

#[contract]
pub struct CoprocessorContract;

#[contractimpl]
impl CoprocessorContract {
    /// Sets the protocol id reported to client contracts (one-time only)
    pub fn initialize(env: Env, protocol_id: u32) -> Result<(), CoprocessorError> {
        if env.storage().instance().has(&DataKey::ProtocolId) {
            return Err(CoprocessorError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::ProtocolId, &protocol_id);
        env.storage().instance().set(&DataKey::Nonce, &0u64);

        Ok(())
    }

    pub fn protocol_id(env: Env) -> Result<u32, CoprocessorError> {
        env.storage()
            .instance()
            .get(&DataKey::ProtocolId)
            .ok_or(CoprocessorError::NotInitialized)
    }

    /// Client-side encryption stand-in. Every handle in the bundle is bound
    /// to `(contract, user)` by one proof.
    pub fn encrypt_input(
        env: Env,
        contract: Address,
        user: Address,
        values: Vec<InputValue>,
    ) -> Result<EncryptedInput, CoprocessorError> {
        user.require_auth();
        Self::_require_initialized(&env)?;

        let mut handles: Vec<BytesN<32>> = Vec::new(&env);
        for value in values.iter() {
            let ciphertext = match value {
                InputValue::Uint64(v) => Ciphertext {
                    fhe_type: FheType::Uint64,
                    value: v,
                },
                InputValue::Bool(b) => Ciphertext {
                    fhe_type: FheType::Bool,
                    value: b as u64,
                },
            };
            handles.push_back(Self::_store(&env, ciphertext));
        }

        let proof = Self::_input_proof(&env, &contract, &user, &handles);
        for handle in handles.iter() {
            let key = DataKey::InputBinding(handle);
            env.storage().persistent().set(
                &key,
                &InputBinding {
                    contract: contract.clone(),
                    user: user.clone(),
                    proof: proof.clone(),
                },
            );
            Self::_extend_persistent(&env, &key);
        }

        Ok(EncryptedInput { handles, proof })
    }

    /// Converts an external 64-bit input into a handle usable by `caller`
    pub fn verify_u64(
        env: Env,
        caller: Address,
        user: Address,
        handle: BytesN<32>,
        proof: Bytes,
    ) -> Result<BytesN<32>, CoprocessorError> {
        Self::_verify_input(&env, caller, user, handle, proof, FheType::Uint64)
    }

    /// Converts an external boolean input into a handle usable by `caller`
    pub fn verify_bool(
        env: Env,
        caller: Address,
        user: Address,
        handle: BytesN<32>,
        proof: Bytes,
    ) -> Result<BytesN<32>, CoprocessorError> {
        Self::_verify_input(&env, caller, user, handle, proof, FheType::Bool)
    }

    /// Trivially encrypts a public 64-bit value
    pub fn as_u64(env: Env, caller: Address, value: u64) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();
        Self::_require_initialized(&env)?;

        Self::_store_result(
            &env,
            &caller,
            Ciphertext {
                fhe_type: FheType::Uint64,
                value,
            },
        )
    }

    /// Encrypted `lhs > rhs` over 64-bit operands
    pub fn gt(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();

        let a = Self::_operand(&env, &caller, &lhs, Some(FheType::Uint64))?;
        let b = Self::_operand(&env, &caller, &rhs, Some(FheType::Uint64))?;

        Self::_store_result(
            &env,
            &caller,
            Ciphertext {
                fhe_type: FheType::Bool,
                value: (a.value > b.value) as u64,
            },
        )
    }

    /// Encrypted equality; both operands must share a type
    pub fn eq(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();

        let a = Self::_operand(&env, &caller, &lhs, None)?;
        let b = Self::_operand(&env, &caller, &rhs, Some(a.fhe_type))?;

        Self::_store_result(
            &env,
            &caller,
            Ciphertext {
                fhe_type: FheType::Bool,
                value: (a.value == b.value) as u64,
            },
        )
    }

    /// Encrypted multiplexer: `condition ? if_true : if_false`
    pub fn select(
        env: Env,
        caller: Address,
        condition: BytesN<32>,
        if_true: BytesN<32>,
        if_false: BytesN<32>,
    ) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();

        let c = Self::_operand(&env, &caller, &condition, Some(FheType::Bool))?;
        let t = Self::_operand(&env, &caller, &if_true, None)?;
        let f = Self::_operand(&env, &caller, &if_false, Some(t.fhe_type))?;

        let chosen = if c.value != 0 { t } else { f };
        Self::_store_result(&env, &caller, chosen)
    }

    /// Encrypted 64-bit addition, wrapping on overflow
    pub fn add(
        env: Env,
        caller: Address,
        lhs: BytesN<32>,
        rhs: BytesN<32>,
    ) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();

        let a = Self::_operand(&env, &caller, &lhs, Some(FheType::Uint64))?;
        let b = Self::_operand(&env, &caller, &rhs, Some(FheType::Uint64))?;

        Self::_store_result(
            &env,
            &caller,
            Ciphertext {
                fhe_type: FheType::Uint64,
                value: a.value.wrapping_add(b.value),
            },
        )
    }

    /// Grants `account` access to a handle the caller already holds
    pub fn allow(
        env: Env,
        caller: Address,
        handle: BytesN<32>,
        account: Address,
    ) -> Result<(), CoprocessorError> {
        caller.require_auth();

        Self::_operand(&env, &caller, &handle, None)?;
        Self::_grant(&env, &handle, &account);

        Ok(())
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Grant(handle, account))
    }

    /// Lets anyone decrypt the handle through `public_decrypt`
    pub fn make_publicly_decryptable(
        env: Env,
        caller: Address,
        handle: BytesN<32>,
    ) -> Result<(), CoprocessorError> {
        caller.require_auth();

        Self::_operand(&env, &caller, &handle, None)?;

        let key = DataKey::PublicDecrypt(handle);
        env.storage().persistent().set(&key, &true);
        Self::_extend_persistent(&env, &key);

        Ok(())
    }

    pub fn is_publicly_decryptable(env: Env, handle: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::PublicDecrypt(handle))
            .unwrap_or(false)
    }

    pub fn public_decrypt(env: Env, handle: BytesN<32>) -> Result<u64, CoprocessorError> {
        if !Self::is_publicly_decryptable(env.clone(), handle.clone()) {
            return Err(CoprocessorError::NotPubliclyDecryptable);
        }

        Ok(Self::_load(&env, &handle)?.value)
    }

    /// Relayer path: decrypts a handle for `user` within a signed validity
    /// window. Both the user and the contract that owns the handle need a grant.
    pub fn user_decrypt(
        env: Env,
        user: Address,
        contract: Address,
        handle: BytesN<32>,
        start_timestamp: u64,
        duration_days: u32,
    ) -> Result<u64, CoprocessorError> {
        user.require_auth();

        if duration_days == 0 || duration_days > MAX_DECRYPT_DAYS {
            return Err(CoprocessorError::InvalidDecryptWindow);
        }

        let end_timestamp = start_timestamp
            .checked_add(duration_days as u64 * SECONDS_PER_DAY)
            .ok_or(CoprocessorError::InvalidDecryptWindow)?;
        let now = env.ledger().timestamp();
        if now < start_timestamp || now >= end_timestamp {
            return Err(CoprocessorError::InvalidDecryptWindow);
        }

        let ciphertext = Self::_load(&env, &handle)?;
        if !Self::is_allowed(env.clone(), handle.clone(), user)
            || !Self::is_allowed(env.clone(), handle, contract)
        {
            return Err(CoprocessorError::AccessDenied);
        }

        Ok(ciphertext.value)
    }

    fn _verify_input(
        env: &Env,
        caller: Address,
        user: Address,
        handle: BytesN<32>,
        proof: Bytes,
        expected: FheType,
    ) -> Result<BytesN<32>, CoprocessorError> {
        caller.require_auth();

        let binding: InputBinding = env
            .storage()
            .persistent()
            .get(&DataKey::InputBinding(handle.clone()))
            .ok_or(CoprocessorError::InvalidInputProof)?;

        if binding.contract != caller || binding.user != user || binding.proof != proof {
            return Err(CoprocessorError::InvalidInputProof);
        }

        if Self::_load(env, &handle)?.fhe_type != expected {
            return Err(CoprocessorError::TypeMismatch);
        }

        Self::_grant(env, &handle, &caller);
        Ok(handle)
    }

    /// Loads an operand the caller is allowed to use, optionally checking its type
    fn _operand(
        env: &Env,
        caller: &Address,
        handle: &BytesN<32>,
        expected: Option<FheType>,
    ) -> Result<Ciphertext, CoprocessorError> {
        let ciphertext = Self::_load(env, handle)?;

        if !Self::is_allowed(env.clone(), handle.clone(), caller.clone()) {
            return Err(CoprocessorError::AccessDenied);
        }

        if let Some(fhe_type) = expected {
            if ciphertext.fhe_type != fhe_type {
                return Err(CoprocessorError::TypeMismatch);
            }
        }

        Ok(ciphertext)
    }

    fn _load(env: &Env, handle: &BytesN<32>) -> Result<Ciphertext, CoprocessorError> {
        let key = DataKey::Ciphertext(handle.clone());
        let ciphertext = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(CoprocessorError::UnknownHandle)?;
        Self::_extend_persistent(env, &key);
        Ok(ciphertext)
    }

    fn _store_result(
        env: &Env,
        caller: &Address,
        ciphertext: Ciphertext,
    ) -> Result<BytesN<32>, CoprocessorError> {
        let handle = Self::_store(env, ciphertext);
        Self::_grant(env, &handle, caller);
        Ok(handle)
    }

    fn _store(env: &Env, ciphertext: Ciphertext) -> BytesN<32> {
        let handle = Self::_next_handle(env, ciphertext.fhe_type);
        let key = DataKey::Ciphertext(handle.clone());
        env.storage().persistent().set(&key, &ciphertext);
        Self::_extend_persistent(env, &key);
        handle
    }

    fn _grant(env: &Env, handle: &BytesN<32>, account: &Address) {
        let key = DataKey::Grant(handle.clone(), account.clone());
        env.storage().persistent().set(&key, &true);
        Self::_extend_persistent(env, &key);
    }

    /// Fresh handle: sha256 over a domain tag, a monotonic nonce, the type
    /// and this contract's address.
    fn _next_handle(env: &Env, fhe_type: FheType) -> BytesN<32> {
        let nonce: u64 = env.storage().instance().get(&DataKey::Nonce).unwrap_or(0);
        env.storage().instance().set(&DataKey::Nonce, &(nonce + 1));

        let mut preimage = Bytes::from_slice(env, b"fhe-handle");
        preimage.extend_from_array(&nonce.to_be_bytes());
        preimage.push_back(fhe_type as u32 as u8);
        preimage.append(&env.current_contract_address().to_xdr(env));

        env.crypto().sha256(&preimage).to_bytes()
    }

    fn _input_proof(
        env: &Env,
        contract: &Address,
        user: &Address,
        handles: &Vec<BytesN<32>>,
    ) -> Bytes {
        let mut preimage = contract.clone().to_xdr(env);
        preimage.append(&user.clone().to_xdr(env));
        for handle in handles.iter() {
            preimage.extend_from_array(&handle.to_array());
        }

        env.crypto().sha256(&preimage).to_bytes().into()
    }

    fn _require_initialized(env: &Env) -> Result<(), CoprocessorError> {
        if !env.storage().instance().has(&DataKey::ProtocolId) {
            return Err(CoprocessorError::NotInitialized);
        }
        env.storage()
            .instance()
            .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
        Ok(())
    }

    fn _extend_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, BUMP_THRESHOLD, BUMP_AMOUNT);
    }
}
