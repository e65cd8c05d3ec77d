//! Tests for input encryption and proof verification.

use super::{setup, PROTOCOL_ID};
use crate::contract::{CoprocessorContract, CoprocessorContractClient};
use crate::errors::CoprocessorError;
use crate::types::InputValue;
use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, Env};

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (_, client) = setup(&env);

    assert_eq!(client.protocol_id(), PROTOCOL_ID);

    let result = client.try_initialize(&7);
    assert_eq!(result, Err(Ok(CoprocessorError::AlreadyInitialized)));
}

#[test]
fn test_encrypt_before_initialize_fails() {
    let env = Env::default();
    let contract_id = env.register(CoprocessorContract, ());
    let client = CoprocessorContractClient::new(&env, &contract_id);
    let app = Address::generate(&env);
    let user = Address::generate(&env);

    env.mock_all_auths();

    let result = client.try_encrypt_input(&app, &user, &vec![&env, InputValue::Uint64(1)]);
    assert_eq!(result, Err(Ok(CoprocessorError::NotInitialized)));
    assert_eq!(client.try_protocol_id(), Err(Ok(CoprocessorError::NotInitialized)));
}

#[test]
fn test_bundle_handles_share_one_proof() {
    let env = Env::default();
    let (_, client) = setup(&env);
    let app = Address::generate(&env);
    let user = Address::generate(&env);

    let input = client.encrypt_input(
        &app,
        &user,
        &vec![&env, InputValue::Uint64(250_000), InputValue::Bool(true)],
    );
    assert_eq!(input.handles.len(), 2);
    assert_ne!(input.handles.get(0), input.handles.get(1));

    let price = client.verify_u64(&app, &user, &input.handles.get(0).unwrap(), &input.proof);
    let direction = client.verify_bool(&app, &user, &input.handles.get(1).unwrap(), &input.proof);

    assert_eq!(price, input.handles.get(0).unwrap());
    assert_eq!(direction, input.handles.get(1).unwrap());
    assert!(client.is_allowed(&price, &app));
    assert!(client.is_allowed(&direction, &app));
    // Verification grants the consuming contract, nobody else
    assert!(!client.is_allowed(&price, &user));
}

#[test]
fn test_verify_rejects_wrong_contract_or_user() {
    let env = Env::default();
    let (_, client) = setup(&env);
    let app = Address::generate(&env);
    let other_app = Address::generate(&env);
    let user = Address::generate(&env);
    let mallory = Address::generate(&env);

    let input = client.encrypt_input(&app, &user, &vec![&env, InputValue::Uint64(42)]);
    let handle = input.handles.get(0).unwrap();

    let result = client.try_verify_u64(&other_app, &user, &handle, &input.proof);
    assert_eq!(result, Err(Ok(CoprocessorError::InvalidInputProof)));

    let result = client.try_verify_u64(&app, &mallory, &handle, &input.proof);
    assert_eq!(result, Err(Ok(CoprocessorError::InvalidInputProof)));
}

#[test]
fn test_verify_rejects_tampered_proof() {
    let env = Env::default();
    let (_, client) = setup(&env);
    let app = Address::generate(&env);
    let user = Address::generate(&env);

    let input = client.encrypt_input(&app, &user, &vec![&env, InputValue::Uint64(42)]);
    let handle = input.handles.get(0).unwrap();

    let forged = Bytes::from_array(&env, &[7u8; 32]);
    let result = client.try_verify_u64(&app, &user, &handle, &forged);
    assert_eq!(result, Err(Ok(CoprocessorError::InvalidInputProof)));

    // A proof from a different bundle does not carry over
    let other = client.encrypt_input(&app, &user, &vec![&env, InputValue::Uint64(43)]);
    let result = client.try_verify_u64(&app, &user, &handle, &other.proof);
    assert_eq!(result, Err(Ok(CoprocessorError::InvalidInputProof)));
}

#[test]
fn test_verify_checks_declared_type() {
    let env = Env::default();
    let (_, client) = setup(&env);
    let app = Address::generate(&env);
    let user = Address::generate(&env);

    let input = client.encrypt_input(&app, &user, &vec![&env, InputValue::Bool(false)]);
    let handle = input.handles.get(0).unwrap();

    let result = client.try_verify_u64(&app, &user, &handle, &input.proof);
    assert_eq!(result, Err(Ok(CoprocessorError::TypeMismatch)));
}

#[test]
fn test_verify_unknown_handle_fails() {
    let env = Env::default();
    let (_, client) = setup(&env);
    let app = Address::generate(&env);
    let user = Address::generate(&env);

    let unknown = soroban_sdk::BytesN::from_array(&env, &[1u8; 32]);
    let proof = Bytes::from_array(&env, &[0u8; 32]);

    let result = client.try_verify_bool(&app, &user, &unknown, &proof);
    assert_eq!(result, Err(Ok(CoprocessorError::InvalidInputProof)));
}
