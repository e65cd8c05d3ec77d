//! Test modules for the mock FHE coprocessor.

use crate::contract::{CoprocessorContract, CoprocessorContractClient};
use soroban_sdk::{Address, Env};

mod inputs;

pub(crate) const PROTOCOL_ID: u32 = 1;

/// Registers and initializes a coprocessor with all auths mocked
pub(crate) fn setup(env: &Env) -> (Address, CoprocessorContractClient<'_>) {
    let contract_id = env.register(CoprocessorContract, ());
    let client = CoprocessorContractClient::new(env, &contract_id);

    env.mock_all_auths();
    client.initialize(&PROTOCOL_ID);

    (contract_id, client)
}

/// Reads the cleartext behind a handle straight from coprocessor storage
pub(crate) fn reveal(env: &Env, contract_id: &Address, handle: &soroban_sdk::BytesN<32>) -> u64 {
    env.as_contract(contract_id, || {
        let ciphertext: crate::types::Ciphertext = env
            .storage()
            .persistent()
            .get(&crate::types::DataKey::Ciphertext(handle.clone()))
            .unwrap();
        ciphertext.value
    })
}
