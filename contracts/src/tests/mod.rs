//! Test modules for the confidential prediction contract.

use crate::clock::SECONDS_PER_DAY;
use crate::constants::{DEFAULT_MAX_STAKE, DEFAULT_MIN_STAKE, SUPPORTED_PROTOCOL_ID};
use crate::contract::{OraclePredictionContract, OraclePredictionContractClient};
use crate::types::{zero_handle, Asset, Config};
use fhe_coprocessor::{
    CoprocessorContract, CoprocessorContractClient, DataKey as CoprocessorKey, InputValue,
};
use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, Val, Vec,
};


/// 2025-10-09 00:00:00 UTC, so day indices look realistic
pub(crate) const GENESIS: u64 = 20_370 * SECONDS_PER_DAY;

/// Everything a test needs: the prediction contract, its coprocessor and
/// the native stake token, with the owner already set.
pub(crate) struct Setup<'a> {
    pub env: Env,
    pub contract_id: Address,
    pub client: OraclePredictionContractClient<'a>,
    pub coprocessor: CoprocessorContractClient<'a>,
    pub token: TokenClient<'a>,
    pub token_admin: StellarAssetClient<'a>,
    pub owner: Address,
}

/// Registers the coprocessor and stake token without initializing the
/// prediction contract.
pub(crate) fn deploy(env: &Env) -> Setup<'_> {
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = GENESIS);

    let coprocessor_id = env.register(CoprocessorContract, ());
    let coprocessor = CoprocessorContractClient::new(env, &coprocessor_id);
    coprocessor.initialize(&SUPPORTED_PROTOCOL_ID);

    let issuer = Address::generate(env);
    let sac = env.register_stellar_asset_contract_v2(issuer);
    let token = TokenClient::new(env, &sac.address());
    let token_admin = StellarAssetClient::new(env, &sac.address());

    let contract_id = env.register(OraclePredictionContract, ());
    let client = OraclePredictionContractClient::new(env, &contract_id);

    Setup {
        env: env.clone(),
        contract_id,
        client,
        coprocessor,
        token,
        token_admin,
        owner: Address::generate(env),
    }
}

/// Deploys and initializes with the default stake limits
pub(crate) fn setup(env: &Env) -> Setup<'_> {
    let s = deploy(env);
    let config = s.default_config();
    s.client.initialize(&s.owner, &config);
    s
}

impl<'a> Setup<'a> {
    pub fn default_config(&self) -> Config {
        Config {
            coprocessor: self.coprocessor.address.clone(),
            stake_token: self.token.address.clone(),
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: DEFAULT_MAX_STAKE,
        }
    }

    /// New user holding `amount` stroops of the stake token
    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.token_admin.mint(&user, &amount);
        user
    }

    /// Encrypts price and direction for `user` and submits them
    pub fn predict(
        &self,
        user: &Address,
        asset: Asset,
        price: u64,
        expect_higher: bool,
        stake: i128,
    ) -> u64 {
        let input = self.coprocessor.encrypt_input(
            &self.contract_id,
            user,
            &vec![&self.env, InputValue::Uint64(price), InputValue::Bool(expect_higher)],
        );
        self.client.submit_prediction(
            user,
            &asset,
            &input.handles.get(0).unwrap(),
            &input.handles.get(1).unwrap(),
            &input.proof,
            &stake,
        )
    }

    /// Encrypts a closing price as the owner and records it for today
    pub fn record(&self, asset: Asset, price: u64) -> u64 {
        let input = self.coprocessor.encrypt_input(
            &self.contract_id,
            &self.owner,
            &vec![&self.env, InputValue::Uint64(price)],
        );
        self.client.record_daily_price(
            &self.owner,
            &asset,
            &input.handles.get(0).unwrap(),
            &input.proof,
        )
    }

    /// Decrypts the user's points through the relayer path; zero if none
    pub fn points_of(&self, user: &Address) -> u64 {
        let handle = self.client.get_encrypted_points(user);
        if handle == zero_handle(&self.env) {
            return 0;
        }
        let now = self.env.ledger().timestamp();
        self.coprocessor
            .user_decrypt(user, &self.contract_id, &handle, &now, &1)
    }

    /// Number of handles the coprocessor has issued so far
    pub fn handles_issued(&self) -> u64 {
        self.env.as_contract(&self.coprocessor.address, || {
            self.env
                .storage()
                .instance()
                .get::<_, u64>(&CoprocessorKey::Nonce)
                .unwrap_or(0)
        })
    }

    /// Events published by the prediction contract itself, oldest first
    pub fn contract_events(&self) -> Vec<(Address, Vec<Val>, Val)> {
        let mut events = Vec::new(&self.env);
        for event in self.env.events().all().iter() {
            if event.0 == self.contract_id {
                events.push_back(event);
            }
        }
        events
    }

    pub fn advance_days(&self, days: u64) {
        self.advance_seconds(days * SECONDS_PER_DAY);
    }

    pub fn advance_seconds(&self, seconds: u64) {
        self.env
            .ledger()
            .with_mut(|li| li.timestamp += seconds);
    }
}
