//! Core contract implementation for the confidential prediction market.

use soroban_sdk::{contract, contractimpl, log, token, Address, Bytes, BytesN, Env};

use crate::clock;
use crate::constants::{BUMP_AMOUNT, BUMP_THRESHOLD, SUPPORTED_PROTOCOL_ID};
use crate::errors::ContractError;
use crate::events::{OwnershipTransferred, PredictionClaimed, PredictionSubmitted, PriceRecorded};
use crate::fhe::{Ebool, Euint64, Fhe};
use crate::settlement;
use crate::types::{zero_handle, Asset, ClaimReceipt, Config, DailyPrice, DataKey, Prediction};

#[contract]
pub struct OraclePredictionContract;

#[contractimpl]
impl OraclePredictionContract {
    /// Sets the owner and deployment config (one-time only)
    pub fn initialize(env: Env, owner: Address, config: Config) -> Result<(), ContractError> {
        owner.require_auth();

        if env.storage().instance().has(&DataKey::Owner) {
            return Err(ContractError::AlreadyInitialized);
        }

        if config.min_stake <= 0
            || config.min_stake > config.max_stake
            || config.max_stake > u64::MAX as i128
        {
            return Err(ContractError::InvalidStakeLimits);
        }

        let fhe = Fhe::new(&env, &config.coprocessor);
        if fhe.protocol_id() != Some(SUPPORTED_PROTOCOL_ID) {
            return Err(ContractError::ProtocolUnsupported);
        }

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Config, &config);
        Self::_extend_instance(&env);

        log!(&env, "initialized", owner);
        Ok(())
    }

    pub fn owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Owner)
    }

    pub fn get_config(env: Env) -> Option<Config> {
        env.storage().instance().get(&DataKey::Config)
    }

    pub fn current_day(env: Env) -> u64 {
        clock::current_day(&env)
    }

    /// Coprocessor protocol version clients must encrypt for
    pub fn confidential_protocol_id(_env: Env) -> u32 {
        SUPPORTED_PROTOCOL_ID
    }

    /// Hands the owner role to `new_owner` (owner only)
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let owner = Self::_owner(&env)?;
        if caller != owner || new_owner == env.current_contract_address() {
            return Err(ContractError::InvalidOwner);
        }

        env.storage().instance().set(&DataKey::Owner, &new_owner);
        Self::_extend_instance(&env);

        OwnershipTransferred {
            previous_owner: owner,
            new_owner,
        }
        .publish(&env);

        Ok(())
    }

    /// Records today's encrypted closing price for `asset` (owner only).
    /// Returns the day the price was recorded for.
    pub fn record_daily_price(
        env: Env,
        caller: Address,
        asset: Asset,
        price_handle: BytesN<32>,
        proof: Bytes,
    ) -> Result<u64, ContractError> {
        caller.require_auth();

        let owner = Self::_owner(&env)?;
        if caller != owner {
            return Err(ContractError::InvalidOwner);
        }
        let config = Self::_config(&env)?;

        let day = clock::current_day(&env);
        let key = DataKey::DailyPrice(asset, day);
        let existing: Option<DailyPrice> = env.storage().persistent().get(&key);
        if existing.is_some_and(|entry| entry.recorded) {
            return Err(ContractError::PriceAlreadyRecorded);
        }

        let fhe = Fhe::new(&env, &config.coprocessor);
        let price = fhe.verify_u64(&caller, &price_handle, &proof)?;
        fhe.allow(price.handle(), &caller);
        fhe.make_publicly_decryptable(price.handle());

        let timestamp = env.ledger().timestamp();
        let entry = DailyPrice {
            price: price.into_handle(),
            timestamp,
            recorded: true,
        };
        env.storage().persistent().set(&key, &entry);
        Self::_extend_persistent(&env, &key);

        PriceRecorded {
            asset,
            day,
            timestamp,
        }
        .publish(&env);

        log!(&env, "price recorded", asset, day);
        Ok(day)
    }

    /// Returns the stored price entry, or a zero entry if none was recorded
    pub fn get_daily_price(env: Env, asset: Asset, day: u64) -> DailyPrice {
        env.storage()
            .persistent()
            .get(&DataKey::DailyPrice(asset, day))
            .unwrap_or_else(|| DailyPrice::empty(&env))
    }

    /// Stakes `stake` on an encrypted price and direction for tomorrow.
    /// Returns the target day.
    pub fn submit_prediction(
        env: Env,
        user: Address,
        asset: Asset,
        price_handle: BytesN<32>,
        direction_handle: BytesN<32>,
        proof: Bytes,
        stake: i128,
    ) -> Result<u64, ContractError> {
        user.require_auth();

        let config = Self::_config(&env)?;

        let target_day = clock::current_day(&env)
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;

        let key = DataKey::Prediction(user.clone(), asset, target_day);
        if env.storage().persistent().has(&key) {
            return Err(ContractError::PredictionExists);
        }

        if stake < config.min_stake {
            return Err(ContractError::StakeTooLow);
        }
        if stake > config.max_stake {
            return Err(ContractError::StakeTooLarge);
        }

        let fhe = Fhe::new(&env, &config.coprocessor);
        let price = fhe.verify_u64(&user, &price_handle, &proof)?;
        let expect_higher = fhe.verify_bool(&user, &direction_handle, &proof)?;
        fhe.allow(price.handle(), &user);
        fhe.allow(expect_higher.handle(), &user);

        // Escrowed for good: principal is never paid back
        let stake_token = token::Client::new(&env, &config.stake_token);
        stake_token.transfer(&user, &env.current_contract_address(), &stake);

        let prediction = Prediction {
            price: price.into_handle(),
            expect_higher: expect_higher.into_handle(),
            stake,
            claimed: false,
            target_day,
        };
        env.storage().persistent().set(&key, &prediction);
        Self::_extend_persistent(&env, &key);

        PredictionSubmitted {
            user,
            asset,
            target_day,
            stake,
        }
        .publish(&env);

        Ok(target_day)
    }

    /// Returns the stored prediction, or a zero entry if there is none
    pub fn get_user_prediction(env: Env, user: Address, asset: Asset, day: u64) -> Prediction {
        env.storage()
            .persistent()
            .get(&DataKey::Prediction(user, asset, day))
            .unwrap_or_else(|| Prediction::empty(&env))
    }

    /// Settles the caller's prediction for `(asset, day)` against the
    /// recorded price and credits encrypted points. Returns the handles
    /// granted to the caller.
    pub fn claim_reward(
        env: Env,
        user: Address,
        asset: Asset,
        day: u64,
    ) -> Result<ClaimReceipt, ContractError> {
        user.require_auth();

        let config = Self::_config(&env)?;

        let prediction_key = DataKey::Prediction(user.clone(), asset, day);
        let mut prediction: Prediction = env
            .storage()
            .persistent()
            .get(&prediction_key)
            .ok_or(ContractError::NothingToClaim)?;
        if prediction.claimed || prediction.stake == 0 {
            return Err(ContractError::NothingToClaim);
        }

        if day > clock::current_day(&env) {
            return Err(ContractError::PriceNotReady);
        }
        let price: DailyPrice = env
            .storage()
            .persistent()
            .get(&DataKey::DailyPrice(asset, day))
            .filter(|entry: &DailyPrice| entry.recorded)
            .ok_or(ContractError::PriceNotReady)?;

        let stake = u64::try_from(prediction.stake).map_err(|_| ContractError::Overflow)?;

        let points_key = DataKey::Points(user.clone());
        let points: Option<BytesN<32>> = env.storage().persistent().get(&points_key);

        let fhe = Fhe::new(&env, &config.coprocessor);
        let result = settlement::settle(
            &fhe,
            &Euint64::from_handle(price.price),
            &Euint64::from_handle(prediction.price.clone()),
            &Ebool::from_handle(prediction.expect_higher.clone()),
            stake,
            points.map(Euint64::from_handle),
        );

        env.storage()
            .persistent()
            .set(&points_key, result.total_points.handle());
        Self::_extend_persistent(&env, &points_key);

        prediction.claimed = true;
        env.storage().persistent().set(&prediction_key, &prediction);
        Self::_extend_persistent(&env, &prediction_key);

        fhe.allow(result.total_points.handle(), &user);
        fhe.allow(result.outcome.handle(), &user);
        fhe.allow(result.reward.handle(), &user);

        let receipt = ClaimReceipt {
            outcome: result.outcome.into_handle(),
            reward: result.reward.into_handle(),
            total_points: result.total_points.into_handle(),
        };

        PredictionClaimed {
            user,
            asset,
            day,
            outcome: receipt.outcome.clone(),
            reward: receipt.reward.clone(),
            total_points: receipt.total_points.clone(),
        }
        .publish(&env);

        log!(&env, "prediction claimed", asset, day);
        Ok(receipt)
    }

    /// Returns the user's encrypted points handle, zero if never claimed
    pub fn get_encrypted_points(env: Env, user: Address) -> BytesN<32> {
        env.storage()
            .persistent()
            .get(&DataKey::Points(user))
            .unwrap_or_else(|| zero_handle(&env))
    }

    fn _owner(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(ContractError::NotInitialized)
    }

    fn _config(env: &Env) -> Result<Config, ContractError> {
        let config = env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ContractError::NotInitialized)?;
        Self::_extend_instance(env);
        Ok(config)
    }

    fn _extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
    }

    fn _extend_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, BUMP_THRESHOLD, BUMP_AMOUNT);
    }
}
