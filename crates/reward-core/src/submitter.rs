//! Reward submission flow.
//!
//! A submission opens its own connection, resolves the owner's nonce under
//! the shared [`NonceManager`], builds and signs a legacy transaction calling
//! `rewardPlaceOrder` and broadcasts it once. Nothing is retried here.

use crate::contract::IRewardOrder;
use crate::error::SubmitError;
use crate::transaction::build_transaction;
use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::sol_types::SolCall;
use reward_account::AccountService;
use reward_delivery::{DeliveryConnector, NonceManager};
use reward_types::{
	to_fixed_point, truncate_id, Address, NetworkConfig, RewardOrder, RewardRequest,
	RewardTransaction, SigningContext, TransactionHash, TransactionReceipt, U256,
};
use std::sync::Arc;
use tracing::instrument;

/// Static parameters of every reward transaction.
#[derive(Debug, Clone)]
pub struct SubmitterSettings {
	pub network: NetworkConfig,
	pub contract: Address,
	pub default_recipient: Option<Address>,
	pub gas_limit: u64,
	pub gas_price: u128,
	pub token_symbol: String,
	pub decimals: u8,
}

/// Submits reward transactions on behalf of the contract owner.
pub struct RewardSubmitter {
	settings: SubmitterSettings,
	account: Arc<AccountService>,
	connector: Arc<dyn DeliveryConnector>,
	nonces: Arc<NonceManager>,
}

impl RewardSubmitter {
	pub fn new(
		settings: SubmitterSettings,
		account: Arc<AccountService>,
		connector: Arc<dyn DeliveryConnector>,
		nonces: Arc<NonceManager>,
	) -> Self {
		Self {
			settings,
			account,
			connector,
			nonces,
		}
	}

	pub fn settings(&self) -> &SubmitterSettings {
		&self.settings
	}

	/// Rewards `request.user_id` for `request.order_id`.
	///
	/// Returns the hash of the broadcast transaction. The transaction is not
	/// awaited; use [`receipt`](Self::receipt) to follow it.
	#[instrument(skip_all, fields(user_id = %truncate_id(&request.user_id), order_id = %truncate_id(&request.order_id)))]
	pub async fn submit(&self, request: RewardRequest) -> Result<TransactionHash, SubmitError> {
		request.validate().map_err(SubmitError::InvalidRequest)?;
		let recipient = request
			.recipient
			.or(self.settings.default_recipient)
			.ok_or_else(|| {
				SubmitError::InvalidRequest(
					"no recipient given and no default recipient configured".to_string(),
				)
			})?;

		let delivery = self
			.connector
			.connect(&self.settings.network)
			.await
			.map_err(SubmitError::Connection)?;

		let owner = self
			.account
			.get_address()
			.await
			.map_err(SubmitError::Credential)?;

		// Held until the broadcast settles
		let slot = self.nonces.lock(owner).await;
		let chain_count = delivery
			.get_nonce(owner)
			.await
			.map_err(SubmitError::NonceQuery)?;
		let nonce = slot.reconcile(chain_count);

		let amount = to_fixed_point(request.amount, self.settings.decimals)?;

		let transaction = RewardTransaction {
			chain_id: delivery.chain_id(),
			contract: self.settings.contract,
			order: RewardOrder {
				recipient,
				order_id: request.order_id,
				user_id: request.user_id,
				amount,
			},
			context: SigningContext::new(nonce, self.settings.gas_limit, self.settings.gas_price),
		};

		tracing::debug!(
			nonce,
			chain_count,
			%recipient,
			amount = %amount,
			"Built reward transaction"
		);

		let signed = match self.account.sign(build_transaction(&transaction)).await {
			Ok(signed) => signed,
			Err(e) => {
				slot.invalidate();
				return Err(SubmitError::Submission(format!("signing failed: {}", e)));
			},
		};
		let raw = TxEnvelope::from(signed).encoded_2718();

		match delivery.submit_raw(raw.into()).await {
			Ok(tx_hash) => {
				slot.commit(nonce);
				tracing::info!(
					tx_hash = %tx_hash,
					nonce,
					chain_id = transaction.chain_id,
					"Reward submitted"
				);
				Ok(tx_hash)
			},
			Err(e) => {
				slot.invalidate();
				tracing::warn!(nonce, error = %e, "Reward broadcast failed");
				Err(SubmitError::Submission(e.to_string()))
			},
		}
	}

	/// Total reward recorded on-chain for a user, in the token's smallest unit.
	#[instrument(skip_all, fields(user_id = %truncate_id(user_id)))]
	pub async fn total_reward_of_user(&self, user_id: &str) -> Result<U256, SubmitError> {
		if user_id.trim().is_empty() {
			return Err(SubmitError::InvalidRequest("user_id cannot be empty".to_string()));
		}

		let delivery = self
			.connector
			.connect(&self.settings.network)
			.await
			.map_err(SubmitError::Connection)?;

		let data = IRewardOrder::getTotalRewardOfUserCall {
			_userId: user_id.to_string(),
		}
		.abi_encode();

		let output = delivery
			.call(self.settings.contract, data.into())
			.await
			.map_err(SubmitError::Connection)?;

		IRewardOrder::getTotalRewardOfUserCall::abi_decode_returns(&output).map_err(|e| {
			SubmitError::Encoding(format!(
				"getTotalRewardOfUser returned {} bytes: {}",
				output.len(),
				e
			))
		})
	}

	/// Receipt of a previously submitted transaction, `None` while pending.
	pub async fn receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, SubmitError> {
		let delivery = self
			.connector
			.connect(&self.settings.network)
			.await
			.map_err(SubmitError::Connection)?;

		delivery
			.get_receipt(hash)
			.await
			.map_err(SubmitError::Connection)
	}
}
