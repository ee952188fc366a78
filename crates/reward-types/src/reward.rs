//! Reward request and transaction types.
//!
//! A [`RewardRequest`] is what a caller hands to the submitter. Once the
//! amount has been scaled and the recipient resolved it becomes a
//! [`RewardOrder`], which together with a [`SigningContext`] and the target
//! contract forms a [`RewardTransaction`]. A transaction is built fresh for
//! every call and never mutated after it has been submitted.

use alloy::primitives::{Address, U256};

/// Caller input for a single reward.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRequest {
	/// Identifier of the rewarded user.
	pub user_id: String,
	/// Identifier of the order that earned the reward.
	pub order_id: String,
	/// Reward amount in whole tokens.
	pub amount: f64,
	/// Recipient of the reward; falls back to the configured default.
	pub recipient: Option<Address>,
}

impl RewardRequest {
	/// Creates a request that rewards the configured default recipient.
	pub fn new(user_id: impl Into<String>, order_id: impl Into<String>, amount: f64) -> Self {
		Self {
			user_id: user_id.into(),
			order_id: order_id.into(),
			amount,
			recipient: None,
		}
	}

	/// Sets an explicit recipient for the reward.
	pub fn with_recipient(mut self, recipient: Address) -> Self {
		self.recipient = Some(recipient);
		self
	}

	/// Checks the caller-supplied fields.
	///
	/// Identifiers must be non-empty and the amount must be finite and not
	/// negative. A zero amount is accepted.
	pub fn validate(&self) -> Result<(), String> {
		if self.user_id.trim().is_empty() {
			return Err("user_id cannot be empty".to_string());
		}
		if self.order_id.trim().is_empty() {
			return Err("order_id cannot be empty".to_string());
		}
		if !self.amount.is_finite() {
			return Err(format!("amount must be finite, got {}", self.amount));
		}
		if self.amount < 0.0 {
			return Err(format!("amount cannot be negative, got {}", self.amount));
		}
		Ok(())
	}
}

/// Arguments of the contract's `rewardPlaceOrder` method, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardOrder {
	pub recipient: Address,
	pub order_id: String,
	pub user_id: String,
	/// Amount scaled by the token's decimal precision.
	pub amount: U256,
}

/// Nonce and fee parameters the owner signs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningContext {
	pub nonce: u64,
	/// Native value attached to the call. Rewards never transfer native value.
	pub value: U256,
	pub gas_limit: u64,
	pub gas_price: u128,
}

impl SigningContext {
	/// Creates a context with zero transfer value.
	pub fn new(nonce: u64, gas_limit: u64, gas_price: u128) -> Self {
		Self {
			nonce,
			value: U256::ZERO,
			gas_limit,
			gas_price,
		}
	}
}

/// A fully specified reward transaction, ready to be encoded and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardTransaction {
	/// Chain id the signature is bound to.
	pub chain_id: u64,
	/// Address of the reward contract.
	pub contract: Address,
	pub order: RewardOrder,
	pub context: SigningContext,
}
