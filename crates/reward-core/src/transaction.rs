//! Deterministic encoding of reward transactions.

use crate::contract::IRewardOrder;
use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::primitives::TxKind;
use alloy::sol_types::SolCall;
use reward_types::{Bytes, RewardOrder, RewardTransaction};

/// ABI-encodes `rewardPlaceOrder(recipient, orderId, userId, rewardOrder)`.
pub fn encode_reward_call(order: &RewardOrder) -> Bytes {
	IRewardOrder::rewardPlaceOrderCall {
		recipient: order.recipient,
		_orderId: order.order_id.clone(),
		_userId: order.user_id.clone(),
		_rewardOrder: order.amount,
	}
	.abi_encode()
	.into()
}

/// Builds the unsigned legacy transaction for a reward.
///
/// The chain id is always set, so the signature follows EIP-155.
pub fn build_transaction(tx: &RewardTransaction) -> TxLegacy {
	TxLegacy {
		chain_id: Some(tx.chain_id),
		nonce: tx.context.nonce,
		gas_price: tx.context.gas_price,
		gas_limit: tx.context.gas_limit,
		to: TxKind::Call(tx.contract),
		value: tx.context.value,
		input: encode_reward_call(&tx.order),
	}
}

/// RLP preimage the owner key signs over.
pub fn signing_payload(tx: &TxLegacy) -> Vec<u8> {
	tx.encoded_for_signing()
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{keccak256, Address, U256};
	use reward_types::SigningContext;

	fn sample() -> RewardTransaction {
		RewardTransaction {
			chain_id: 242,
			contract: "0x097da74bd636FBC91c017e03BF134a884A8C3dD1".parse().unwrap(),
			order: RewardOrder {
				recipient: "0xec6D6D84369553655fE7235c07Af8742504f8397".parse().unwrap(),
				order_id: "orderTest".to_string(),
				user_id: "testUser".to_string(),
				amount: U256::from(200_000_000_000_000_000u64),
			},
			context: SigningContext::new(12, 3_100_000, 1_000_000_000),
		}
	}

	#[test]
	fn test_call_data_layout() {
		let data = encode_reward_call(&sample().order);
		assert_eq!(&data[..4], &IRewardOrder::rewardPlaceOrderCall::SELECTOR);

		let decoded = IRewardOrder::rewardPlaceOrderCall::abi_decode(&data).unwrap();
		assert_eq!(decoded._orderId, "orderTest");
		assert_eq!(decoded._userId, "testUser");
		assert_eq!(decoded._rewardOrder, U256::from(200_000_000_000_000_000u64));
		assert_eq!(decoded.recipient, sample().order.recipient);
	}

	#[test]
	fn test_transaction_fields() {
		let tx = build_transaction(&sample());
		assert_eq!(tx.chain_id, Some(242));
		assert_eq!(tx.nonce, 12);
		assert_eq!(tx.gas_limit, 3_100_000);
		assert_eq!(tx.gas_price, 1_000_000_000);
		assert_eq!(tx.value, U256::ZERO);
		assert_eq!(tx.to, TxKind::Call(sample().contract));
	}

	#[test]
	fn test_payload_is_deterministic() {
		let first = signing_payload(&build_transaction(&sample()));
		let second = signing_payload(&build_transaction(&sample()));
		assert_eq!(first, second);
		assert_eq!(keccak256(&first), build_transaction(&sample()).signature_hash());
	}

	#[test]
	fn test_payload_binds_every_field() {
		let base = signing_payload(&build_transaction(&sample()));

		let mut other = sample();
		other.context.nonce += 1;
		assert_ne!(signing_payload(&build_transaction(&other)), base);

		let mut other = sample();
		other.chain_id = 1;
		assert_ne!(signing_payload(&build_transaction(&other)), base);

		let mut other = sample();
		other.order.recipient = Address::ZERO;
		assert_ne!(signing_payload(&build_transaction(&other)), base);
	}
}
