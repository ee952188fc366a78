//! Alloy-based HTTP delivery.
//!
//! Every request goes through [`with_deadline`], so a stalled node surfaces
//! as [`DeliveryError::Timeout`] instead of hanging the submission.

use crate::{DeliveryConnector, DeliveryError, DeliveryInterface};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use reward_types::{Address, Bytes, NetworkConfig, TransactionHash, TransactionReceipt};
use std::future::IntoFuture;
use std::time::Duration;

/// Runs an RPC request under `deadline`.
async fn with_deadline<F, T, E>(
	operation: &'static str,
	deadline: Duration,
	request: F,
) -> Result<T, DeliveryError>
where
	F: IntoFuture<Output = Result<T, E>>,
	E: std::fmt::Display,
{
	match tokio::time::timeout(deadline, request).await {
		Ok(Ok(value)) => Ok(value),
		Ok(Err(e)) => Err(DeliveryError::Network(format!("{} failed: {}", operation, e))),
		Err(_) => {
			tracing::warn!(operation, seconds = deadline.as_secs(), "RPC timeout");
			Err(DeliveryError::Timeout {
				operation,
				seconds: deadline.as_secs(),
			})
		},
	}
}

/// Connector that opens alloy HTTP providers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlloyConnector;

#[async_trait]
impl DeliveryConnector for AlloyConnector {
	async fn connect(
		&self,
		network: &NetworkConfig,
	) -> Result<Box<dyn DeliveryInterface>, DeliveryError> {
		Ok(Box::new(AlloyDelivery::connect(network).await?))
	}
}

/// A live connection to one EVM node.
pub struct AlloyDelivery {
	provider: DynProvider,
	chain_id: u64,
	timeout: Duration,
}

impl AlloyDelivery {
	/// Opens a provider for `network.rpc_url` and checks the chain id.
	pub async fn connect(network: &NetworkConfig) -> Result<Self, DeliveryError> {
		let timeout = network.request_timeout();

		let provider = with_deadline(
			"connect",
			timeout,
			ProviderBuilder::new().connect(&network.rpc_url),
		)
		.await
		.map_err(|e| DeliveryError::Connection(format!("{}: {}", network.rpc_url, e)))?
		.erased();

		let chain_id = with_deadline("eth_chainId", timeout, provider.get_chain_id())
			.await
			.map_err(|e| match e {
				DeliveryError::Network(msg) => DeliveryError::Connection(msg),
				other => other,
			})?;

		if let Some(expected) = network.chain_id {
			if expected != chain_id {
				return Err(DeliveryError::ChainMismatch {
					expected,
					actual: chain_id,
				});
			}
		}

		tracing::debug!(rpc_url = %network.rpc_url, chain_id, "Connected to node");

		Ok(Self {
			provider,
			chain_id,
			timeout,
		})
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError> {
		with_deadline(
			"eth_getTransactionCount",
			self.timeout,
			self.provider.get_transaction_count(address).pending(),
		)
		.await
	}

	async fn submit_raw(&self, raw: Bytes) -> Result<TransactionHash, DeliveryError> {
		let pending = with_deadline(
			"eth_sendRawTransaction",
			self.timeout,
			self.provider.send_raw_transaction(&raw),
		)
		.await?;

		let tx_hash = TransactionHash(*pending.tx_hash());
		tracing::debug!(tx_hash = %tx_hash, chain_id = self.chain_id, "Submitted transaction");

		Ok(tx_hash)
	}

	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DeliveryError> {
		let request = TransactionRequest::default().to(to).input(data.into());
		with_deadline("eth_call", self.timeout, self.provider.call(request)).await
	}

	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, DeliveryError> {
		let receipt = with_deadline(
			"eth_getTransactionReceipt",
			self.timeout,
			self.provider.get_transaction_receipt(hash.0),
		)
		.await?;

		Ok(receipt.map(|receipt| TransactionReceipt {
			hash: TransactionHash(receipt.transaction_hash),
			block_number: receipt.block_number.unwrap_or(0),
			success: receipt.status(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_deadline_maps_elapsed_to_timeout() {
		let slow = async {
			tokio::time::sleep(Duration::from_secs(5)).await;
			Ok::<u64, String>(1)
		};
		let err = with_deadline("eth_chainId", Duration::from_millis(10), slow)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			DeliveryError::Timeout {
				operation: "eth_chainId",
				..
			}
		));
	}

	#[tokio::test]
	async fn test_deadline_wraps_request_errors() {
		let failing = async { Err::<u64, String>("connection refused".to_string()) };
		let err = with_deadline("eth_call", Duration::from_secs(1), failing)
			.await
			.unwrap_err();
		assert_eq!(err.to_string(), "Network error: eth_call failed: connection refused");
	}

	#[tokio::test]
	async fn test_unreachable_node_is_connection_error() {
		let mut network = NetworkConfig::new("http://127.0.0.1:1");
		network.request_timeout_seconds = 2;

		let result = AlloyConnector.connect(&network).await;
		match result {
			Err(DeliveryError::Connection(_)) | Err(DeliveryError::Timeout { .. }) => {},
			Err(other) => panic!("unexpected error: {}", other),
			Ok(_) => panic!("connected to a closed port"),
		}
	}

	#[tokio::test]
	async fn test_malformed_url_is_connection_error() {
		let network = NetworkConfig::new("not a url");
		let result = AlloyConnector.connect(&network).await;
		assert!(matches!(result, Err(DeliveryError::Connection(_))));
	}
}
