//! Transaction delivery for the reward submitter.
//!
//! This crate owns everything that talks to the chain node: opening a
//! connection, querying the owner's pending nonce, broadcasting raw signed
//! transactions, read-only contract calls and receipt lookups. It also hosts
//! the [`NonceManager`] that serialises nonce allocation per owner.

use async_trait::async_trait;
use reward_types::{Address, Bytes, NetworkConfig, TransactionHash, TransactionReceipt};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub mod nonce;

pub use nonce::{NonceGuard, NonceManager};

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs when the node cannot be reached or identified.
	#[error("Connection error: {0}")]
	Connection(String),
	/// Error that occurs when the node serves a different chain than configured.
	#[error("Chain id mismatch: expected {expected}, node reports {actual}")]
	ChainMismatch { expected: u64, actual: u64 },
	/// Error that occurs during an RPC request.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when an RPC request exceeds its deadline.
	#[error("{operation} timed out after {seconds}s")]
	Timeout {
		operation: &'static str,
		seconds: u64,
	},
}

/// Opens connections to a chain node.
///
/// A connector is held for the lifetime of the submitter; each submission
/// asks it for a fresh [`DeliveryInterface`].
#[async_trait]
pub trait DeliveryConnector: Send + Sync {
	/// Connects to the node described by `network`.
	///
	/// Implementations must confirm the node is reachable by querying its
	/// chain id, and must reject the connection when `network.chain_id` is
	/// set and differs from the id the node reports.
	async fn connect(
		&self,
		network: &NetworkConfig,
	) -> Result<Box<dyn DeliveryInterface>, DeliveryError>;
}

/// Trait defining the RPC operations the submitter needs from a connection.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Chain id reported by the node when the connection was opened.
	fn chain_id(&self) -> u64;

	/// Gets the pending transaction count for an address.
	///
	/// Pending rather than latest, so transactions still in the mempool are
	/// counted.
	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError>;

	/// Broadcasts an EIP-2718 encoded signed transaction.
	async fn submit_raw(&self, raw: Bytes) -> Result<TransactionHash, DeliveryError>;

	/// Executes a read-only call against `to` and returns the raw output.
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DeliveryError>;

	/// Retrieves the receipt for a transaction, `None` while it is not mined.
	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<TransactionReceipt>, DeliveryError>;
}
