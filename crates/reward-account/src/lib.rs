//! Account management for the reward submitter.
//!
//! The reward contract only accepts `rewardPlaceOrder` from its owner, so
//! every transaction is signed by the owner account. This crate defines the
//! interface an owner credential source must provide and the service that
//! wraps the configured source.

use alloy::consensus::{Signed, TxLegacy};
use async_trait::async_trait;
use reward_types::{Address, ConfigSchema, ImplementationRegistry};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod env;
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when the implementation cannot be configured.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for owner credential sources.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// Returns the configuration schema for this account implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the on-chain address derived from the account's public key.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs a legacy transaction, returning it together with its signature.
	///
	/// The chain id carried by the transaction is included in the signature
	/// (EIP-155), binding it to a single network.
	async fn sign_transaction(&self, tx: TxLegacy) -> Result<Signed<TxLegacy>, AccountError>;
}

/// Type alias for account factory functions.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Registry trait for account implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered account implementations.
///
/// Returns a vector of (name, factory) tuples used to populate the factory map
/// the submitter builder resolves `account.primary` against.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::{env, local};

	vec![
		(local::Registry::NAME, local::Registry::factory()),
		(env::Registry::NAME, env::Registry::factory()),
	]
}

/// Service that manages the owner account.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the owner address.
	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.implementation.address().await
	}

	/// Signs a transaction with the owner key.
	pub async fn sign(&self, tx: TxLegacy) -> Result<Signed<TxLegacy>, AccountError> {
		self.implementation.sign_transaction(tx).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_all_implementations_registered() {
		let names: Vec<&str> = get_all_implementations()
			.into_iter()
			.map(|(name, _)| name)
			.collect();
		assert_eq!(names, vec!["local", "env"]);
	}

	#[tokio::test]
	async fn test_service_delegates_to_implementation() {
		let mut config = toml::map::Map::new();
		config.insert(
			"private_key".to_string(),
			toml::Value::String(
				"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
			),
		);
		let account = implementations::local::create_account(&toml::Value::Table(config)).unwrap();
		let service = AccountService::new(account);

		let address = service.get_address().await.unwrap();
		assert_eq!(
			address.to_string().to_lowercase(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}
}
