//! Local key account implementation.
//!
//! The owner key is given directly in the `[account.implementations.local]`
//! table. In practice the value is an interpolated environment variable
//! (`private_key = "${REWARD_OWNER_PRIVATE_KEY}"`), so the key never has to
//! live in a file.

use crate::{AccountError, AccountInterface};
use alloy::consensus::{SignableTransaction, Signed, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use reward_types::{
	without_0x_prefix, Address, ConfigSchema, Field, FieldType, Schema, SecretString,
	ValidationError,
};

/// Account backed by an in-memory secp256k1 key.
pub struct LocalAccount {
	signer: PrivateKeySigner,
}

impl LocalAccount {
	/// Creates an account from a hex private key, with or without `0x`.
	pub fn new(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer = private_key
			.with_exposed(|key| without_0x_prefix(key.trim()).parse::<PrivateKeySigner>())
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key format: {}", e)))?;

		tracing::debug!(address = %signer.address(), "Loaded owner key");

		Ok(Self { signer })
	}
}

/// Configuration schema for the local account.
pub struct LocalAccountSchema;

impl LocalAccountSchema {
	/// Static validation method for use before instance creation
	pub fn validate_config(config: &toml::Value) -> Result<(), ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for LocalAccountSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("private_key", FieldType::String).with_validator(|value| {
					let key = value.as_str().unwrap_or_default().trim();
					let key = without_0x_prefix(key);
					if key.len() != 64 {
						return Err("Private key must be 64 hex characters".to_string());
					}
					if !key.chars().all(|c| c.is_ascii_hexdigit()) {
						return Err("Private key must be hex encoded".to_string());
					}
					Ok(())
				}),
			],
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl AccountInterface for LocalAccount {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalAccountSchema)
	}

	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	async fn sign_transaction(&self, mut tx: TxLegacy) -> Result<Signed<TxLegacy>, AccountError> {
		let signature = self
			.signer
			.sign_transaction_sync(&mut tx)
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?;

		Ok(tx.into_signed(signature))
	}
}

/// Factory function to create a local account from configuration.
///
/// Configuration parameters:
/// - `private_key`: 32-byte hex key, optionally `0x`-prefixed
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	// Validation messages never include the key itself
	LocalAccountSchema::validate_config(config)
		.map_err(|e| AccountError::InvalidKey(format!("Invalid configuration: {}", e)))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.map(SecretString::from)
		.ok_or_else(|| AccountError::InvalidKey("private_key is required".to_string()))?;

	Ok(Box::new(LocalAccount::new(&private_key)?))
}

/// Registry for the local account implementation.
pub struct Registry;

impl reward_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Bytes, TxKind, U256};

	// Well-known development key (anvil account 0)
	const TEST_PRIVATE_KEY: &str =
		"ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

	fn key_config(key: &str) -> toml::Value {
		let mut map = toml::map::Map::new();
		map.insert("private_key".to_string(), toml::Value::String(key.to_string()));
		toml::Value::Table(map)
	}

	fn sample_tx() -> TxLegacy {
		TxLegacy {
			chain_id: Some(31337),
			nonce: 3,
			gas_price: 1_000_000_000,
			gas_limit: 3_100_000,
			to: TxKind::Call(Address::repeat_byte(0x11)),
			value: U256::ZERO,
			input: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
		}
	}

	#[tokio::test]
	async fn test_address_derivation() {
		for key in [TEST_PRIVATE_KEY.to_string(), format!("0x{}", TEST_PRIVATE_KEY)] {
			let account = create_account(&key_config(&key)).unwrap();
			let address = account.address().await.unwrap();
			assert_eq!(address.to_string().to_lowercase(), TEST_ADDRESS);
		}
	}

	#[tokio::test]
	async fn test_signature_recovers_owner() {
		let account = LocalAccount::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		let signed = account.sign_transaction(sample_tx()).await.unwrap();

		let signer = signed.recover_signer().unwrap();
		assert_eq!(signer, account.address().await.unwrap());
		assert_eq!(signed.tx().nonce, 3);
	}

	#[tokio::test]
	async fn test_signing_is_deterministic() {
		let account = LocalAccount::new(&SecretString::from(TEST_PRIVATE_KEY)).unwrap();
		let first = account.sign_transaction(sample_tx()).await.unwrap();
		let second = account.sign_transaction(sample_tx()).await.unwrap();
		assert_eq!(first.hash(), second.hash());
	}

	#[test]
	fn test_invalid_keys_rejected() {
		let err = create_account(&key_config("0x1234")).err().unwrap();
		assert!(err.to_string().contains("64 hex characters"));

		let not_hex = format!("0x{}", "zz".repeat(32));
		let err = create_account(&key_config(&not_hex)).err().unwrap();
		assert!(err.to_string().contains("hex encoded"));

		let err = create_account(&toml::Value::Table(toml::map::Map::new()))
			.err()
			.unwrap();
		assert!(err.to_string().contains("private_key"));
	}

	#[test]
	fn test_error_does_not_leak_key() {
		let bad_key = format!("0x{}", "g".repeat(64));
		let err = create_account(&key_config(&bad_key)).err().unwrap();
		assert!(!err.to_string().contains(&"g".repeat(64)));
	}
}
