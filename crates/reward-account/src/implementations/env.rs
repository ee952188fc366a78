//! Environment-injected account implementation.
//!
//! Reads the owner key from a named environment variable when the account is
//! created, so deployments can hand the key over through their secret
//! manager without it ever passing through the configuration file.

use crate::implementations::local::LocalAccount;
use crate::{AccountError, AccountInterface};
use alloy::consensus::{Signed, TxLegacy};
use async_trait::async_trait;
use reward_types::{Address, ConfigSchema, Field, FieldType, Schema, SecretString, ValidationError};

/// Variable read when the configuration does not name one.
pub const DEFAULT_KEY_VARIABLE: &str = "REWARD_OWNER_PRIVATE_KEY";

/// Account whose key is sourced from the process environment.
pub struct EnvAccount {
	variable: String,
	inner: LocalAccount,
}

impl EnvAccount {
	/// Loads the key from `variable`.
	pub fn from_variable(variable: &str) -> Result<Self, AccountError> {
		let private_key = SecretString::from_env(variable).ok_or_else(|| {
			AccountError::InvalidKey(format!("Environment variable {} not set", variable))
		})?;

		let inner = LocalAccount::new(&private_key).map_err(|e| match e {
			AccountError::InvalidKey(msg) => {
				AccountError::InvalidKey(format!("{} (from {})", msg, variable))
			},
			other => other,
		})?;

		Ok(Self {
			variable: variable.to_string(),
			inner,
		})
	}

	/// Name of the variable the key was read from.
	pub fn variable(&self) -> &str {
		&self.variable
	}
}

/// Configuration schema for the environment account.
pub struct EnvAccountSchema;

impl ConfigSchema for EnvAccountSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![Field::new("variable", FieldType::String).with_validator(|value| {
				let name = value.as_str().unwrap_or_default();
				let valid = !name.is_empty()
					&& name
						.chars()
						.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
				if valid {
					Ok(())
				} else {
					Err(format!("'{}' is not a valid environment variable name", name))
				}
			})],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl AccountInterface for EnvAccount {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(EnvAccountSchema)
	}

	async fn address(&self) -> Result<Address, AccountError> {
		self.inner.address().await
	}

	async fn sign_transaction(&self, tx: TxLegacy) -> Result<Signed<TxLegacy>, AccountError> {
		self.inner.sign_transaction(tx).await
	}
}

/// Factory function to create an environment-backed account.
///
/// Configuration parameters:
/// - `variable` (optional): variable holding the key, defaults to
///   `REWARD_OWNER_PRIVATE_KEY`
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	EnvAccountSchema
		.validate(config)
		.map_err(|e| AccountError::Implementation(format!("Invalid configuration: {}", e)))?;

	let variable = config
		.get("variable")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_KEY_VARIABLE);

	let account = EnvAccount::from_variable(variable)?;
	tracing::info!(variable = %account.variable(), "Owner key loaded from environment");

	Ok(Box::new(account))
}

/// Registry for the environment account implementation.
pub struct Registry;

impl reward_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "env";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_PRIVATE_KEY: &str =
		"0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

	fn variable_config(name: &str) -> toml::Value {
		let mut map = toml::map::Map::new();
		map.insert("variable".to_string(), toml::Value::String(name.to_string()));
		toml::Value::Table(map)
	}

	#[tokio::test]
	async fn test_key_from_named_variable() {
		std::env::set_var("ENV_ACCOUNT_TEST_KEY", TEST_PRIVATE_KEY);

		let account = create_account(&variable_config("ENV_ACCOUNT_TEST_KEY")).unwrap();
		let address = account.address().await.unwrap();
		// anvil account 1
		assert_eq!(
			address.to_string().to_lowercase(),
			"0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
		);

		std::env::remove_var("ENV_ACCOUNT_TEST_KEY");
	}

	#[test]
	fn test_missing_variable() {
		let err = create_account(&variable_config("ENV_ACCOUNT_UNSET_KEY"))
			.err()
			.unwrap();
		assert!(matches!(err, AccountError::InvalidKey(_)));
		assert!(err.to_string().contains("ENV_ACCOUNT_UNSET_KEY not set"));
	}

	#[test]
	fn test_malformed_variable_value() {
		std::env::set_var("ENV_ACCOUNT_BAD_KEY", "0xnothex");
		let err = create_account(&variable_config("ENV_ACCOUNT_BAD_KEY"))
			.err()
			.unwrap();
		assert!(err.to_string().contains("from ENV_ACCOUNT_BAD_KEY"));
		std::env::remove_var("ENV_ACCOUNT_BAD_KEY");
	}

	#[test]
	fn test_invalid_variable_name() {
		let err = create_account(&variable_config("lower-case")).err().unwrap();
		assert!(matches!(err, AccountError::Implementation(_)));
	}
}
