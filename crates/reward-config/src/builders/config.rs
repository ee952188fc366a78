//! Configuration builder for tests and local development.

use crate::{AccountConfig, Config, ContractConfig, TokenConfig, TransactionConfig};
use reward_types::NetworkConfig;
use std::collections::HashMap;

/// Well-known development key (first account of a default anvil node).
pub const DEV_PRIVATE_KEY: &str =
	"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Builder for creating `Config` instances with a fluent API.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	rpc_url: String,
	chain_id: Option<u64>,
	request_timeout_seconds: u64,
	contract_address: String,
	default_recipient: Option<String>,
	gas_limit: u64,
	gas_price: u64,
	decimals: u8,
	private_key: String,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a builder pointing at a local node with a development key.
	pub fn new() -> Self {
		Self {
			rpc_url: "http://localhost:8545".to_string(),
			chain_id: Some(31337),
			request_timeout_seconds: 5,
			contract_address: "0x097da74bd636FBC91c017e03BF134a884A8C3dD1".to_string(),
			default_recipient: Some("0xec6D6D84369553655fE7235c07Af8742504f8397".to_string()),
			gas_limit: 3_100_000,
			gas_price: 1_000_000_000,
			decimals: 18,
			private_key: DEV_PRIVATE_KEY.to_string(),
		}
	}

	/// Sets the node endpoint.
	pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
		self.rpc_url = rpc_url.into();
		self
	}

	/// Sets the expected chain id.
	pub fn chain_id(mut self, chain_id: Option<u64>) -> Self {
		self.chain_id = chain_id;
		self
	}

	/// Sets the contract address.
	pub fn contract_address(mut self, address: impl Into<String>) -> Self {
		self.contract_address = address.into();
		self
	}

	/// Sets the default recipient.
	pub fn default_recipient(mut self, recipient: Option<String>) -> Self {
		self.default_recipient = recipient;
		self
	}

	/// Sets the gas limit and price.
	pub fn gas(mut self, gas_limit: u64, gas_price: u64) -> Self {
		self.gas_limit = gas_limit;
		self.gas_price = gas_price;
		self
	}

	/// Sets the token decimals.
	pub fn decimals(mut self, decimals: u8) -> Self {
		self.decimals = decimals;
		self
	}

	/// Sets the owner private key used by the `local` account.
	pub fn private_key(mut self, private_key: impl Into<String>) -> Self {
		self.private_key = private_key.into();
		self
	}

	/// Builds the `Config` with the configured values.
	pub fn build(self) -> Config {
		let mut local = toml::map::Map::new();
		local.insert(
			"private_key".to_string(),
			toml::Value::String(self.private_key),
		);

		let mut implementations = HashMap::new();
		implementations.insert("local".to_string(), toml::Value::Table(local));

		Config {
			network: NetworkConfig {
				rpc_url: self.rpc_url,
				chain_id: self.chain_id,
				request_timeout_seconds: self.request_timeout_seconds,
			},
			contract: ContractConfig {
				address: self.contract_address,
				default_recipient: self.default_recipient,
			},
			transaction: TransactionConfig {
				gas_limit: self.gas_limit,
				gas_price: self.gas_price,
			},
			token: TokenConfig {
				symbol: "FADO".to_string(),
				decimals: self.decimals,
			},
			account: AccountConfig {
				primary: "local".to_string(),
				implementations,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_built_config_passes_validation() {
		let config = ConfigBuilder::new().build();
		assert!(config.validate().is_ok());
		assert_eq!(config.account.primary, "local");
		assert_eq!(config.network.chain_id, Some(31337));
	}

	#[test]
	fn test_overrides() {
		let config = ConfigBuilder::new()
			.chain_id(None)
			.default_recipient(None)
			.gas(21_000, 5)
			.decimals(6)
			.build();
		assert_eq!(config.network.chain_id, None);
		assert!(config.contract.default_recipient.is_none());
		assert_eq!(config.transaction.gas_limit, 21_000);
		assert_eq!(config.token.decimals, 6);
	}
}
