//! Configuration module for the reward submitter.
//!
//! Configuration is read from a TOML file. Any value may reference the
//! environment with `${VAR_NAME}` or `${VAR_NAME:-default}`, which is how the
//! owner key is normally injected:
//!
//! ```toml
//! [network]
//! rpc_url = "https://dev-1.kardiachain.io"
//!
//! [contract]
//! address = "0x097da74bd636FBC91c017e03BF134a884A8C3dD1"
//!
//! [account]
//! primary = "local"
//! [account.implementations.local]
//! private_key = "${REWARD_OWNER_PRIVATE_KEY}"
//! ```

#[cfg(any(test, feature = "testing"))]
pub mod builders;

use regex::Regex;
use reward_types::{parse_address, Address, ConversionError, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

impl From<ConversionError> for ConfigError {
	fn from(err: ConversionError) -> Self {
		ConfigError::Validation(err.to_string())
	}
}

/// Main configuration structure for the reward submitter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Chain node endpoint.
	pub network: NetworkConfig,
	/// Reward contract location and default recipient.
	pub contract: ContractConfig,
	/// Gas parameters for reward transactions.
	#[serde(default)]
	pub transaction: TransactionConfig,
	/// Reward token precision.
	#[serde(default)]
	pub token: TokenConfig,
	/// Owner credential sources.
	pub account: AccountConfig,
}

/// Location of the reward contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractConfig {
	/// Address of the deployed reward contract.
	pub address: String,
	/// Recipient used when a request does not name one.
	#[serde(default)]
	pub default_recipient: Option<String>,
}

impl ContractConfig {
	/// Returns the parsed contract address.
	pub fn address(&self) -> Result<Address, ConversionError> {
		parse_address(&self.address)
	}

	/// Returns the parsed default recipient, if configured.
	pub fn default_recipient(&self) -> Result<Option<Address>, ConversionError> {
		self.default_recipient
			.as_deref()
			.map(parse_address)
			.transpose()
	}
}

/// Fixed gas parameters attached to every reward transaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionConfig {
	/// Gas limit in units. Defaults to 3,100,000.
	#[serde(default = "default_gas_limit")]
	pub gas_limit: u64,
	/// Gas price in wei. Defaults to 1 gwei.
	#[serde(default = "default_gas_price")]
	pub gas_price: u64,
}

impl Default for TransactionConfig {
	fn default() -> Self {
		Self {
			gas_limit: default_gas_limit(),
			gas_price: default_gas_price(),
		}
	}
}

fn default_gas_limit() -> u64 {
	3_100_000
}

fn default_gas_price() -> u64 {
	1_000_000_000
}

/// Reward token description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
	/// Token symbol, used in log output only.
	#[serde(default = "default_token_symbol")]
	pub symbol: String,
	/// Decimal precision of the token. Defaults to 18.
	#[serde(default = "default_token_decimals")]
	pub decimals: u8,
}

impl Default for TokenConfig {
	fn default() -> Self {
		Self {
			symbol: default_token_symbol(),
			decimals: default_token_decimals(),
		}
	}
}

fn default_token_symbol() -> String {
	"FADO".to_string()
}

fn default_token_decimals() -> u8 {
	18
}

/// Configuration for account management.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Which implementation signs reward transactions.
	pub primary: String,
	/// Map of account implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}. Placeholders in
/// TOML comments are left untouched.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	for line in input.split_inclusive('\n') {
		let (code, comment) = split_comment(line);
		let mut last_end = 0;

		for cap in re.captures_iter(code) {
			let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
				continue;
			};
			let default_value = cap.get(2).map(|m| m.as_str());

			let value = match std::env::var(var_name.as_str()) {
				Ok(v) => v,
				Err(_) => match default_value {
					Some(default) => default.to_string(),
					None => {
						return Err(ConfigError::Validation(format!(
							"Environment variable '{}' not found",
							var_name.as_str()
						)));
					},
				},
			};

			result.push_str(&code[last_end..full_match.start()]);
			result.push_str(&value);
			last_end = full_match.end();
		}
		result.push_str(&code[last_end..]);
		result.push_str(comment);
	}

	Ok(result)
}

/// Splits a line at the first `#` that is not inside a quoted string.
fn split_comment(line: &str) -> (&str, &str) {
	let mut quote: Option<char> = None;
	let mut escaped = false;

	for (idx, ch) in line.char_indices() {
		match quote {
			// Only basic strings honor backslash escapes.
			Some('"') if escaped => escaped = false,
			Some('"') if ch == '\\' => escaped = true,
			Some(q) if ch == q => quote = None,
			Some(_) => {},
			None if ch == '"' || ch == '\'' => quote = Some(ch),
			None if ch == '#' => return line.split_at(idx),
			None => {},
		}
	}

	(line, "")
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	fn validate(&self) -> Result<(), ConfigError> {
		// Validate network config
		let rpc_url = self.network.rpc_url.trim();
		if rpc_url.is_empty() {
			return Err(ConfigError::Validation("network.rpc_url cannot be empty".into()));
		}
		if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"network.rpc_url must be an http(s) URL, got '{}'",
				rpc_url
			)));
		}
		if self.network.chain_id == Some(0) {
			return Err(ConfigError::Validation(
				"network.chain_id must be greater than 0".into(),
			));
		}
		if self.network.request_timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"network.request_timeout_seconds must be greater than 0".into(),
			));
		}
		if self.network.request_timeout_seconds > 300 {
			return Err(ConfigError::Validation(
				"network.request_timeout_seconds cannot exceed 300".into(),
			));
		}

		// Validate contract config
		self.contract.address()?;
		self.contract.default_recipient()?;

		// Validate gas parameters; 21000 is the intrinsic cost of any transaction
		if self.transaction.gas_limit < 21_000 {
			return Err(ConfigError::Validation(format!(
				"transaction.gas_limit must be at least 21000, got {}",
				self.transaction.gas_limit
			)));
		}
		if self.transaction.gas_price == 0 {
			return Err(ConfigError::Validation(
				"transaction.gas_price must be greater than 0".into(),
			));
		}

		// 10^77 is the largest power of ten below 2^256
		if self.token.decimals > 77 {
			return Err(ConfigError::Validation(format!(
				"token.decimals cannot exceed 77, got {}",
				self.token.decimals
			)));
		}

		// Validate account config
		if self.account.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one account implementation must be configured".into(),
			));
		}
		if self.account.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Account primary implementation cannot be empty".into(),
			));
		}
		if !self
			.account
			.implementations
			.contains_key(&self.account.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary account '{}' not found in implementations",
				self.account.primary
			)));
		}

		Ok(())
	}
}

/// Parses a configuration from TOML text.
///
/// Environment variables are resolved first and the result is validated.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
