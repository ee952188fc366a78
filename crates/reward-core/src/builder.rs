//! Wiring a [`RewardSubmitter`] from configuration.
//!
//! The owner account is created through a factory map keyed by
//! implementation name, so `account.primary` selects which credential source
//! is used. The connector defaults to alloy over HTTP and can be swapped.

use crate::submitter::{RewardSubmitter, SubmitterSettings};
use reward_account::{AccountError, AccountFactory, AccountService};
use reward_config::Config;
use reward_delivery::implementations::evm::alloy::AlloyConnector;
use reward_delivery::{DeliveryConnector, NonceManager};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building a submitter.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Owner credential unavailable: {0}")]
	Credential(#[source] AccountError),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Every account implementation compiled into the workspace, by name.
pub fn account_factories() -> HashMap<String, AccountFactory> {
	reward_account::get_all_implementations()
		.into_iter()
		.map(|(name, factory)| (name.to_string(), factory))
		.collect()
}

/// Builder for [`RewardSubmitter`].
pub struct RewardSubmitterBuilder {
	config: Config,
	connector: Option<Arc<dyn DeliveryConnector>>,
	nonces: Option<Arc<NonceManager>>,
}

impl RewardSubmitterBuilder {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			connector: None,
			nonces: None,
		}
	}

	/// Replaces the default alloy connector.
	pub fn with_connector(mut self, connector: Arc<dyn DeliveryConnector>) -> Self {
		self.connector = Some(connector);
		self
	}

	/// Shares a nonce manager with other submitters in the process.
	pub fn with_nonce_manager(mut self, nonces: Arc<NonceManager>) -> Self {
		self.nonces = Some(nonces);
		self
	}

	/// Creates the primary account and assembles the submitter.
	pub async fn build(
		self,
		account_factories: &HashMap<String, AccountFactory>,
	) -> Result<RewardSubmitter, BuilderError> {
		let primary = self.config.account.primary.as_str();
		let account_config = self.config.account.implementations.get(primary).ok_or_else(|| {
			BuilderError::Config(format!(
				"Primary account '{}' has no configuration table",
				primary
			))
		})?;
		let factory = account_factories.get(primary).ok_or_else(|| {
			BuilderError::MissingComponent(format!("account implementation '{}'", primary))
		})?;

		let implementation = match factory(account_config) {
			Ok(implementation) => implementation,
			Err(e) => {
				tracing::error!(
					component = "account",
					implementation = %primary,
					error = %e,
					"Failed to create account implementation"
				);
				return Err(BuilderError::Credential(e));
			},
		};
		implementation
			.config_schema()
			.validate(account_config)
			.map_err(|e| {
				BuilderError::Config(format!(
					"Invalid configuration for account implementation '{}': {}",
					primary, e
				))
			})?;
		let account = Arc::new(AccountService::new(implementation));

		let owner = account.get_address().await.map_err(BuilderError::Credential)?;
		tracing::info!(component = "account", implementation = %primary, %owner, "Loaded");

		let contract = self
			.config
			.contract
			.address()
			.map_err(|e| BuilderError::Config(e.to_string()))?;
		let default_recipient = self
			.config
			.contract
			.default_recipient()
			.map_err(|e| BuilderError::Config(e.to_string()))?;

		let settings = SubmitterSettings {
			network: self.config.network.clone(),
			contract,
			default_recipient,
			gas_limit: self.config.transaction.gas_limit,
			gas_price: u128::from(self.config.transaction.gas_price),
			token_symbol: self.config.token.symbol.clone(),
			decimals: self.config.token.decimals,
		};

		let connector = self
			.connector
			.unwrap_or_else(|| Arc::new(AlloyConnector) as Arc<dyn DeliveryConnector>);
		let nonces = self.nonces.unwrap_or_default();

		tracing::info!(
			rpc_url = %settings.network.rpc_url,
			%contract,
			gas_limit = settings.gas_limit,
			"Reward submitter ready"
		);

		Ok(RewardSubmitter::new(settings, account, connector, nonces))
	}
}
