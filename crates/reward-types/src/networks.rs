//! Network configuration for the chain node the submitter talks to.

use serde::{Deserialize, Serialize};

/// Configuration for the chain node endpoint.
///
/// # Fields
///
/// * `rpc_url` - The HTTP(S) JSON-RPC endpoint of the node
/// * `chain_id` - Expected chain id; when unset the id reported by the node is used
/// * `request_timeout_seconds` - Deadline applied to every RPC request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
	pub rpc_url: String,
	#[serde(default)]
	pub chain_id: Option<u64>,
	#[serde(default = "default_request_timeout_seconds")]
	pub request_timeout_seconds: u64,
}

/// Returns the default RPC request deadline of 30 seconds.
fn default_request_timeout_seconds() -> u64 {
	30
}

impl NetworkConfig {
	/// Creates a network configuration with the default request timeout.
	pub fn new(rpc_url: impl Into<String>) -> Self {
		Self {
			rpc_url: rpc_url.into(),
			chain_id: None,
			request_timeout_seconds: default_request_timeout_seconds(),
		}
	}

	/// Returns the per-request deadline as a `Duration`.
	pub fn request_timeout(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.request_timeout_seconds)
	}
}
