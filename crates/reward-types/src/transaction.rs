//! Transaction hash and receipt types.

use crate::utils::with_0x_prefix;
use alloy::primitives::B256;
use std::fmt;

/// Hash of a broadcast transaction.
///
/// Always 32 bytes; rendered as a `0x`-prefixed, 66 character lowercase hex
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHash(pub B256);

impl TransactionHash {
	/// Parses a hex hash, with or without the `0x` prefix.
	pub fn parse(hex_str: &str) -> Result<Self, String> {
		let bytes = hex::decode(crate::utils::without_0x_prefix(hex_str))
			.map_err(|e| format!("Invalid transaction hash '{}': {}", hex_str, e))?;
		if bytes.len() != 32 {
			return Err(format!(
				"Invalid transaction hash '{}': expected 32 bytes, got {}",
				hex_str,
				bytes.len()
			));
		}
		Ok(Self(B256::from_slice(&bytes)))
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(self.0)))
	}
}

impl From<B256> for TransactionHash {
	fn from(hash: B256) -> Self {
		Self(hash)
	}
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
