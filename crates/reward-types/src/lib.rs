//! Common types module for the reward submitter.
//!
//! This module defines the data types shared by the configuration, account,
//! delivery and core crates, so that every component agrees on how a reward
//! request, its signing context and the resulting transaction look.

/// Network connection settings for the chain node.
pub mod networks;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Reward request, order and transaction types.
pub mod reward;
/// Zeroizing string wrapper for key material.
pub mod secret_string;
/// Transaction hash and receipt types.
pub mod transaction;
/// Utility functions for amount conversion and hex formatting.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use networks::NetworkConfig;
pub use registry::ImplementationRegistry;
pub use reward::*;
pub use secret_string::SecretString;
pub use transaction::*;
pub use utils::{
	format_token_amount, from_fixed_point, parse_address, to_fixed_point, truncate_id,
	with_0x_prefix, without_0x_prefix, ConversionError,
};
pub use validation::*;

pub use alloy::primitives::{Address, Bytes, U256};
