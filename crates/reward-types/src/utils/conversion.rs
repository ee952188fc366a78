//! Conversions between human-facing values and their on-chain form.
//!
//! Reward amounts arrive as `f64` token quantities and are sent to the
//! contract as `uint256` integers scaled by `10^decimals`. The scaling is done
//! on the shortest decimal representation of the float rather than with float
//! multiplication, so `0.2` becomes exactly `200000000000000000` with 18
//! decimals. Digits below the smallest unit are truncated.

use super::formatting::format_token_amount;
use alloy::primitives::{Address, U256};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while converting amounts or addresses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
	/// The amount is negative, NaN or infinite.
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),
	/// The scaled amount does not fit into a `uint256`.
	#[error("Amount {0} overflows uint256 with {1} decimals")]
	Overflow(String, u8),
	/// The string is not a 20-byte hex address.
	#[error("Invalid address '{0}': {1}")]
	InvalidAddress(String, String),
}

/// Scales a token amount to its fixed-point integer representation.
///
/// Returns `amount × 10^decimals`, truncated toward zero.
pub fn to_fixed_point(amount: f64, decimals: u8) -> Result<U256, ConversionError> {
	if !amount.is_finite() || amount < 0.0 {
		return Err(ConversionError::InvalidAmount(amount.to_string()));
	}
	if amount == 0.0 {
		return Ok(U256::ZERO);
	}

	// `Display` for f64 is the shortest round-trip form and never uses an exponent
	let repr = amount.to_string();
	let (integer_part, fraction_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

	let decimal_places = decimals as usize;
	let mut digits = String::with_capacity(integer_part.len() + decimal_places);
	digits.push_str(integer_part);
	digits.extend(fraction_part.chars().take(decimal_places));
	for _ in fraction_part.len()..decimal_places {
		digits.push('0');
	}

	let digits = digits.trim_start_matches('0');
	if digits.is_empty() {
		return Ok(U256::ZERO);
	}

	U256::from_str_radix(digits, 10).map_err(|_| ConversionError::Overflow(repr, decimals))
}

/// Renders a fixed-point integer back as a decimal token amount.
pub fn from_fixed_point(value: U256, decimals: u8) -> String {
	format_token_amount(&value.to_string(), decimals)
}

/// Parses a hex address, with or without the `0x` prefix.
pub fn parse_address(value: &str) -> Result<Address, ConversionError> {
	Address::from_str(value.trim())
		.map_err(|e| ConversionError::InvalidAddress(value.to_string(), e.to_string()))
}
