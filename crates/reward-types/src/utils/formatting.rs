//! String formatting utilities.
//!
//! Hex prefix handling, id truncation for log fields, and rendering of
//! fixed-point token amounts.

/// Truncates an identifier for log output.
///
/// Shows only the first 8 characters followed by ".." for longer strings.
pub fn truncate_id(id: &str) -> String {
	match id.char_indices().nth(8) {
		Some((idx, _)) => format!("{}..", &id[..idx]),
		None => id.to_string(),
	}
}

/// Adds "0x" prefix to a hex string if it doesn't already have one.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Formats a raw fixed-point token amount for display.
///
/// `amount` is the on-chain integer as a decimal string; the result places
/// the decimal point `decimals` digits from the right and drops trailing
/// zeros, e.g. `"200000000000000000"` with 18 decimals becomes `"0.2"`.
pub fn format_token_amount(amount: &str, decimals: u8) -> String {
	if decimals == 0 {
		return amount.to_string();
	}

	let decimal_places = decimals as usize;

	let (integer_part, decimal_part) = if amount.len() <= decimal_places {
		let decimal_str = format!("{:0>width$}", amount, width = decimal_places);
		("0".to_string(), decimal_str)
	} else {
		let split_pos = amount.len() - decimal_places;
		(
			amount[..split_pos].to_string(),
			amount[split_pos..].to_string(),
		)
	};

	let decimal_trimmed = decimal_part.trim_end_matches('0');

	if decimal_trimmed.is_empty() {
		integer_part
	} else {
		format!("{}.{}", integer_part, decimal_trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_id() {
		assert_eq!(truncate_id("testUser"), "testUser");
		assert_eq!(truncate_id("orderTest"), "orderTes..");
		assert_eq!(truncate_id("0x097da74bd636FBC9"), "0x097da7..");
	}

	#[test]
	fn test_prefix_handling() {
		let addr = "097da74bd636fbc91c017e03bf134a884a8c3dd1";
		assert_eq!(with_0x_prefix(addr), format!("0x{}", addr));
		assert_eq!(with_0x_prefix(&format!("0x{}", addr)), format!("0x{}", addr));
		assert_eq!(without_0x_prefix(&format!("0x{}", addr)), addr);
		assert_eq!(without_0x_prefix(&format!("0X{}", addr)), addr);
		assert_eq!(without_0x_prefix(addr), addr);
	}

	#[test]
	fn test_format_token_amount() {
		assert_eq!(format_token_amount("200000000000000000", 18), "0.2");
		assert_eq!(format_token_amount("1000000000000000000", 18), "1");
		assert_eq!(format_token_amount("1500000000000000000", 18), "1.5");
		assert_eq!(format_token_amount("0", 18), "0");
		assert_eq!(format_token_amount("1", 18), "0.000000000000000001");
		assert_eq!(format_token_amount("1500000", 6), "1.5");
		assert_eq!(format_token_amount("1000", 0), "1000");
	}
}
