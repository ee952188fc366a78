//! Utility functions for amount conversion and string formatting.

pub mod conversion;
pub mod formatting;

pub use conversion::{from_fixed_point, parse_address, to_fixed_point, ConversionError};
pub use formatting::{format_token_amount, truncate_id, with_0x_prefix, without_0x_prefix};
