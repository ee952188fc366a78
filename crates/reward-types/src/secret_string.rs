//! Secure string type for owner key material.
//!
//! `SecretString` wraps the hex-encoded private key that signs reward
//! transactions. The buffer is zeroed when dropped and the value never shows
//! up in `Debug`, `Display` or serialized output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string that zeroes its memory on drop and is redacted in logs.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Creates a new SecretString from a regular string.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Reads a secret from the named environment variable.
	///
	/// Returns `None` when the variable is unset or empty.
	pub fn from_env(var: &str) -> Option<Self> {
		match std::env::var(var) {
			Ok(value) if !value.trim().is_empty() => Some(Self::new(value.trim().to_string())),
			_ => None,
		}
	}

	/// Exposes the secret to a closure for processing.
	///
	/// The secret is only borrowed for the duration of the closure, which keeps
	/// the exposure window small.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}

	/// Returns the length of the secret string.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the secret string is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serializing a config never writes the key back out
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_owner_key_is_redacted() {
		let secret = SecretString::from(OWNER_KEY);
		let debug_str = format!("{:?}", secret);
		let display_str = format!("{}", secret);

		assert_eq!(debug_str, "SecretString(***REDACTED***)");
		assert_eq!(display_str, "***REDACTED***");
		assert!(!debug_str.contains("ac0974"));
		assert!(!display_str.contains("ac0974"));
	}

	#[test]
	fn test_serialize_redacts() {
		#[derive(Serialize)]
		struct Wrapper {
			private_key: SecretString,
		}

		let rendered = toml::to_string(&Wrapper {
			private_key: SecretString::from(OWNER_KEY),
		})
		.unwrap();
		assert_eq!(rendered.trim(), "private_key = \"***REDACTED***\"");
	}

	#[test]
	fn test_with_exposed() {
		let secret = SecretString::from(OWNER_KEY);
		let stripped = secret.with_exposed(|s| s.trim_start_matches("0x").len());
		assert_eq!(stripped, 64);
		assert_eq!(secret.len(), 66);
		assert!(!secret.is_empty());
	}

	#[test]
	fn test_from_env() {
		std::env::set_var("SECRET_STRING_TEST_KEY", format!("  {}  ", OWNER_KEY));
		let secret = SecretString::from_env("SECRET_STRING_TEST_KEY").unwrap();
		assert_eq!(secret, SecretString::from(OWNER_KEY));

		std::env::set_var("SECRET_STRING_TEST_KEY", "   ");
		assert!(SecretString::from_env("SECRET_STRING_TEST_KEY").is_none());

		std::env::remove_var("SECRET_STRING_TEST_KEY");
		assert!(SecretString::from_env("SECRET_STRING_TEST_KEY").is_none());
	}
}
