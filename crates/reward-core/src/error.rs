use reward_account::AccountError;
use reward_delivery::DeliveryError;
use reward_types::ConversionError;
use thiserror::Error;

/// Errors returned by a reward submission.
///
/// Each variant names the step that failed. Nothing is retried internally;
/// callers decide based on [`SubmitError::is_retryable`].
#[derive(Debug, Error)]
pub enum SubmitError {
	/// The request was rejected before any network activity.
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
	/// The node could not be reached, identified or queried.
	#[error("Connection failed: {0}")]
	Connection(#[source] DeliveryError),
	/// The owner credential could not produce an address.
	#[error("Credential error: {0}")]
	Credential(#[source] AccountError),
	/// The pending nonce could not be read.
	#[error("Nonce query failed: {0}")]
	NonceQuery(#[source] DeliveryError),
	/// The amount or a contract result could not be encoded or decoded.
	#[error("Encoding failed: {0}")]
	Encoding(String),
	/// Signing or broadcasting failed. The transaction may or may not have
	/// reached the mempool.
	#[error("Submission failed: {0}")]
	Submission(String),
}

impl SubmitError {
	/// Whether repeating the same call cannot cause a duplicate reward.
	pub fn is_retryable(&self) -> bool {
		matches!(self, SubmitError::Connection(_) | SubmitError::NonceQuery(_))
	}
}

impl From<ConversionError> for SubmitError {
	fn from(err: ConversionError) -> Self {
		SubmitError::Encoding(err.to_string())
	}
}
