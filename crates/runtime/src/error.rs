//! Error types for the WebDriver runtime.

use storeshot_protocol::{ErrorBody, NO_SUCH_ELEMENT};
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the automation server.
#[derive(Debug, Error)]
pub enum Error {
	/// Server base URL could not be parsed.
	#[error("Invalid server URL '{url}': {reason}")]
	InvalidServerUrl { url: String, reason: String },

	/// HTTP-level failure (connection refused, timeout, TLS).
	#[error("Failed to reach automation server: {0}")]
	Transport(#[from] reqwest::Error),

	/// The server answered with a W3C error body.
	#[error("{error}: {message}")]
	Remote {
		/// W3C error code (e.g. "no such element", "unknown error")
		error: String,
		/// Human-readable message from the server
		message: String,
		/// HTTP status code of the response
		status: u16,
	},

	/// Response did not match the expected wire shape.
	#[error("Protocol error: {0}")]
	Protocol(String),

	/// Screenshot payload was not valid base64.
	#[error("Failed to decode screenshot: {0}")]
	Decode(#[from] base64::DecodeError),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	pub(crate) fn remote(body: ErrorBody, status: u16) -> Self {
		Error::Remote {
			error: body.error,
			message: body.message,
			status,
		}
	}

	/// Returns the W3C error code if the server reported one.
	pub fn error_code(&self) -> Option<&str> {
		match self {
			Error::Remote { error, .. } => Some(error),
			_ => None,
		}
	}

	/// Returns true if the server could not locate the requested element.
	pub fn is_no_such_element(&self) -> bool {
		self.error_code() == Some(NO_SUCH_ELEMENT)
	}
}
