//! Error types for the storeshot core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// The automation session call failed (transport or remote error).
	#[error(transparent)]
	Session(#[from] storeshot_runtime::Error),

	/// Captured image is below the store's minimum short side.
	#[error("screenshot '{name}' is too small for the store listing: {width}x{height} (min {min}px on short side)")]
	ImageTooSmall {
		name: String,
		width: u32,
		height: u32,
		min: u32,
	},

	/// Captured bytes are not a decodable PNG.
	#[error("screenshot '{name}' is not a valid PNG: {source}")]
	ImageDecode {
		name: String,
		#[source]
		source: image::ImageError,
	},

	#[error("failed to write screenshot to {path}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unknown location preset: {0}")]
	UnknownLocation(String),

	#[error("invalid output pattern: {0}")]
	Pattern(#[from] glob::PatternError),

	#[error("failed to read output folder: {0}")]
	Glob(#[from] glob::GlobError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Whether this error is a store-compliance failure of a captured image.
	///
	/// Compliance failures cannot be healed by retrying the batch.
	pub fn is_compliance(&self) -> bool {
		matches!(self, Error::ImageTooSmall { .. } | Error::ImageDecode { .. })
	}
}
