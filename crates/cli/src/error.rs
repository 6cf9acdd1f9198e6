use std::path::PathBuf;

use storeshot::GuardOutcome;
use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// The command already printed its envelope (e.g. a run with failed
	/// shots); exit non-zero without printing again.
	#[error("")]
	OutputAlreadyPrinted,

	#[error("failed to read config {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config {path}: {source}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("unknown device profile '{name}' (available: {available})")]
	UnknownDevice { name: String, available: String },

	#[error("{0}")]
	InvalidInput(String),

	#[error("app is not in the foreground: {0}")]
	NotForeground(GuardOutcome),

	#[error("not visible: {}", .missing.join(", "))]
	NotVisible { missing: Vec<String> },

	#[error(transparent)]
	Core(#[from] storeshot::Error),

	#[error(transparent)]
	Session(#[from] storeshot_runtime::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl CliError {
	pub fn is_output_already_printed(&self) -> bool {
		matches!(self, CliError::OutputAlreadyPrinted)
	}

	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::OutputAlreadyPrinted => (ErrorCode::InternalError, None),
			CliError::ConfigRead { path, .. } | CliError::ConfigParse { path, .. } => {
				(ErrorCode::ConfigError, Some(serde_json::json!({ "path": path })))
			}
			CliError::UnknownDevice { .. } | CliError::InvalidInput(_) => (ErrorCode::InvalidInput, None),
			CliError::NotForeground(outcome) => (
				ErrorCode::AppNotForeground,
				Some(serde_json::json!({ "guard": outcome })),
			),
			CliError::NotVisible { missing } => (
				ErrorCode::ElementNotFound,
				Some(serde_json::json!({ "missing": missing })),
			),
			CliError::Core(err) => (core_error_code(err), None),
			CliError::Session(_) => (ErrorCode::SessionError, None),
			CliError::Io(_) => (ErrorCode::IoError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}

fn core_error_code(err: &storeshot::Error) -> ErrorCode {
	match err {
		storeshot::Error::Session(_) => ErrorCode::SessionError,
		e if e.is_compliance() => ErrorCode::ComplianceFailed,
		storeshot::Error::UnknownLocation(_) | storeshot::Error::Pattern(_) => ErrorCode::InvalidInput,
		_ => ErrorCode::IoError,
	}
}
