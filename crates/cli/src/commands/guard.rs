//! `storeshot guard`: bring the app to the foreground.

use serde::Serialize;
use storeshot::{GuardOutcome, ensure_foreground};

use crate::commands::{close_session, emit, open_session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuardData<'a> {
	package: &'a str,
	outcome: GuardOutcome,
}

pub async fn execute(config: &Config, format: OutputFormat) -> Result<()> {
	let session = open_session(config).await?;
	let outcome = ensure_foreground(&session, &config.app, &config.pacing).await;
	close_session(session).await;

	if !outcome.is_ready() {
		return Err(CliError::NotForeground(outcome));
	}
	emit(
		"guard",
		GuardData {
			package: &config.app.package,
			outcome,
		},
		format,
	);
	Ok(())
}
