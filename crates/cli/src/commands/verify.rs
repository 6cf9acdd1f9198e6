//! `storeshot verify`: check texts on the current screen without scrolling.

use serde::Serialize;
use storeshot::{Descriptor, check_all_visible};

use crate::cli::VerifyArgs;
use crate::commands::{close_session, emit, open_session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct VerifyData<'a> {
	visible: &'a [String],
}

pub async fn execute(config: &Config, args: &VerifyArgs, format: OutputFormat) -> Result<()> {
	let descriptors: Vec<Descriptor> = args.texts.iter().map(|t| Descriptor::new(t.as_str())).collect();

	let session = open_session(config).await?;
	let missing = check_all_visible(&session, &descriptors).await;
	close_session(session).await;

	if !missing.is_empty() {
		return Err(CliError::NotVisible {
			missing: missing.iter().map(|d| d.as_str().to_string()).collect(),
		});
	}
	emit("verify", VerifyData { visible: &args.texts }, format);
	Ok(())
}
