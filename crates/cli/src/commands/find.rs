//! `storeshot find`: scroll until some text shows up.

use serde::Serialize;
use storeshot::{Descriptor, PollOutcome, find_by_scrolling};

use crate::cli::FindArgs;
use crate::commands::{close_session, emit, open_session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindData<'a> {
	text: &'a str,
	max_swipes: u32,
	#[serde(flatten)]
	outcome: PollOutcome,
}

pub async fn execute(config: &Config, args: &FindArgs, format: OutputFormat) -> Result<()> {
	let descriptor = Descriptor::new(args.text.as_str());

	let session = open_session(config).await?;
	let outcome = find_by_scrolling(&session, &descriptor, args.max_swipes, &config.pacing).await;
	close_session(session).await;

	if !outcome.is_found() {
		return Err(CliError::NotVisible {
			missing: vec![args.text.clone()],
		});
	}
	emit(
		"find",
		FindData {
			text: &args.text,
			max_swipes: args.max_swipes,
			outcome,
		},
		format,
	);
	Ok(())
}
