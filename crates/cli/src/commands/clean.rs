//! `storeshot clean`: delete screenshots in the device output folder.

use std::path::PathBuf;

use serde::Serialize;
use storeshot::clear_output_folder;

use crate::commands::emit;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CleanData {
	output_dir: PathBuf,
	removed: usize,
}

pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
	let target = config.capture_target()?;
	let removed = clear_output_folder(&target)?;
	emit(
		"clean",
		CleanData {
			output_dir: target.dir(),
			removed,
		},
		format,
	);
	Ok(())
}
