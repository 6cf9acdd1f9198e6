//! `storeshot list`: what a run would capture, and where.

use serde::Serialize;
use storeshot::{DeviceProfile, LocationPreset, Storyboard};

use crate::commands::emit;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShotEntry {
	number: u32,
	file: String,
	title: String,
	expect: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListData<'a> {
	device: &'a str,
	shots: Vec<ShotEntry>,
	locations: &'a [LocationPreset],
	devices: &'a [DeviceProfile],
}

pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
	let shots = Storyboard::standard()
		.shots()
		.iter()
		.map(|shot| ShotEntry {
			number: shot.number,
			file: shot.file_name(),
			title: shot.title.clone(),
			expect: shot.expect.iter().map(|d| d.as_str().to_string()).collect(),
		})
		.collect();

	emit(
		"list",
		ListData {
			device: &config.device,
			shots,
			locations: &config.locations,
			devices: &config.devices,
		},
		format,
	);
	Ok(())
}
