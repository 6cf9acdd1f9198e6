//! `storeshot locate`: move the device's GPS fix.

use serde::Serialize;
use storeshot::{Geolocation, LocationPreset, set_location};

use crate::cli::LocateArgs;
use crate::commands::{close_session, emit, open_session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateData {
	#[serde(skip_serializing_if = "Option::is_none")]
	preset: Option<String>,
	latitude: f64,
	longitude: f64,
}

/// Turns the arguments into a fix, looking presets up in `presets`.
fn resolve_target(args: &LocateArgs, presets: &[LocationPreset]) -> Result<LocateData> {
	if let Some(key) = &args.preset {
		let preset = LocationPreset::lookup(presets, key)?;
		return Ok(LocateData {
			preset: Some(preset.key.clone()),
			latitude: preset.latitude,
			longitude: preset.longitude,
		});
	}
	match (args.lat, args.lon) {
		(Some(latitude), Some(longitude)) => {
			if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
				return Err(CliError::InvalidInput(format!(
					"coordinates out of range: {latitude}, {longitude}"
				)));
			}
			Ok(LocateData {
				preset: None,
				latitude,
				longitude,
			})
		}
		_ => Err(CliError::InvalidInput("either a preset or both --lat and --lon are required".into())),
	}
}

pub async fn execute(config: &Config, args: &LocateArgs, format: OutputFormat) -> Result<()> {
	let target = resolve_target(args, &config.locations)?;

	let session = open_session(config).await?;
	let result = set_location(
		&session,
		Geolocation::new(target.latitude, target.longitude),
		&config.pacing,
	)
	.await;
	close_session(session).await;
	result?;

	emit("locate", target, format);
	Ok(())
}
