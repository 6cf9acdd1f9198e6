//! Simulated GPS positions.
//!
//! Presets are real fishing spots whose forecasts produce the screens the
//! store listing wants to show.

use serde::{Deserialize, Serialize};
use storeshot_protocol::Geolocation;
use tracing::info;

use crate::error::{Error, Result};
use crate::pacing::{Pacing, settle};
use crate::session::AutomationSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotKind {
	Nearshore,
	Offshore,
}

/// A named location the app can be pointed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPreset {
	/// Lookup key, e.g. `neuse-river`.
	pub key: String,
	pub name: String,
	pub latitude: f64,
	pub longitude: f64,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub best_species: String,
	pub kind: SpotKind,
}

impl LocationPreset {
	pub fn geolocation(&self) -> Geolocation {
		Geolocation::new(self.latitude, self.longitude)
	}

	/// Built-in presets.
	pub fn builtin() -> Vec<LocationPreset> {
		vec![
			preset(
				"neuse-river",
				"Neuse River, NC",
				35.0196,
				-76.6989,
				"Inshore redfish and speckled trout water",
				"Redfish (Red Drum)",
				SpotKind::Nearshore,
			),
			preset(
				"lockwood-folly-inlet",
				"Lockwood Folly Inlet, NC",
				33.9075,
				-78.2183,
				"Inlet with strong tidal flow",
				"Redfish (Red Drum)",
				SpotKind::Nearshore,
			),
			preset(
				"frying-pan-tower",
				"Frying Pan Tower, NC",
				33.4863,
				-77.5891,
				"Offshore tower 34 miles out",
				"Mahi Mahi (Dolphin Fish)",
				SpotKind::Offshore,
			),
			preset(
				"gulf-coast",
				"Gulf Coast, LA",
				29.95,
				-89.10,
				"Louisiana marsh and coastal bays",
				"Redfish (Red Drum)",
				SpotKind::Nearshore,
			),
			preset(
				"florida-keys",
				"Florida Keys, FL",
				24.92,
				-80.65,
				"Keys flats and patch reefs",
				"Cobia",
				SpotKind::Nearshore,
			),
		]
	}

	/// Finds a preset by key.
	pub fn lookup<'a>(presets: &'a [LocationPreset], key: &str) -> Result<&'a LocationPreset> {
		presets
			.iter()
			.find(|p| p.key.eq_ignore_ascii_case(key))
			.ok_or_else(|| Error::UnknownLocation(key.to_string()))
	}
}

fn preset(
	key: &str,
	name: &str,
	latitude: f64,
	longitude: f64,
	description: &str,
	best_species: &str,
	kind: SpotKind,
) -> LocationPreset {
	LocationPreset {
		key: key.to_string(),
		name: name.to_string(),
		latitude,
		longitude,
		description: description.to_string(),
		best_species: best_species.to_string(),
		kind,
	}
}

/// Injects a GPS fix and waits for the location provider to pick it up.
pub async fn set_location<S>(session: &S, location: Geolocation, pacing: &Pacing) -> Result<()>
where
	S: AutomationSession + ?Sized,
{
	info!(
		target = "storeshot",
		latitude = location.latitude,
		longitude = location.longitude,
		"setting location"
	);
	session.set_geolocation(location).await?;
	settle(pacing.location_settle).await;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, ScriptedSession};

	#[test]
	fn builtin_presets_have_unique_keys() {
		let presets = LocationPreset::builtin();
		let mut keys: Vec<_> = presets.iter().map(|p| p.key.as_str()).collect();
		keys.sort_unstable();
		keys.dedup();
		assert_eq!(keys.len(), presets.len());
	}

	#[test]
	fn lookup_is_case_insensitive() {
		let presets = LocationPreset::builtin();
		let tower = LocationPreset::lookup(&presets, "Frying-Pan-Tower").unwrap();
		assert_eq!(tower.kind, SpotKind::Offshore);
		assert_eq!(tower.best_species, "Mahi Mahi (Dolphin Fish)");
	}

	#[test]
	fn unknown_preset_is_an_error() {
		let err = LocationPreset::lookup(&LocationPreset::builtin(), "atlantis").unwrap_err();
		assert!(matches!(err, Error::UnknownLocation(ref k) if k == "atlantis"));
	}

	#[tokio::test]
	async fn set_location_injects_fix_at_sea_level() {
		let session = ScriptedSession::new();
		let neuse = LocationPreset::lookup(&LocationPreset::builtin(), "neuse-river").unwrap().geolocation();

		set_location(&session, neuse, &Pacing::immediate()).await.unwrap();

		assert_eq!(session.calls(), vec![Call::SetLocation(Geolocation::new(35.0196, -76.6989))]);
		assert_eq!(neuse.altitude, 0.0);
	}
}
