//! The main map screen.
//!
//! The map itself is an OSMDroid view wrapped in Compose and exposes no
//! accessibility tree, so controls that cannot be found by text are tapped
//! by viewport-relative coordinates instead.

use storeshot_protocol::{Geolocation, Selector};
use tracing::{debug, info, warn};

use crate::dialogs::grant_location_permissions;
use crate::error::Result;
use crate::gestures::tap_relative;
use crate::location::set_location;
use crate::pacing::{Pacing, settle};
use crate::session::{AutomationSession, click_if_present};
use crate::wait::{PROGRESS_BAR_CLASS, wait_for_text, wait_until_gone};

/// Card at the top of the map that opens the species dropdown.
pub const FILTER_BY_SPECIES: &str = "Filter by Species";
/// Content description of the floating "My Location" button.
pub const MY_LOCATION: &str = "My Location";
/// Header of the conditions panel once a forecast has loaded.
pub const FISHING_CONDITIONS: &str = "Fishing Conditions";

const SPECIES_FILTER_FALLBACK: (f64, f64) = (0.5, 0.10);
const MY_LOCATION_FALLBACK: (f64, f64) = (0.88, 0.72);

pub struct MapScreen<'a, S: ?Sized> {
	session: &'a S,
	pacing: &'a Pacing,
}

impl<'a, S> MapScreen<'a, S>
where
	S: AutomationSession + ?Sized,
{
	pub fn new(session: &'a S, pacing: &'a Pacing) -> Self {
		Self { session, pacing }
	}

	/// Accepts the location permission prompt shown on first launch.
	pub async fn handle_first_launch(&self) -> Option<&'static str> {
		grant_location_permissions(self.session, self.pacing).await
	}

	pub async fn wait_for_map_tiles(&self) {
		settle(self.pacing.map_tiles).await;
	}

	pub async fn open_species_filter(&self) -> Result<()> {
		if !click_if_present(self.session, &Selector::text(FILTER_BY_SPECIES)).await? {
			let (fx, fy) = SPECIES_FILTER_FALLBACK;
			let at = tap_relative(self.session, fx, fy).await?;
			debug!(target = "storeshot", x = at.x, y = at.y, "species filter not found, tapped fallback position");
		}
		settle(self.pacing.tap_settle).await;
		Ok(())
	}

	/// Picks `species` from the open dropdown. Returns `false` if it is not
	/// listed.
	pub async fn select_species(&self, species: &str) -> Result<bool> {
		if click_if_present(self.session, &Selector::text(species)).await? {
			settle(self.pacing.select_settle).await;
			info!(target = "storeshot", species, "selected species");
			return Ok(true);
		}
		debug!(target = "storeshot", species, "species not in dropdown");
		Ok(false)
	}

	/// Selects `species`, falling back to the first entry containing
	/// `fragment`. If neither exists the dropdown is closed with back.
	pub async fn choose_species(&self, species: &str, fragment: &str) -> Result<bool> {
		self.open_species_filter().await?;
		if self.select_species(species).await? {
			return Ok(true);
		}
		if click_if_present(self.session, &Selector::text_contains(fragment)).await? {
			settle(self.pacing.select_settle).await;
			info!(target = "storeshot", fragment, "selected species by partial name");
			return Ok(true);
		}
		warn!(target = "storeshot", species, "species unavailable, closing dropdown");
		self.session.back().await?;
		settle(self.pacing.back_settle).await;
		Ok(false)
	}

	/// Injects `location` and taps "My Location" so the app fetches a
	/// forecast for it, then waits for the loading spinner to clear.
	pub async fn set_location_and_tap_my_location(&self, location: Geolocation) -> Result<()> {
		set_location(self.session, location, self.pacing).await?;
		if click_if_present(self.session, &Selector::accessibility(MY_LOCATION)).await? {
			debug!(target = "storeshot", "tapped My Location");
		} else {
			let (fx, fy) = MY_LOCATION_FALLBACK;
			let at = tap_relative(self.session, fx, fy).await?;
			debug!(target = "storeshot", x = at.x, y = at.y, "My Location not found, tapped fallback position");
		}
		self.wait_for_loading_to_finish().await;
		Ok(())
	}

	/// Waits for the loading spinner to disappear. Returns `false` on
	/// timeout.
	pub async fn wait_for_loading_to_finish(&self) -> bool {
		let gone = wait_until_gone(
			self.session,
			&Selector::class_name(PROGRESS_BAR_CLASS),
			self.pacing.load_timeout,
			self.pacing.poll_interval,
		)
		.await;
		if !gone {
			warn!(target = "storeshot", timeout = ?self.pacing.load_timeout, "loading did not finish");
		}
		gone
	}

	/// Waits for the conditions panel header that marks a completed forecast
	/// fetch.
	pub async fn wait_for_conditions_to_load(&self) -> bool {
		let loaded = wait_for_text(
			self.session,
			FISHING_CONDITIONS,
			self.pacing.load_timeout,
			self.pacing.poll_interval,
		)
		.await
		.is_some();
		if loaded {
			settle(self.pacing.select_settle).await;
			info!(target = "storeshot", "conditions panel loaded");
		} else {
			warn!(target = "storeshot", "timed out waiting for conditions panel");
		}
		loaded
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::screens::ConditionsPanel;
	use crate::testing::{Call, ScriptedSession};
	use storeshot_protocol::Point;

	#[tokio::test]
	async fn species_filter_falls_back_to_coordinates() {
		let session = ScriptedSession::new().with_viewport(1080, 2280);
		let pacing = Pacing::immediate();

		MapScreen::new(&session, &pacing).open_species_filter().await.unwrap();

		assert!(session.calls().contains(&Call::Tap(Point::new(540, 228))));
	}

	#[tokio::test]
	async fn species_filter_card_is_clicked_when_present() {
		let session = ScriptedSession::new().with_text(FILTER_BY_SPECIES);
		let pacing = Pacing::immediate();

		MapScreen::new(&session, &pacing).open_species_filter().await.unwrap();

		assert!(session.calls().contains(&Call::Click(Selector::text(FILTER_BY_SPECIES))));
		assert_eq!(session.count(|c| matches!(c, Call::Tap(_))), 0);
	}

	#[tokio::test]
	async fn choose_species_uses_partial_match() {
		let session = ScriptedSession::new().with_visible(Selector::text_contains("Mahi"));
		let pacing = Pacing::immediate();

		let chosen = MapScreen::new(&session, &pacing)
			.choose_species("Mahi Mahi (Dolphin Fish)", "Mahi")
			.await
			.unwrap();

		assert!(chosen);
		assert!(session.calls().contains(&Call::Click(Selector::text_contains("Mahi"))));
	}

	#[tokio::test]
	async fn missing_species_closes_dropdown() {
		let session = ScriptedSession::new();
		let pacing = Pacing::immediate();

		let chosen = MapScreen::new(&session, &pacing)
			.choose_species("Redfish (Red Drum)", "Red Drum")
			.await
			.unwrap();

		assert!(!chosen);
		assert_eq!(session.calls().last(), Some(&Call::Back));
	}

	#[tokio::test]
	async fn my_location_fab_fallback_taps_lower_right() {
		let session = ScriptedSession::new().with_viewport(1080, 2280);
		let pacing = Pacing::immediate();

		MapScreen::new(&session, &pacing)
			.set_location_and_tap_my_location(Geolocation::new(33.4863, -77.5891))
			.await
			.unwrap();

		let calls = session.calls();
		assert_eq!(calls[0], Call::SetLocation(Geolocation::new(33.4863, -77.5891)));
		assert!(calls.contains(&Call::Tap(Point::new(950, 1641))));
	}

	#[tokio::test]
	async fn conditions_load_detected_by_header() {
		let session = ScriptedSession::new().with_text(FISHING_CONDITIONS);
		let pacing = Pacing::immediate();
		let map = MapScreen::new(&session, &pacing);

		assert!(map.wait_for_conditions_to_load().await);
		assert!(ConditionsPanel::new(&session, &pacing).is_visible().await);
	}
}
