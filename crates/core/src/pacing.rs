//! Settle delays and poll intervals.
//!
//! Device automation is asynchronous on the device side: after every action
//! the compositor, the app, or the location provider needs time before the
//! next check means anything. All such waits are collected here so a run can
//! be tuned (or zeroed for tests) in one place.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Every wait used by the guard, the poller, and the screens.
///
/// Serialized as integer milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pacing {
	/// After `activate_app` on the fast-resume path.
	#[serde(with = "millis")]
	pub resume_settle: Duration,
	/// After `terminate_app` on the restart path.
	#[serde(with = "millis")]
	pub terminate_settle: Duration,
	/// After `activate_app` on the restart path.
	#[serde(with = "millis")]
	pub restart_settle: Duration,
	/// Finger travel time of a scroll swipe.
	#[serde(with = "millis")]
	pub swipe_duration: Duration,
	/// After every scroll swipe.
	#[serde(with = "millis")]
	pub swipe_settle: Duration,
	/// Extra wait between scroll-search iterations.
	#[serde(with = "millis")]
	pub search_settle: Duration,
	/// Interval of timed waits (`wait_for_text` and friends).
	#[serde(with = "millis")]
	pub poll_interval: Duration,
	/// After injecting a GPS fix.
	#[serde(with = "millis")]
	pub location_settle: Duration,
	/// After tapping a control that animates (cards, expanders, popups).
	#[serde(with = "millis")]
	pub tap_settle: Duration,
	/// After choosing an item that triggers a data refresh.
	#[serde(with = "millis")]
	pub select_settle: Duration,
	/// After the system back button.
	#[serde(with = "millis")]
	pub back_settle: Duration,
	/// Time allowed for a permission dialog to appear.
	#[serde(with = "millis")]
	pub dialog_appear: Duration,
	/// After session creation, before the first shot.
	#[serde(with = "millis")]
	pub launch_settle: Duration,
	/// Map tile rendering time on the first shot.
	#[serde(with = "millis")]
	pub map_tiles: Duration,
	/// After scrolling a section into place, before checking it.
	#[serde(with = "millis")]
	pub section_settle: Duration,
	/// Upper bound for API-driven loads (spinner, conditions panel).
	#[serde(with = "millis")]
	pub load_timeout: Duration,
}

impl Default for Pacing {
	fn default() -> Self {
		Self {
			resume_settle: Duration::from_millis(2000),
			terminate_settle: Duration::from_millis(1000),
			restart_settle: Duration::from_millis(3000),
			swipe_duration: Duration::from_millis(600),
			swipe_settle: Duration::from_millis(500),
			search_settle: Duration::from_millis(400),
			poll_interval: Duration::from_millis(500),
			location_settle: Duration::from_millis(1500),
			tap_settle: Duration::from_millis(800),
			select_settle: Duration::from_millis(1000),
			back_settle: Duration::from_millis(500),
			dialog_appear: Duration::from_millis(2000),
			launch_settle: Duration::from_millis(4000),
			map_tiles: Duration::from_millis(5000),
			section_settle: Duration::from_millis(1000),
			load_timeout: Duration::from_secs(15),
		}
	}
}

impl Pacing {
	/// No waits at all, with a short load timeout. Useful against in-memory
	/// sessions.
	pub fn immediate() -> Self {
		Self {
			resume_settle: Duration::ZERO,
			terminate_settle: Duration::ZERO,
			restart_settle: Duration::ZERO,
			swipe_duration: Duration::ZERO,
			swipe_settle: Duration::ZERO,
			search_settle: Duration::ZERO,
			poll_interval: Duration::from_millis(1),
			location_settle: Duration::ZERO,
			tap_settle: Duration::ZERO,
			select_settle: Duration::ZERO,
			back_settle: Duration::ZERO,
			dialog_appear: Duration::ZERO,
			launch_settle: Duration::ZERO,
			map_tiles: Duration::ZERO,
			section_settle: Duration::ZERO,
			load_timeout: Duration::from_millis(20),
		}
	}
}

/// Sleeps for `delay`, skipping the timer entirely for zero.
pub(crate) async fn settle(delay: Duration) {
	if !delay.is_zero() {
		tokio::time::sleep(delay).await;
	}
}

pub(crate) mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_as_milliseconds() {
		let json = serde_json::to_value(Pacing::default()).unwrap();
		assert_eq!(json["resumeSettle"], 2000);
		assert_eq!(json["restartSettle"], 3000);
		assert_eq!(json["loadTimeout"], 15_000);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let pacing: Pacing = serde_json::from_str(r#"{"swipeDuration": 300}"#).unwrap();
		assert_eq!(pacing.swipe_duration, Duration::from_millis(300));
		assert_eq!(pacing.resume_settle, Duration::from_millis(2000));
	}
}
