//! Emulator profiles the screenshots are taken on.

use serde::{Deserialize, Serialize};
use storeshot_protocol::Capabilities;

use crate::app::AppIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
	/// AVD to boot, e.g. `Pixel_4`.
	pub avd_name: String,
	/// Human-readable name sent as `appium:deviceName`.
	pub device_name: String,
	pub platform_version: String,
	pub screen_width: u32,
	pub screen_height: u32,
	/// Subdirectory of the output root for this profile's screenshots.
	pub output_folder: String,
}

impl DeviceProfile {
	pub fn pixel_4() -> Self {
		Self {
			avd_name: "Pixel_4".to_string(),
			device_name: "Pixel 4".to_string(),
			platform_version: "14.0".to_string(),
			screen_width: 1080,
			screen_height: 2280,
			output_folder: "phone".to_string(),
		}
	}

	/// Built-in profiles, keyed by AVD name.
	pub fn builtin() -> Vec<DeviceProfile> {
		vec![Self::pixel_4()]
	}

	/// Whether `name` refers to this profile (AVD name or device name).
	pub fn matches(&self, name: &str) -> bool {
		self.avd_name.eq_ignore_ascii_case(name) || self.device_name.eq_ignore_ascii_case(name)
	}

	/// Session capabilities for launching `app` on this profile.
	pub fn capabilities(&self, app: &AppIdentity) -> Capabilities {
		Capabilities::android(&self.device_name, &self.platform_version, &app.package)
			.with_avd(&self.avd_name)
			.with_activity(app.activity.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_4_capabilities() {
		let caps = DeviceProfile::pixel_4().capabilities(&AppIdentity::default());
		let json = serde_json::to_value(&caps).unwrap();

		assert_eq!(json["platformName"], "Android");
		assert_eq!(json["appium:deviceName"], "Pixel 4");
		assert_eq!(json["appium:avd"], "Pixel_4");
		assert_eq!(json["appium:platformVersion"], "14.0");
		assert_eq!(json["appium:appPackage"], "com.fishing.conditions.debug");
		assert_eq!(json["appium:appActivity"], "com.fishing.conditions.ui.MainActivity");
	}

	#[test]
	fn matches_either_name() {
		let profile = DeviceProfile::pixel_4();
		assert!(profile.matches("pixel_4"));
		assert!(profile.matches("Pixel 4"));
		assert!(!profile.matches("Pixel 7"));
	}
}
