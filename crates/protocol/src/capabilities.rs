//! Session capabilities for `POST /session`.
//!
//! Appium expects vendor capabilities under the `appium:` prefix, alongside
//! the W3C standard `platformName`.

use serde::{Deserialize, Serialize};

/// Default automation backend for Android devices.
pub const UIAUTOMATOR2: &str = "UiAutomator2";

/// Capabilities used to open a UiAutomator2 session against an emulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
	#[serde(rename = "platformName")]
	pub platform_name: String,
	#[serde(rename = "appium:deviceName")]
	pub device_name: String,
	#[serde(rename = "appium:platformVersion")]
	pub platform_version: String,
	#[serde(rename = "appium:avd", skip_serializing_if = "Option::is_none")]
	pub avd: Option<String>,
	#[serde(rename = "appium:automationName")]
	pub automation_name: String,
	#[serde(rename = "appium:appPackage")]
	pub app_package: String,
	#[serde(rename = "appium:appActivity", skip_serializing_if = "Option::is_none")]
	pub app_activity: Option<String>,
	/// Keep app data between sessions.
	#[serde(rename = "appium:noReset")]
	pub no_reset: bool,
	#[serde(rename = "appium:fullReset")]
	pub full_reset: bool,
	/// Grant runtime permissions (location etc.) at install time.
	#[serde(rename = "appium:autoGrantPermissions")]
	pub auto_grant_permissions: bool,
	/// Seconds of client inactivity before the server ends the session.
	#[serde(rename = "appium:newCommandTimeout")]
	pub new_command_timeout: u64,
	/// Milliseconds allowed for the on-device server to start.
	#[serde(rename = "appium:uiautomator2ServerLaunchTimeout")]
	pub server_launch_timeout_ms: u64,
}

impl Capabilities {
	/// Android capabilities with the suite's defaults: no reinstall, no
	/// reset, permissions auto-granted.
	pub fn android(
		device_name: impl Into<String>,
		platform_version: impl Into<String>,
		app_package: impl Into<String>,
	) -> Self {
		Self {
			platform_name: "Android".to_string(),
			device_name: device_name.into(),
			platform_version: platform_version.into(),
			avd: None,
			automation_name: UIAUTOMATOR2.to_string(),
			app_package: app_package.into(),
			app_activity: None,
			no_reset: true,
			full_reset: false,
			auto_grant_permissions: true,
			new_command_timeout: 120,
			server_launch_timeout_ms: 60_000,
		}
	}

	pub fn with_avd(mut self, avd: impl Into<String>) -> Self {
		self.avd = Some(avd.into());
		self
	}

	pub fn with_activity(mut self, activity: Option<String>) -> Self {
		self.app_activity = activity;
		self
	}
}

/// Body of `POST /session`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSessionRequest {
	pub capabilities: CapabilitiesRequest,
}

/// W3C capability matching block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
	pub always_match: Capabilities,
	pub first_match: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl NewSessionRequest {
	pub fn new(capabilities: Capabilities) -> Self {
		Self {
			capabilities: CapabilitiesRequest {
				always_match: capabilities,
				first_match: vec![serde_json::Map::new()],
			},
		}
	}
}

/// `value` of a successful `POST /session` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
	pub session_id: String,
	#[serde(default)]
	pub capabilities: serde_json::Value,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn android_capabilities_use_appium_prefix() {
		let caps = Capabilities::android("Pixel 4", "14.0", "com.fishing.conditions.debug")
			.with_avd("Pixel_4")
			.with_activity(Some("com.fishing.conditions.ui.MainActivity".into()));
		let json = serde_json::to_value(&caps).unwrap();

		assert_eq!(json["platformName"], "Android");
		assert_eq!(json["appium:automationName"], "UiAutomator2");
		assert_eq!(json["appium:avd"], "Pixel_4");
		assert_eq!(json["appium:noReset"], true);
		assert_eq!(json["appium:autoGrantPermissions"], true);
		assert_eq!(json["appium:uiautomator2ServerLaunchTimeout"], 60_000);
	}

	#[test]
	fn optional_capabilities_are_omitted() {
		let caps = Capabilities::android("Pixel 4", "14.0", "com.example");
		let json = serde_json::to_value(&caps).unwrap();
		assert!(json.get("appium:avd").is_none());
		assert!(json.get("appium:appActivity").is_none());
	}

	#[test]
	fn new_session_request_wraps_always_match() {
		let caps = Capabilities::android("Pixel 4", "14.0", "com.example");
		let json = serde_json::to_value(NewSessionRequest::new(caps)).unwrap();
		assert_eq!(json["capabilities"]["alwaysMatch"]["appium:appPackage"], "com.example");
		assert_eq!(json["capabilities"]["firstMatch"], serde_json::json!([{}]));
	}

	#[test]
	fn new_session_response_reads_session_id() {
		let value: NewSessionResponse =
			serde_json::from_str(r#"{"sessionId":"abc-123","capabilities":{"platformName":"Android"}}"#).unwrap();
		assert_eq!(value.session_id, "abc-123");
	}
}
