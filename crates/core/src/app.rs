//! Identity of the app under test.

use serde::{Deserialize, Serialize};

/// Debug build of the TideRunner app.
pub const DEFAULT_APP_PACKAGE: &str = "com.fishing.conditions.debug";
pub const DEFAULT_APP_ACTIVITY: &str = "com.fishing.conditions.ui.MainActivity";

/// Package id plus optional launch activity. Never mutated after
/// configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdentity {
	pub package: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub activity: Option<String>,
}

impl AppIdentity {
	pub fn new(package: impl Into<String>) -> Self {
		Self {
			package: package.into(),
			activity: None,
		}
	}

	pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
		self.activity = Some(activity.into());
		self
	}
}

impl Default for AppIdentity {
	fn default() -> Self {
		Self::new(DEFAULT_APP_PACKAGE).with_activity(DEFAULT_APP_ACTIVITY)
	}
}
