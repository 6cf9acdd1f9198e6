//! Remote automation session: one method per WebDriver / Appium endpoint.

use base64::Engine;
use serde::de::IgnoredAny;
use storeshot_protocol::{
	ActionsRequest, AppIdRequest, Capabilities, ElementReference, Geolocation, Locator, NewSessionRequest,
	NewSessionResponse, Rect, SetLocationRequest,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::transport::Transport;

/// An open session on the automation server.
///
/// The session is closed explicitly with [`RemoteSession::quit`]; dropping it
/// leaves the server-side session to expire via `newCommandTimeout`.
#[derive(Debug)]
pub struct RemoteSession {
	transport: Transport,
	id: String,
	capabilities: serde_json::Value,
}

impl RemoteSession {
	/// Opens a new session with the given capabilities.
	pub async fn create(transport: Transport, capabilities: Capabilities) -> Result<Self> {
		info!(
			target = "storeshot",
			server = %transport.base_url(),
			device = %capabilities.device_name,
			app = %capabilities.app_package,
			"creating session"
		);
		let response: NewSessionResponse = transport.post("session", &NewSessionRequest::new(capabilities)).await?;
		info!(target = "storeshot", session = %response.session_id, "session created");

		Ok(Self {
			transport,
			id: response.session_id,
			capabilities: response.capabilities,
		})
	}

	/// Server-assigned session id.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Capabilities echoed back by the server at creation time.
	pub fn capabilities(&self) -> &serde_json::Value {
		&self.capabilities
	}

	/// Ends the session on the server.
	pub async fn quit(&self) -> Result<()> {
		info!(target = "storeshot", session = %self.id, "closing session");
		let _: IgnoredAny = self.transport.delete(&format!("session/{}", self.id)).await?;
		Ok(())
	}

	/// Package name of the app currently in the foreground.
	pub async fn current_package(&self) -> Result<String> {
		self.transport.get(&self.path("appium/device/current_package")).await
	}

	/// Brings an installed app to the foreground, launching it if needed.
	pub async fn activate_app(&self, app_id: &str) -> Result<()> {
		let _: IgnoredAny = self
			.transport
			.post(&self.path("appium/device/activate_app"), &AppIdRequest { app_id })
			.await?;
		Ok(())
	}

	/// Stops an app. Returns whether the server reports it was running.
	pub async fn terminate_app(&self, app_id: &str) -> Result<bool> {
		let value: serde_json::Value = self
			.transport
			.post(&self.path("appium/device/terminate_app"), &AppIdRequest { app_id })
			.await?;
		Ok(value.as_bool().unwrap_or(false))
	}

	/// Locates a single element. A W3C `no such element` answer is `Ok(None)`.
	pub async fn find_element(&self, locator: &Locator) -> Result<Option<ElementReference>> {
		match self.transport.post(&self.path("element"), locator).await {
			Ok(element) => Ok(Some(element)),
			Err(err) if err.is_no_such_element() => {
				debug!(target = "storeshot", using = %locator.using, value = %locator.value, "no such element");
				Ok(None)
			}
			Err(err) => Err(err),
		}
	}

	/// Clicks a previously located element.
	pub async fn click(&self, element: &ElementReference) -> Result<()> {
		let _: IgnoredAny = self
			.transport
			.post(&self.path(&format!("element/{}/click", element.id)), &serde_json::json!({}))
			.await?;
		Ok(())
	}

	/// Performs a W3C action sequence (swipes, taps).
	pub async fn perform_actions(&self, actions: &ActionsRequest) -> Result<()> {
		let _: IgnoredAny = self.transport.post(&self.path("actions"), actions).await?;
		Ok(())
	}

	/// Sets the device's simulated GPS fix.
	pub async fn set_location(&self, location: Geolocation) -> Result<()> {
		let _: IgnoredAny = self
			.transport
			.post(&self.path("location"), &SetLocationRequest { location })
			.await?;
		Ok(())
	}

	/// Captures the screen as PNG bytes.
	pub async fn screenshot(&self) -> Result<Vec<u8>> {
		let encoded: String = self.transport.get(&self.path("screenshot")).await?;
		// Some servers wrap the payload at 76 columns.
		let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
		Ok(base64::prelude::BASE64_STANDARD.decode(compact)?)
	}

	/// Window rectangle of the device screen.
	pub async fn window_rect(&self) -> Result<Rect> {
		self.transport.get(&self.path("window/rect")).await
	}

	/// Presses the system back button.
	pub async fn back(&self) -> Result<()> {
		let _: IgnoredAny = self.transport.post(&self.path("back"), &serde_json::json!({})).await?;
		Ok(())
	}

	fn path(&self, endpoint: &str) -> String {
		format!("session/{}/{}", self.id, endpoint)
	}
}
