//! The automation-session capability consumed by every operation.
//!
//! Operations take `&S where S: AutomationSession + ?Sized`; there is no
//! module-level session state. A lookup that matches nothing is `Ok(None)`,
//! so callers branch on data instead of on errors.

use std::time::Duration;

use async_trait::async_trait;
use storeshot_protocol::{ActionsRequest, ElementReference, Geolocation, Point, Selector, Size};
use storeshot_runtime::RemoteSession;
use tracing::debug;

use crate::error::Result;

/// A located on-screen element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
	/// Server-side element id.
	pub id: String,
	/// Selector the element was found with.
	pub selector: Selector,
}

/// Operations a live automation session supports.
#[async_trait]
pub trait AutomationSession: Send + Sync {
	/// Package id of the foreground app, `None` when it cannot be determined.
	async fn foreground_app(&self) -> Option<String>;

	/// Brings an installed app to the foreground without reinstalling it.
	async fn activate_app(&self, app_id: &str) -> Result<()>;

	/// Stops an app. Terminating an app that is not running may error.
	async fn terminate_app(&self, app_id: &str) -> Result<()>;

	/// Locates zero or one element.
	async fn find_element(&self, selector: &Selector) -> Result<Option<ElementHandle>>;

	async fn click(&self, element: &ElementHandle) -> Result<()>;

	/// Single-finger drag from `from` to `to`.
	async fn swipe(&self, from: Point, to: Point, duration: Duration) -> Result<()>;

	/// Single-finger tap at absolute coordinates.
	async fn tap(&self, at: Point) -> Result<()>;

	async fn set_geolocation(&self, location: Geolocation) -> Result<()>;

	/// Raw PNG bytes of the current screen.
	async fn capture_screen(&self) -> Result<Vec<u8>>;

	async fn viewport_size(&self) -> Result<Size>;

	/// System back button.
	async fn back(&self) -> Result<()>;
}

#[async_trait]
impl AutomationSession for RemoteSession {
	async fn foreground_app(&self) -> Option<String> {
		match self.current_package().await {
			Ok(package) => Some(package),
			Err(err) => {
				debug!(target = "storeshot", error = %err, "foreground query failed");
				None
			}
		}
	}

	async fn activate_app(&self, app_id: &str) -> Result<()> {
		Ok(RemoteSession::activate_app(self, app_id).await?)
	}

	async fn terminate_app(&self, app_id: &str) -> Result<()> {
		let was_running = RemoteSession::terminate_app(self, app_id).await?;
		debug!(target = "storeshot", app = app_id, was_running, "terminated app");
		Ok(())
	}

	async fn find_element(&self, selector: &Selector) -> Result<Option<ElementHandle>> {
		let found = RemoteSession::find_element(self, &selector.to_locator()).await?;
		Ok(found.map(|ElementReference { id }| ElementHandle {
			id,
			selector: selector.clone(),
		}))
	}

	async fn click(&self, element: &ElementHandle) -> Result<()> {
		let reference = ElementReference { id: element.id.clone() };
		Ok(RemoteSession::click(self, &reference).await?)
	}

	async fn swipe(&self, from: Point, to: Point, duration: Duration) -> Result<()> {
		let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
		Ok(self.perform_actions(&ActionsRequest::swipe(from, to, duration_ms)).await?)
	}

	async fn tap(&self, at: Point) -> Result<()> {
		Ok(self.perform_actions(&ActionsRequest::tap(at)).await?)
	}

	async fn set_geolocation(&self, location: Geolocation) -> Result<()> {
		Ok(self.set_location(location).await?)
	}

	async fn capture_screen(&self) -> Result<Vec<u8>> {
		Ok(self.screenshot().await?)
	}

	async fn viewport_size(&self) -> Result<Size> {
		Ok(self.window_rect().await?.size())
	}

	async fn back(&self) -> Result<()> {
		Ok(RemoteSession::back(self).await?)
	}
}

/// Clicks the element matched by `selector`, if any. Returns whether a click
/// happened.
pub async fn click_if_present<S>(session: &S, selector: &Selector) -> Result<bool>
where
	S: AutomationSession + ?Sized,
{
	match session.find_element(selector).await? {
		Some(element) => {
			session.click(&element).await?;
			Ok(true)
		}
		None => Ok(false),
	}
}
