//! System and in-app dialogs that interrupt a run.

use storeshot_protocol::Selector;
use tracing::{debug, info};

use crate::pacing::{Pacing, settle};
use crate::session::{AutomationSession, click_if_present};

/// Location permission buttons, most preferred first. Labels differ between
/// Android releases.
pub const PERMISSION_BUTTONS: &[&str] = &["While using the app", "Only this time", "Allow", "ALLOW"];

/// Generic dismiss buttons.
pub const DISMISS_BUTTONS: &[&str] = &["OK", "Allow", "Accept", "Close", "Dismiss"];

/// Waits for a location permission prompt and accepts it. Returns the label
/// that was clicked.
pub async fn grant_location_permissions<S>(session: &S, pacing: &Pacing) -> Option<&'static str>
where
	S: AutomationSession + ?Sized,
{
	settle(pacing.dialog_appear).await;
	let clicked = click_first(session, PERMISSION_BUTTONS).await;
	match clicked {
		Some(label) => {
			info!(target = "storeshot", button = label, "granted location permission");
			settle(pacing.tap_settle).await;
		}
		None => debug!(target = "storeshot", "no permission dialog"),
	}
	clicked
}

/// Clicks the first generic dismiss button present, if any.
pub async fn dismiss_any_dialog<S>(session: &S, pacing: &Pacing) -> Option<&'static str>
where
	S: AutomationSession + ?Sized,
{
	let clicked = click_first(session, DISMISS_BUTTONS).await;
	if let Some(label) = clicked {
		debug!(target = "storeshot", button = label, "dismissed dialog");
		settle(pacing.tap_settle).await;
	}
	clicked
}

async fn click_first<S>(session: &S, labels: &[&'static str]) -> Option<&'static str>
where
	S: AutomationSession + ?Sized,
{
	for &label in labels {
		match click_if_present(session, &Selector::text(label)).await {
			Ok(true) => return Some(label),
			Ok(false) => {}
			Err(err) => debug!(target = "storeshot", button = label, error = %err, "dialog button lookup failed"),
		}
	}
	None
}
