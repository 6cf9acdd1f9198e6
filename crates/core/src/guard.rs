//! Foreground guard: make sure the app under test owns the screen.
//!
//! Dialogs, OS interruptions, and crashes routinely push the app out of the
//! foreground during a long batch. The guard checks once and, on a mismatch,
//! escalates through two recovery tiers:
//!
//! 1. fast resume: `activate_app`, settle, re-check;
//! 2. full restart: `terminate_app` (errors ignored), settle, `activate_app`,
//!    longer settle, re-check.
//!
//! The guard never returns an error. Session failures become outcomes or
//! warnings.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::AppIdentity;
use crate::pacing::{Pacing, settle};
use crate::session::AutomationSession;

/// Result of one guard invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GuardOutcome {
	/// The app was already in the foreground; nothing was done.
	AlreadyForeground,
	/// `activate_app` alone brought the app back.
	ResumedFast,
	/// The app had to be terminated and relaunched.
	ResumedAfterRestart,
	/// The relaunch failed; the app may not be on screen.
	RestartFailed,
}

impl GuardOutcome {
	/// Whether the app is (believed to be) in the foreground afterwards.
	pub fn is_ready(self) -> bool {
		!matches!(self, GuardOutcome::RestartFailed)
	}
}

impl fmt::Display for GuardOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AlreadyForeground => write!(f, "already foreground"),
			Self::ResumedFast => write!(f, "resumed"),
			Self::ResumedAfterRestart => write!(f, "restarted"),
			Self::RestartFailed => write!(f, "restart failed"),
		}
	}
}

/// Ensures `app` is the foreground app, resuming or restarting it if not.
pub async fn ensure_foreground<S>(session: &S, app: &AppIdentity, pacing: &Pacing) -> GuardOutcome
where
	S: AutomationSession + ?Sized,
{
	if is_foreground(session, app).await {
		return GuardOutcome::AlreadyForeground;
	}

	info!(target = "storeshot", app = %app.package, "app not in foreground, attempting resume");
	if try_fast_resume(session, app, pacing).await {
		info!(target = "storeshot", app = %app.package, "app resumed via activate");
		return GuardOutcome::ResumedFast;
	}

	info!(target = "storeshot", app = %app.package, "performing full app restart");
	if let Err(err) = session.terminate_app(&app.package).await {
		debug!(target = "storeshot", error = %err, "terminate failed (app likely not running)");
	}
	settle(pacing.terminate_settle).await;

	if let Err(err) = session.activate_app(&app.package).await {
		warn!(target = "storeshot", app = %app.package, error = %err, "could not restart app");
		return GuardOutcome::RestartFailed;
	}
	settle(pacing.restart_settle).await;

	if is_foreground(session, app).await {
		info!(target = "storeshot", app = %app.package, "app restarted");
		GuardOutcome::ResumedAfterRestart
	} else {
		warn!(target = "storeshot", app = %app.package, "app still not in foreground after restart");
		GuardOutcome::RestartFailed
	}
}

async fn try_fast_resume<S>(session: &S, app: &AppIdentity, pacing: &Pacing) -> bool
where
	S: AutomationSession + ?Sized,
{
	if let Err(err) = session.activate_app(&app.package).await {
		warn!(target = "storeshot", app = %app.package, error = %err, "activate failed");
		return false;
	}
	settle(pacing.resume_settle).await;
	is_foreground(session, app).await
}

async fn is_foreground<S>(session: &S, app: &AppIdentity) -> bool
where
	S: AutomationSession + ?Sized,
{
	let current = session.foreground_app().await;
	let matches = current.as_deref() == Some(app.package.as_str());
	if !matches {
		debug!(
			target = "storeshot",
			current = current.as_deref().unwrap_or("<unknown>"),
			expected = %app.package,
			"foreground mismatch"
		);
	}
	matches
}
