//! Timed waits for elements to appear or disappear.

use std::time::Duration;

use storeshot_protocol::Selector;
use tokio::time::Instant;
use tracing::debug;

use crate::pacing::settle;
use crate::session::{AutomationSession, ElementHandle};

/// Class name of the indeterminate loading spinner.
pub const PROGRESS_BAR_CLASS: &str = "android.widget.ProgressBar";

/// Polls for `selector` every `interval` until it resolves or `timeout`
/// elapses. Lookup errors count as "not yet".
pub async fn wait_for<S>(session: &S, selector: &Selector, timeout: Duration, interval: Duration) -> Option<ElementHandle>
where
	S: AutomationSession + ?Sized,
{
	let deadline = Instant::now() + timeout;
	loop {
		match session.find_element(selector).await {
			Ok(Some(element)) => return Some(element),
			Ok(None) => {}
			Err(err) => debug!(target = "storeshot", %selector, error = %err, "lookup failed while waiting"),
		}
		if Instant::now() >= deadline {
			debug!(target = "storeshot", %selector, ?timeout, "wait timed out");
			return None;
		}
		settle(interval.max(Duration::from_millis(1))).await;
	}
}

pub async fn wait_for_text<S>(session: &S, text: &str, timeout: Duration, interval: Duration) -> Option<ElementHandle>
where
	S: AutomationSession + ?Sized,
{
	wait_for(session, &Selector::text(text), timeout, interval).await
}

pub async fn wait_for_accessibility_id<S>(
	session: &S,
	label: &str,
	timeout: Duration,
	interval: Duration,
) -> Option<ElementHandle>
where
	S: AutomationSession + ?Sized,
{
	wait_for(session, &Selector::accessibility(label), timeout, interval).await
}

/// Polls until `selector` no longer resolves. Returns `false` if it is still
/// present when `timeout` elapses.
pub async fn wait_until_gone<S>(session: &S, selector: &Selector, timeout: Duration, interval: Duration) -> bool
where
	S: AutomationSession + ?Sized,
{
	let deadline = Instant::now() + timeout;
	loop {
		if let Ok(None) = session.find_element(selector).await {
			return true;
		}
		if Instant::now() >= deadline {
			debug!(target = "storeshot", %selector, ?timeout, "still present after timeout");
			return false;
		}
		settle(interval.max(Duration::from_millis(1))).await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::ScriptedSession;

	#[tokio::test(start_paused = true)]
	async fn wait_for_text_gives_up_after_timeout() {
		let session = ScriptedSession::new();
		let started = Instant::now();

		let found = wait_for_text(&session, "Current Conditions", Duration::from_secs(2), Duration::from_millis(500)).await;

		assert!(found.is_none());
		assert!(started.elapsed() >= Duration::from_secs(2));
		assert_eq!(session.find_count(), 5);
	}

	#[tokio::test]
	async fn wait_for_returns_visible_element_immediately() {
		let session = ScriptedSession::new().with_visible(Selector::accessibility("Filter"));

		let found = wait_for_accessibility_id(&session, "Filter", Duration::from_secs(5), Duration::from_millis(500)).await;

		assert_eq!(found.map(|e| e.selector), Some(Selector::accessibility("Filter")));
		assert_eq!(session.find_count(), 1);
	}

	#[tokio::test]
	async fn spinner_gone_when_absent() {
		let session = ScriptedSession::new();
		let spinner = Selector::class_name(PROGRESS_BAR_CLASS);

		assert!(wait_until_gone(&session, &spinner, Duration::from_secs(1), Duration::from_millis(10)).await);
	}

	#[tokio::test(start_paused = true)]
	async fn spinner_that_never_clears_times_out() {
		let spinner = Selector::class_name(PROGRESS_BAR_CLASS);
		let session = ScriptedSession::new().with_visible(spinner.clone());

		assert!(!wait_until_gone(&session, &spinner, Duration::from_secs(1), Duration::from_millis(250)).await);
	}
}
