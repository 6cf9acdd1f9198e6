//! Visibility poller: bounded "check, then scroll" search for on-screen content.
//!
//! A [`Descriptor`] is a piece of user-visible text. It resolves to an element
//! by trying, in order, an exact text match, a substring match, and an
//! accessibility label. Absence is never an error here: lookups that fail at
//! the session layer count as "not present" and are logged.

use std::fmt;

use serde::{Deserialize, Serialize};
use storeshot_protocol::Selector;
use tracing::{debug, info, warn};

use crate::gestures::{ScrollDirection, scroll_once};
use crate::pacing::{Pacing, settle};
use crate::session::{AutomationSession, ElementHandle};

/// Text that identifies one on-screen element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(String);

impl Descriptor {
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Lookup order: exact text, substring text, accessibility label.
	pub fn selectors(&self) -> [Selector; 3] {
		[
			Selector::text(&self.0),
			Selector::text_contains(&self.0),
			Selector::accessibility(&self.0),
		]
	}
}

impl fmt::Display for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Descriptor {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

/// Result of a scroll-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "scrolls")]
pub enum PollOutcome {
	/// Found after this many scroll gestures (0 when already visible).
	FoundAfter(u32),
	NotFoundAfterMax,
}

impl PollOutcome {
	pub fn is_found(self) -> bool {
		matches!(self, PollOutcome::FoundAfter(_))
	}
}

/// Resolves `descriptor` on the current screen. One call is one presence
/// check.
pub async fn resolve<S>(session: &S, descriptor: &Descriptor) -> Option<ElementHandle>
where
	S: AutomationSession + ?Sized,
{
	for selector in descriptor.selectors() {
		match session.find_element(&selector).await {
			Ok(Some(element)) => return Some(element),
			Ok(None) => {}
			Err(err) => {
				warn!(target = "storeshot", %selector, error = %err, "element lookup failed, treating as absent");
			}
		}
	}
	None
}

/// Whether `descriptor` resolves on the current screen.
pub async fn is_present<S>(session: &S, descriptor: &Descriptor) -> bool
where
	S: AutomationSession + ?Sized,
{
	resolve(session, descriptor).await.is_some()
}

/// Scrolls down until `descriptor` is visible, issuing at most `max_attempts`
/// scroll gestures and `max_attempts + 1` presence checks.
pub async fn find_by_scrolling<S>(
	session: &S,
	descriptor: &Descriptor,
	max_attempts: u32,
	pacing: &Pacing,
) -> PollOutcome
where
	S: AutomationSession + ?Sized,
{
	for scrolls in 0..max_attempts {
		if is_present(session, descriptor).await {
			debug!(target = "storeshot", %descriptor, scrolls, "found");
			return PollOutcome::FoundAfter(scrolls);
		}
		if let Err(err) = scroll_once(session, ScrollDirection::Down, pacing).await {
			warn!(target = "storeshot", %descriptor, error = %err, "scroll failed");
		}
		settle(pacing.search_settle).await;
	}

	if is_present(session, descriptor).await {
		debug!(target = "storeshot", %descriptor, scrolls = max_attempts, "found");
		return PollOutcome::FoundAfter(max_attempts);
	}

	info!(target = "storeshot", %descriptor, max_attempts, "not found after scrolling");
	PollOutcome::NotFoundAfterMax
}

/// Returns the descriptors that do not resolve on the current screen, in
/// input order. Never scrolls.
pub async fn check_all_visible<S>(session: &S, descriptors: &[Descriptor]) -> Vec<Descriptor>
where
	S: AutomationSession + ?Sized,
{
	let mut missing = Vec::new();
	for descriptor in descriptors {
		if !is_present(session, descriptor).await {
			missing.push(descriptor.clone());
		}
	}
	if !missing.is_empty() {
		debug!(target = "storeshot", missing = ?missing, "elements not visible");
	}
	missing
}
