//! The slide-up conditions panel shown after a forecast loads.

use std::fmt;

use serde::Serialize;
use storeshot_protocol::Selector;
use tracing::debug;

use crate::error::Result;
use crate::gestures::scroll_up;
use crate::pacing::{Pacing, settle};
use crate::poll::{Descriptor, PollOutcome, find_by_scrolling};
use crate::session::{AutomationSession, click_if_present};

use super::map::FISHING_CONDITIONS;

/// Swipes needed to bring the panel back to its top.
const SCROLL_TO_TOP_SWIPES: u32 = 4;

/// A titled section of the panel and how far down it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
	FishingTimes,
	DateSelector,
	MarineConditions,
	TideInformation,
	SunAndMoon,
	SolunarPeriods,
}

impl Section {
	pub fn heading(self) -> &'static str {
		match self {
			Self::FishingTimes => "Best Fishing Times Today",
			Self::DateSelector => "Select Forecast Date",
			Self::MarineConditions => "Marine Conditions",
			Self::TideInformation => "Tide Information",
			Self::SunAndMoon => "Sun & Moon",
			Self::SolunarPeriods => "Solunar Periods",
		}
	}

	/// Upper bound of scroll gestures when searching from the top.
	pub fn max_swipes(self) -> u32 {
		match self {
			Self::FishingTimes | Self::DateSelector => 4,
			Self::MarineConditions => 5,
			Self::TideInformation => 6,
			Self::SunAndMoon => 7,
			Self::SolunarPeriods => 8,
		}
	}

	pub fn descriptor(self) -> Descriptor {
		Descriptor::new(self.heading())
	}
}

/// Label on the suitability score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuitabilityRating {
	Excellent,
	Good,
	Fair,
	Poor,
}

impl SuitabilityRating {
	pub const ALL: [SuitabilityRating; 4] = [Self::Excellent, Self::Good, Self::Fair, Self::Poor];

	pub fn label(self) -> &'static str {
		match self {
			Self::Excellent => "EXCELLENT",
			Self::Good => "GOOD",
			Self::Fair => "FAIR",
			Self::Poor => "POOR",
		}
	}
}

impl fmt::Display for SuitabilityRating {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

pub struct ConditionsPanel<'a, S: ?Sized> {
	session: &'a S,
	pacing: &'a Pacing,
}

impl<'a, S> ConditionsPanel<'a, S>
where
	S: AutomationSession + ?Sized,
{
	pub fn new(session: &'a S, pacing: &'a Pacing) -> Self {
		Self { session, pacing }
	}

	pub async fn is_visible(&self) -> bool {
		matches!(
			self.session.find_element(&Selector::text(FISHING_CONDITIONS)).await,
			Ok(Some(_))
		)
	}

	/// Expands the panel. Returns `false` if it was already expanded.
	pub async fn expand(&self) -> Result<bool> {
		let clicked = click_if_present(self.session, &Selector::accessibility("Expand")).await?;
		if clicked {
			settle(self.pacing.tap_settle).await;
			debug!(target = "storeshot", "expanded conditions panel");
		}
		Ok(clicked)
	}

	/// Collapses the panel. Returns `false` if it was already collapsed.
	pub async fn collapse(&self) -> Result<bool> {
		let clicked = click_if_present(self.session, &Selector::accessibility("Collapse")).await?;
		if clicked {
			settle(self.pacing.tap_settle).await;
			debug!(target = "storeshot", "collapsed conditions panel");
		}
		Ok(clicked)
	}

	pub async fn ensure_expanded(&self) -> Result<()> {
		self.expand().await?;
		Ok(())
	}

	pub async fn scroll_to_top(&self) -> Result<()> {
		scroll_up(self.session, SCROLL_TO_TOP_SWIPES, self.pacing).await
	}

	/// Scrolls down until `section`'s heading is visible.
	pub async fn scroll_to(&self, section: Section) -> PollOutcome {
		find_by_scrolling(self.session, &section.descriptor(), section.max_swipes(), self.pacing).await
	}

	/// The rating label currently shown on the score badge.
	pub async fn suitability_rating(&self) -> Option<SuitabilityRating> {
		for rating in SuitabilityRating::ALL {
			if let Ok(Some(_)) = self.session.find_element(&Selector::text(rating.label())).await {
				return Some(rating);
			}
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, ScriptedSession};

	#[tokio::test]
	async fn expand_only_clicks_when_collapsed() {
		let pacing = Pacing::immediate();

		let collapsed = ScriptedSession::new().with_visible(Selector::accessibility("Expand"));
		assert!(ConditionsPanel::new(&collapsed, &pacing).expand().await.unwrap());

		let expanded = ScriptedSession::new().with_visible(Selector::accessibility("Collapse"));
		let panel = ConditionsPanel::new(&expanded, &pacing);
		panel.ensure_expanded().await.unwrap();
		assert_eq!(expanded.count(|c| matches!(c, Call::Click(_))), 0);
		assert!(panel.collapse().await.unwrap());
	}

	#[tokio::test]
	async fn scroll_to_section_respects_its_bound() {
		let session = ScriptedSession::new();
		let pacing = Pacing::immediate();

		let outcome = ConditionsPanel::new(&session, &pacing).scroll_to(Section::SolunarPeriods).await;

		assert_eq!(outcome, PollOutcome::NotFoundAfterMax);
		assert_eq!(session.swipe_count(), 8);
	}

	#[tokio::test]
	async fn scroll_to_top_then_section() {
		let session = ScriptedSession::new().reveal_after_scrolls(Selector::text("Tide Information"), 3);
		let pacing = Pacing::immediate();
		let panel = ConditionsPanel::new(&session, &pacing);

		panel.scroll_to_top().await.unwrap();
		assert_eq!(session.swipe_count(), 4);

		assert_eq!(panel.scroll_to(Section::TideInformation).await, PollOutcome::FoundAfter(3));
	}

	#[tokio::test]
	async fn rating_prefers_the_first_label_found() {
		let session = ScriptedSession::new().with_text("FAIR").with_text("GOOD");
		let pacing = Pacing::immediate();

		let rating = ConditionsPanel::new(&session, &pacing).suitability_rating().await;

		assert_eq!(rating, Some(SuitabilityRating::Good));
	}
}
