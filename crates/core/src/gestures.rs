//! Touch gestures expressed relative to the viewport.

use tracing::debug;

use crate::error::Result;
use crate::pacing::{Pacing, settle};
use crate::session::AutomationSession;
use storeshot_protocol::Point;

/// Vertical swipe band as fractions of the viewport height. A scroll moves
/// the content by the distance between the two.
pub const SWIPE_LOW: f64 = 0.65;
pub const SWIPE_HIGH: f64 = 0.35;

/// Direction the content moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
	/// Reveal content further down (finger moves up).
	Down,
	/// Reveal content further up (finger moves down).
	Up,
}

/// Performs one scroll swipe and waits for the content to settle.
pub async fn scroll_once<S>(session: &S, direction: ScrollDirection, pacing: &Pacing) -> Result<()>
where
	S: AutomationSession + ?Sized,
{
	let viewport = session.viewport_size().await?;
	let low = viewport.fraction(0.5, SWIPE_LOW);
	let high = viewport.fraction(0.5, SWIPE_HIGH);
	let (from, to) = match direction {
		ScrollDirection::Down => (low, high),
		ScrollDirection::Up => (high, low),
	};
	debug!(target = "storeshot", ?direction, from_y = from.y, to_y = to.y, "swipe");
	session.swipe(from, to, pacing.swipe_duration).await?;
	settle(pacing.swipe_settle).await;
	Ok(())
}

pub async fn scroll_down<S>(session: &S, swipes: u32, pacing: &Pacing) -> Result<()>
where
	S: AutomationSession + ?Sized,
{
	for _ in 0..swipes {
		scroll_once(session, ScrollDirection::Down, pacing).await?;
	}
	Ok(())
}

pub async fn scroll_up<S>(session: &S, swipes: u32, pacing: &Pacing) -> Result<()>
where
	S: AutomationSession + ?Sized,
{
	for _ in 0..swipes {
		scroll_once(session, ScrollDirection::Up, pacing).await?;
	}
	Ok(())
}

/// Taps at a point given as fractions of the viewport.
pub async fn tap_relative<S>(session: &S, fx: f64, fy: f64) -> Result<Point>
where
	S: AutomationSession + ?Sized,
{
	let at = session.viewport_size().await?.fraction(fx, fy);
	session.tap(at).await?;
	Ok(at)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, ScriptedSession};

	#[tokio::test]
	async fn scroll_down_swipes_upward_through_the_middle_band() {
		let session = ScriptedSession::new().with_viewport(1000, 2000);

		scroll_down(&session, 2, &Pacing::immediate()).await.unwrap();

		let swipes: Vec<_> = session
			.calls()
			.into_iter()
			.filter(|c| matches!(c, Call::Swipe { .. }))
			.collect();
		assert_eq!(
			swipes,
			vec![
				Call::Swipe {
					from: Point::new(500, 1300),
					to: Point::new(500, 700),
				};
				2
			]
		);
	}

	#[tokio::test]
	async fn scroll_up_reverses_the_band() {
		let session = ScriptedSession::new().with_viewport(1000, 2000);

		scroll_up(&session, 1, &Pacing::immediate()).await.unwrap();

		assert!(session.calls().contains(&Call::Swipe {
			from: Point::new(500, 700),
			to: Point::new(500, 1300),
		}));
	}

	#[tokio::test]
	async fn tap_relative_scales_to_viewport() {
		let session = ScriptedSession::new().with_viewport(1080, 2280);

		let at = tap_relative(&session, 0.5, 0.25).await.unwrap();

		assert_eq!(at, Point::new(540, 570));
		assert!(session.calls().contains(&Call::Tap(at)));
	}
}
