//! The ordered screenshot storyboard and its runner.
//!
//! Shots run strictly in order because each one starts from the screen the
//! previous one left behind. Before every shot the foreground guard runs;
//! after its steps, the shot's expected elements are checked and the screen
//! is captured. A shot that cannot be produced is reported as skipped or
//! failed and the run moves on. Only compliance errors (a capture that does
//! not meet the store's image requirements) abort the batch.

use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::app::AppIdentity;
use crate::capture::{CaptureTarget, CapturedShot, capture_shot};
use crate::dialogs::dismiss_any_dialog;
use crate::error::{Error, Result};
use crate::guard::{GuardOutcome, ensure_foreground};
use crate::location::LocationPreset;
use crate::pacing::{Pacing, settle};
use crate::poll::{Descriptor, check_all_visible};
use crate::screens::{ConditionsPanel, FILTER_BY_SPECIES, FISHING_CONDITIONS, MapScreen, Section};
use crate::session::AutomationSession;
use crate::wait::wait_for_text;

/// Time the species dropdown gets to animate open.
const DROPDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// One interaction performed as part of a shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "step")]
pub enum Step {
	/// Accept the first-launch location permission prompt.
	FirstLaunch,
	WaitForMapTiles,
	OpenSpeciesFilter,
	/// Wait for `text`; the shot fails if it never appears.
	AwaitText {
		text: String,
		#[serde(with = "crate::pacing::millis")]
		timeout: Duration,
	},
	/// Pick a species, falling back to a partial-name match.
	ChooseSpecies { name: String, fragment: String },
	/// Move to a location preset and wait for its forecast; the shot is
	/// skipped if the forecast never loads.
	GoTo { preset: String },
	EnsureExpanded,
	ScrollToTop,
	ScrollTo { section: Section },
	/// Let a freshly scrolled section finish rendering.
	SectionSettle,
	Back,
}

/// One screenshot of the storyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
	pub number: u32,
	pub slug: String,
	/// What the screenshot shows.
	pub title: String,
	pub steps: Vec<Step>,
	/// Must all be on screen before capturing.
	pub expect: Vec<Descriptor>,
	/// Run after capturing to restore the screen for the next shot.
	pub after: Vec<Step>,
}

impl Shot {
	fn new(number: u32, slug: &str, title: &str) -> Self {
		Self {
			number,
			slug: slug.to_string(),
			title: title.to_string(),
			steps: Vec::new(),
			expect: Vec::new(),
			after: Vec::new(),
		}
	}

	fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
		self.steps.extend(steps);
		self
	}

	fn expect(mut self, texts: &[&str]) -> Self {
		self.expect.extend(texts.iter().copied().map(Descriptor::from));
		self
	}

	fn after(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
		self.after.extend(steps);
		self
	}

	/// `{nn}_{slug}.png`
	pub fn file_name(&self) -> String {
		crate::capture::shot_file_name(self.number, &self.slug)
	}
}

/// How one shot ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ShotOutcome {
	Captured(CapturedShot),
	Skipped { reason: String },
	Failed { reason: String },
}

impl ShotOutcome {
	pub fn is_captured(&self) -> bool {
		matches!(self, ShotOutcome::Captured(_))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotReport {
	pub number: u32,
	pub slug: String,
	pub guard: GuardOutcome,
	pub outcome: ShotOutcome,
}

/// Everything a run needs besides the session.
#[derive(Debug, Clone)]
pub struct RunContext {
	pub app: AppIdentity,
	pub pacing: Pacing,
	pub target: CaptureTarget,
	pub locations: Vec<LocationPreset>,
}

/// Result of executing a step list.
enum Flow {
	Continue,
	Skip(String),
	Fail(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Storyboard {
	shots: Vec<Shot>,
}

impl Storyboard {
	pub fn new(shots: Vec<Shot>) -> Self {
		Self { shots }
	}

	/// The ten Play Store shots.
	pub fn standard() -> Self {
		use Step::*;

		let neuse = || GoTo {
			preset: "neuse-river".to_string(),
		};
		let section = |section| [EnsureExpanded, ScrollTo { section }, SectionSettle];

		Self::new(vec![
			Shot::new(1, "map_overview_tap_any_spot_to_get_your_forecast", "Map overview on launch")
				.steps([FirstLaunch, WaitForMapTiles])
				.expect(&[FILTER_BY_SPECIES]),
			Shot::new(2, "choose_your_target_species_from_16_fish", "Species selector open")
				.steps([
					OpenSpeciesFilter,
					AwaitText {
						text: "Redfish (Red Drum)".to_string(),
						timeout: DROPDOWN_TIMEOUT,
					},
				])
				.after([Back]),
			Shot::new(
				3,
				"neuse_river_nc_inshore_redfish_suitability_score",
				"Neuse River redfish suitability score",
			)
			.steps([
				ChooseSpecies {
					name: "Redfish (Red Drum)".to_string(),
					fragment: "Red Drum".to_string(),
				},
				neuse(),
				EnsureExpanded,
				ScrollToTop,
				SectionSettle,
			])
			.expect(&[FISHING_CONDITIONS, "Fishing Suitability"]),
			Shot::new(
				4,
				"neuse_river_nc_best_fishing_times_solunar_graph",
				"Best fishing times graph",
			)
			.steps(section(Section::FishingTimes))
			.expect(&[Section::FishingTimes.heading()]),
			Shot::new(5, "neuse_river_nc_real_time_marine_conditions", "Marine conditions")
				.steps(section(Section::MarineConditions))
				.expect(&[Section::MarineConditions.heading()]),
			Shot::new(6, "neuse_river_nc_tide_high_low_times", "Tide information")
				.steps(section(Section::TideInformation))
				.expect(&[Section::TideInformation.heading()]),
			Shot::new(
				7,
				"moon_phase_sunrise_sunset_and_solunar_feeding_periods",
				"Sun, moon and solunar periods",
			)
			.steps(section(Section::SunAndMoon))
			.expect(&[Section::SunAndMoon.heading()]),
			Shot::new(
				8,
				"ten_day_forecast_strip_with_confidence_percentage",
				"Ten-day forecast date selector",
			)
			.steps(section(Section::DateSelector))
			.expect(&[Section::DateSelector.heading(), "Today"]),
			Shot::new(9, "frying_pan_tower_offshore_mahi_mahi_forecast", "Frying Pan Tower offshore forecast")
				.steps([
					ChooseSpecies {
						name: "Mahi Mahi (Dolphin Fish)".to_string(),
						fragment: "Mahi".to_string(),
					},
					GoTo {
						preset: "frying-pan-tower".to_string(),
					},
					EnsureExpanded,
					ScrollToTop,
					SectionSettle,
				])
				.expect(&[FISHING_CONDITIONS, "Fishing Suitability"]),
			Shot::new(
				10,
				"frying_pan_tower_offshore_wave_height_wind_conditions",
				"Frying Pan Tower marine conditions",
			)
			.steps(section(Section::MarineConditions))
			.expect(&[Section::MarineConditions.heading()]),
		])
	}

	pub fn shots(&self) -> &[Shot] {
		&self.shots
	}

	/// Keeps only the shots with the given numbers, in storyboard order.
	pub fn select(self, numbers: &[u32]) -> Self {
		Self {
			shots: self.shots.into_iter().filter(|s| numbers.contains(&s.number)).collect(),
		}
	}

	/// Runs every shot in order.
	///
	/// Returns an error only for compliance failures; every other problem is
	/// recorded in that shot's report.
	pub async fn run<S>(&self, session: &S, ctx: &RunContext) -> Result<Vec<ShotReport>>
	where
		S: AutomationSession + ?Sized,
	{
		let mut reports = Vec::with_capacity(self.shots.len());
		for shot in &self.shots {
			let report = run_shot(session, ctx, shot).await?;
			match &report.outcome {
				ShotOutcome::Captured(captured) => {
					info!(target = "storeshot", shot = shot.number, path = %captured.path.display(), "captured");
				}
				ShotOutcome::Skipped { reason } => {
					warn!(target = "storeshot", shot = shot.number, reason = %reason, "skipped");
				}
				ShotOutcome::Failed { reason } => {
					error!(target = "storeshot", shot = shot.number, reason = %reason, "failed");
				}
			}
			reports.push(report);
		}
		Ok(reports)
	}
}

async fn run_shot<S>(session: &S, ctx: &RunContext, shot: &Shot) -> Result<ShotReport>
where
	S: AutomationSession + ?Sized,
{
	let report = |guard, outcome| ShotReport {
		number: shot.number,
		slug: shot.slug.clone(),
		guard,
		outcome,
	};

	let guard = ensure_foreground(session, &ctx.app, &ctx.pacing).await;
	if !guard.is_ready() {
		let reason = format!("{} is not in the foreground and could not be restarted", ctx.app.package);
		return Ok(report(guard, ShotOutcome::Failed { reason }));
	}
	if guard == GuardOutcome::ResumedAfterRestart {
		// A cold start can come back behind a crash or rating prompt.
		dismiss_any_dialog(session, &ctx.pacing).await;
	}

	match run_steps(session, ctx, &shot.steps).await {
		Ok(Flow::Continue) => {}
		Ok(Flow::Skip(reason)) => return Ok(report(guard, ShotOutcome::Skipped { reason })),
		Ok(Flow::Fail(reason)) => return Ok(report(guard, ShotOutcome::Failed { reason })),
		Err(err) => return demote(err).map(|reason| report(guard, ShotOutcome::Failed { reason })),
	}

	let missing = check_all_visible(session, &shot.expect).await;
	if !missing.is_empty() {
		let names: Vec<&str> = missing.iter().map(Descriptor::as_str).collect();
		let reason = format!("expected elements not visible: {}", names.join(", "));
		return Ok(report(guard, ShotOutcome::Failed { reason }));
	}

	let outcome = match capture_shot(session, &ctx.target, shot.number, &shot.slug).await {
		Ok(captured) => ShotOutcome::Captured(captured),
		Err(err) => ShotOutcome::Failed { reason: demote(err)? },
	};

	if let Err(err) = run_steps(session, ctx, &shot.after).await {
		warn!(target = "storeshot", shot = shot.number, error = %err, "cleanup step failed");
	}

	Ok(report(guard, outcome))
}

/// Turns a recoverable error into a failure reason; compliance errors pass
/// through.
fn demote(err: Error) -> Result<String> {
	if err.is_compliance() { Err(err) } else { Ok(err.to_string()) }
}

async fn run_steps<S>(session: &S, ctx: &RunContext, steps: &[Step]) -> Result<Flow>
where
	S: AutomationSession + ?Sized,
{
	let pacing = &ctx.pacing;
	let map = MapScreen::new(session, pacing);
	let panel = ConditionsPanel::new(session, pacing);

	for step in steps {
		match step {
			Step::FirstLaunch => {
				map.handle_first_launch().await;
			}
			Step::WaitForMapTiles => map.wait_for_map_tiles().await,
			Step::OpenSpeciesFilter => map.open_species_filter().await?,
			Step::AwaitText { text, timeout } => {
				if wait_for_text(session, text, *timeout, pacing.poll_interval).await.is_none() {
					return Ok(Flow::Fail(format!("'{text}' did not appear within {timeout:?}")));
				}
			}
			Step::ChooseSpecies { name, fragment } => {
				map.choose_species(name, fragment).await?;
			}
			Step::GoTo { preset } => {
				let preset = LocationPreset::lookup(&ctx.locations, preset)?;
				map.set_location_and_tap_my_location(preset.geolocation()).await?;
				if !map.wait_for_conditions_to_load().await {
					return Ok(Flow::Skip(format!("{} conditions did not load", preset.name)));
				}
			}
			Step::EnsureExpanded => {
				if !panel.is_visible().await {
					return Ok(Flow::Fail("conditions panel is not open".to_string()));
				}
				panel.ensure_expanded().await?;
			}
			Step::ScrollToTop => panel.scroll_to_top().await?,
			Step::ScrollTo { section } => {
				panel.scroll_to(*section).await;
			}
			Step::SectionSettle => settle(pacing.section_settle).await,
			Step::Back => {
				session.back().await?;
				settle(pacing.back_settle).await;
			}
		}
	}
	Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, ScriptedSession};
	use storeshot_protocol::Selector;

	const PKG: &str = "com.fishing.conditions.debug";

	fn context(root: &std::path::Path) -> RunContext {
		RunContext {
			app: AppIdentity::new(PKG),
			pacing: Pacing::immediate(),
			target: CaptureTarget::new(root, "phone"),
			locations: LocationPreset::builtin(),
		}
	}

	/// A device on which every expected element is already on screen.
	fn happy_device() -> ScriptedSession {
		let mut session = ScriptedSession::new().with_foreground(PKG);
		for shot in Storyboard::standard().shots() {
			for descriptor in &shot.expect {
				session = session.with_text(descriptor.as_str());
			}
		}
		session.with_text("Redfish (Red Drum)").with_text("Mahi Mahi (Dolphin Fish)")
	}

	#[test]
	fn standard_storyboard_is_ordered_and_uniquely_named() {
		let board = Storyboard::standard();
		let numbers: Vec<u32> = board.shots().iter().map(|s| s.number).collect();
		assert_eq!(numbers, (1..=10).collect::<Vec<_>>());

		let mut names: Vec<String> = board.shots().iter().map(Shot::file_name).collect();
		assert_eq!(names[0], "01_map_overview_tap_any_spot_to_get_your_forecast.png");
		names.dedup();
		assert_eq!(names.len(), 10);
	}

	#[test]
	fn select_keeps_storyboard_order() {
		let board = Storyboard::standard().select(&[9, 2]);
		let numbers: Vec<u32> = board.shots().iter().map(|s| s.number).collect();
		assert_eq!(numbers, vec![2, 9]);
	}

	#[tokio::test]
	async fn happy_run_captures_every_shot() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();

		let reports = Storyboard::standard().run(&session, &context(tmp.path())).await.unwrap();

		assert_eq!(reports.len(), 10);
		assert!(reports.iter().all(|r| r.outcome.is_captured()), "{reports:#?}");
		assert!(reports.iter().all(|r| r.guard == GuardOutcome::AlreadyForeground));
		assert!(tmp.path().join("phone/06_neuse_river_nc_tide_high_low_times.png").is_file());
		assert!(session.calls().contains(&Call::Back));
	}

	#[tokio::test]
	async fn guard_runs_before_each_shot() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device().with_foreground("com.android.launcher");

		let reports = Storyboard::standard()
			.select(&[1, 4])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert_eq!(reports[0].guard, GuardOutcome::ResumedFast);
		assert_eq!(reports[1].guard, GuardOutcome::AlreadyForeground);
	}

	#[tokio::test]
	async fn restart_failure_fails_the_shot_without_running_steps() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device()
			.with_foreground("com.android.launcher")
			.fail_next_activate("crashed")
			.fail_next_activate("crashed again");

		let reports = Storyboard::standard()
			.select(&[2])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert_eq!(reports[0].guard, GuardOutcome::RestartFailed);
		assert!(matches!(reports[0].outcome, ShotOutcome::Failed { .. }));
		assert_eq!(session.count(|c| matches!(c, Call::Find(_))), 0);
		assert_eq!(session.count(|c| matches!(c, Call::CaptureScreen)), 0);
	}

	#[tokio::test]
	async fn forecast_that_never_loads_skips_the_shot() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();
		session.hide(&Selector::text(FISHING_CONDITIONS));

		let reports = Storyboard::standard()
			.select(&[1, 3])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert!(reports[0].outcome.is_captured());
		assert!(matches!(reports[1].outcome, ShotOutcome::Skipped { ref reason } if reason.contains("Neuse River")));
	}

	#[tokio::test]
	async fn section_shot_without_open_panel_fails_before_scrolling() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();
		session.hide(&Selector::text(FISHING_CONDITIONS));

		let reports = Storyboard::standard()
			.select(&[4])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert!(matches!(reports[0].outcome, ShotOutcome::Failed { ref reason } if reason.contains("not open")));
		assert_eq!(session.swipe_count(), 0);
		assert_eq!(session.count(|c| matches!(c, Call::CaptureScreen)), 0);
	}

	#[tokio::test]
	async fn rerun_after_the_forecast_recovers() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();
		session.hide(&Selector::text(FISHING_CONDITIONS));
		let board = Storyboard::standard().select(&[3]);

		let first = board.run(&session, &context(tmp.path())).await.unwrap();
		assert!(matches!(first[0].outcome, ShotOutcome::Skipped { .. }));

		session.show(Selector::text(FISHING_CONDITIONS));
		session.set_foreground(Some("com.android.launcher"));
		session.clear_calls();
		let second = board.run(&session, &context(tmp.path())).await.unwrap();

		assert_eq!(second[0].guard, GuardOutcome::ResumedFast);
		assert!(second[0].outcome.is_captured(), "{second:#?}");
		assert_eq!(session.calls()[0], Call::ForegroundApp);
	}

	#[tokio::test]
	async fn cold_restart_clears_leftover_dialog() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device()
			.with_foreground("com.android.launcher")
			.fail_next_activate("not responding")
			.with_text("OK");

		let reports = Storyboard::standard()
			.select(&[4, 5])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert_eq!(reports[0].guard, GuardOutcome::ResumedAfterRestart);
		assert_eq!(reports[1].guard, GuardOutcome::AlreadyForeground);
		assert!(reports.iter().all(|r| r.outcome.is_captured()), "{reports:#?}");
		assert_eq!(session.count(|c| *c == Call::Click(Selector::text("OK"))), 1);
	}

	#[tokio::test]
	async fn missing_section_fails_only_that_shot() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();
		session.hide(&Selector::text("Tide Information"));

		let reports = Storyboard::standard()
			.select(&[5, 6, 7])
			.run(&session, &context(tmp.path()))
			.await
			.unwrap();

		assert!(reports[0].outcome.is_captured());
		assert!(
			matches!(reports[1].outcome, ShotOutcome::Failed { ref reason } if reason.contains("Tide Information"))
		);
		assert!(reports[2].outcome.is_captured());
		// The poller gave up at the section's bound.
		assert!(session.swipe_count() >= Section::TideInformation.max_swipes() as usize);
	}

	#[tokio::test]
	async fn undersized_screen_aborts_the_batch() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device().with_screen(720, 1280);

		let err = Storyboard::standard().run(&session, &context(tmp.path())).await.unwrap_err();

		assert!(err.is_compliance());
		assert_eq!(session.count(|c| matches!(c, Call::CaptureScreen)), 1);
	}

	#[tokio::test]
	async fn unknown_preset_fails_the_shot() {
		let tmp = tempfile::tempdir().unwrap();
		let session = happy_device();
		let board = Storyboard::new(vec![
			Shot::new(1, "nowhere", "Nowhere").steps([Step::GoTo {
				preset: "atlantis".to_string(),
			}]),
		]);

		let reports = board.run(&session, &context(tmp.path())).await.unwrap();

		assert!(matches!(reports[0].outcome, ShotOutcome::Failed { ref reason } if reason.contains("atlantis")));
	}
}
