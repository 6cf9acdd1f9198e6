//! `storeshot run`: capture the storyboard.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use storeshot::{RunContext, ShotOutcome, ShotReport, Storyboard, clear_output_folder};
use tracing::info;

use crate::cli::RunArgs;
use crate::commands::{close_session, open_session};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{self, Artifact, ErrorCode, OutputFormat, ResultBuilder};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunData {
	pub device: String,
	pub output_dir: PathBuf,
	pub captured: usize,
	pub skipped: usize,
	pub failed: usize,
	pub shots: Vec<ShotReport>,
}

impl RunData {
	fn new(device: String, output_dir: PathBuf, shots: Vec<ShotReport>) -> Self {
		let count = |pred: fn(&ShotOutcome) -> bool| shots.iter().filter(|r| pred(&r.outcome)).count();
		Self {
			device,
			output_dir,
			captured: count(|o| matches!(o, ShotOutcome::Captured(_))),
			skipped: count(|o| matches!(o, ShotOutcome::Skipped { .. })),
			failed: count(|o| matches!(o, ShotOutcome::Failed { .. })),
			shots,
		}
	}
}

/// Picks the shots to run. Repeated numbers are accepted once; numbers that
/// are not in the storyboard are rejected.
pub(crate) fn storyboard(only: &[u32]) -> Result<Storyboard> {
	let board = Storyboard::standard();
	if only.is_empty() {
		return Ok(board);
	}
	let unknown: BTreeSet<u32> = only
		.iter()
		.copied()
		.filter(|n| !board.shots().iter().any(|s| s.number == *n))
		.collect();
	if !unknown.is_empty() {
		let unknown: Vec<String> = unknown.iter().map(u32::to_string).collect();
		return Err(CliError::InvalidInput(format!("unknown shot number(s): {}", unknown.join(", "))));
	}
	Ok(board.select(only))
}

pub async fn execute(config: &Config, args: &RunArgs, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	let board = storyboard(&args.only)?;
	let target = config.capture_target()?;
	let profile = config.profile()?;

	if args.clean {
		clear_output_folder(&target)?;
	}

	let session = open_session(config).await?;
	tokio::time::sleep(config.pacing.launch_settle).await;

	let ctx = RunContext {
		app: config.app.clone(),
		pacing: config.pacing.clone(),
		target: target.clone(),
		locations: config.locations.clone(),
	};
	let reports = board.run(&session, &ctx).await;
	close_session(session).await;
	let reports = reports?;

	let data = RunData::new(profile.device_name.clone(), target.dir(), reports);
	info!(
		target = "storeshot",
		captured = data.captured,
		skipped = data.skipped,
		failed = data.failed,
		"run finished"
	);

	let artifacts: Vec<Artifact> = data
		.shots
		.iter()
		.filter_map(|r| match &r.outcome {
			ShotOutcome::Captured(shot) => Some(Artifact::screenshot(&shot.path)),
			_ => None,
		})
		.collect();
	let incomplete = data.skipped + data.failed;
	let total = data.shots.len();

	let mut builder = ResultBuilder::new("run").started_at(started).data(data).artifacts(artifacts);
	if incomplete > 0 {
		builder = builder.error(ErrorCode::ShotsFailed, format!("{incomplete} of {total} shots were not captured"));
	}
	let result = builder.build();
	output::print_result(&result, format);

	if result.ok { Ok(()) } else { Err(CliError::OutputAlreadyPrinted) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use storeshot::GuardOutcome;

	#[test]
	fn selection_keeps_order_and_rejects_unknown_numbers() {
		let board = storyboard(&[4, 3]).unwrap();
		assert_eq!(board.shots().iter().map(|s| s.number).collect::<Vec<_>>(), vec![3, 4]);

		let err = storyboard(&[2, 11]).unwrap_err();
		assert_eq!(err.to_string(), "unknown shot number(s): 11");
	}

	#[test]
	fn repeated_shot_numbers_run_once() {
		let board = storyboard(&[4, 4]).unwrap();
		assert_eq!(board.shots().iter().map(|s| s.number).collect::<Vec<_>>(), vec![4]);

		let err = storyboard(&[12, 4, 12]).unwrap_err();
		assert_eq!(err.to_string(), "unknown shot number(s): 12");
	}

	#[test]
	fn run_data_counts_outcomes() {
		let report = |number, outcome| ShotReport {
			number,
			slug: format!("shot_{number}"),
			guard: GuardOutcome::AlreadyForeground,
			outcome,
		};
		let data = RunData::new(
			"Pixel 4".into(),
			PathBuf::from("output/phone"),
			vec![
				report(
					1,
					ShotOutcome::Captured(storeshot::CapturedShot {
						path: PathBuf::from("output/phone/01_shot_1.png"),
						width: 1080,
						height: 2280,
					}),
				),
				report(2, ShotOutcome::Skipped { reason: "no data".into() }),
				report(3, ShotOutcome::Failed { reason: "missing".into() }),
			],
		);

		assert_eq!((data.captured, data.skipped, data.failed), (1, 1, 1));
	}
}
