#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

#[derive(Parser, Debug)]
#[command(name = "storeshot")]
#[command(about = "Capture Play Store screenshots of the TideRunner app over Appium")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: json (default) or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Config file (defaults to ./storeshot.json when present)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Appium server URL
	#[arg(long, global = true, value_name = "URL")]
	pub server: Option<String>,

	/// Device profile (AVD or device name)
	#[arg(long, global = true, value_name = "NAME")]
	pub device: Option<String>,

	/// Root directory for screenshots
	#[arg(short, long, global = true, value_name = "DIR")]
	pub output: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run the screenshot storyboard
	Run(RunArgs),

	/// Make sure the app is in the foreground, restarting it if needed
	Guard,

	/// Scroll down until TEXT is on screen
	Find(FindArgs),

	/// Check that every TEXT is on the current screen (no scrolling)
	Verify(VerifyArgs),

	/// Move the device to a location preset or coordinates
	Locate(LocateArgs),

	/// Delete screenshots in the device output folder
	Clean,

	/// List storyboard shots, location presets, and device profiles
	List,
}

impl Commands {
	/// Name used in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Run(_) => "run",
			Commands::Guard => "guard",
			Commands::Find(_) => "find",
			Commands::Verify(_) => "verify",
			Commands::Locate(_) => "locate",
			Commands::Clean => "clean",
			Commands::List => "list",
		}
	}
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
	/// Only run these shot numbers (comma separated)
	#[arg(long, value_delimiter = ',', value_name = "N")]
	pub only: Vec<u32>,

	/// Delete existing screenshots before running
	#[arg(long)]
	pub clean: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
	/// Text, substring, or accessibility label to look for
	pub text: String,

	/// Maximum number of scroll gestures
	#[arg(long, default_value_t = 8, value_name = "N")]
	pub max_swipes: u32,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
	/// Texts that must all be visible
	#[arg(required = true)]
	pub texts: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
	/// Location preset key (see `storeshot list`)
	#[arg(conflicts_with_all = ["lat", "lon"], required_unless_present_all = ["lat", "lon"])]
	pub preset: Option<String>,

	/// Latitude in degrees
	#[arg(long, requires = "lon", allow_negative_numbers = true)]
	pub lat: Option<f64>,

	/// Longitude in degrees
	#[arg(long, requires = "lat", allow_negative_numbers = true)]
	pub lon: Option<f64>,
}
