//! JSON configuration.
//!
//! Resolution order: `--config FILE`, then `./storeshot.json` if present, then
//! built-in defaults. Every field is optional in the file; command-line flags
//! override whatever the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storeshot::{AppIdentity, CaptureTarget, DeviceProfile, LocationPreset, Pacing, PLAY_STORE_MIN_SHORT_SIDE};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "storeshot.json";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4723";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
	pub server_url: String,
	/// HTTP timeout per WebDriver request, in seconds.
	pub request_timeout_secs: u64,
	pub app: AppIdentity,
	/// Name of the profile in `devices` to run on.
	pub device: String,
	pub devices: Vec<DeviceProfile>,
	pub locations: Vec<LocationPreset>,
	pub output_root: PathBuf,
	pub min_short_side: u32,
	pub pacing: Pacing,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			server_url: DEFAULT_SERVER_URL.to_string(),
			request_timeout_secs: 120,
			app: AppIdentity::default(),
			device: DeviceProfile::pixel_4().avd_name,
			devices: DeviceProfile::builtin(),
			locations: LocationPreset::builtin(),
			output_root: PathBuf::from("output"),
			min_short_side: PLAY_STORE_MIN_SHORT_SIDE,
			pacing: Pacing::default(),
		}
	}
}

impl Config {
	/// Loads the config for this invocation and applies flag overrides.
	pub fn resolve(cli: &Cli) -> Result<Self> {
		let cwd = std::env::current_dir()?;
		let mut config = Self::load(cli.config.as_deref(), &cwd)?;
		config.apply_overrides(cli);
		Ok(config)
	}

	/// Reads `explicit` if given, else `<dir>/storeshot.json` if it exists,
	/// else returns defaults.
	pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::read(path);
		}
		let implicit = dir.join(DEFAULT_CONFIG_FILE);
		if implicit.is_file() {
			return Self::read(&implicit);
		}
		debug!(target = "storeshot", "no config file, using defaults");
		Ok(Self::default())
	}

	fn read(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		let config = serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;
		debug!(target = "storeshot", path = %path.display(), "loaded config");
		Ok(config)
	}

	pub fn apply_overrides(&mut self, cli: &Cli) {
		if let Some(server) = &cli.server {
			self.server_url = server.clone();
		}
		if let Some(device) = &cli.device {
			self.device = device.clone();
		}
		if let Some(output) = &cli.output {
			self.output_root = output.clone();
		}
	}

	/// The selected device profile.
	pub fn profile(&self) -> Result<&DeviceProfile> {
		self.devices
			.iter()
			.find(|d| d.matches(&self.device))
			.ok_or_else(|| CliError::UnknownDevice {
				name: self.device.clone(),
				available: self
					.devices
					.iter()
					.map(|d| d.avd_name.as_str())
					.collect::<Vec<_>>()
					.join(", "),
			})
	}

	pub fn capture_target(&self) -> Result<CaptureTarget> {
		Ok(CaptureTarget::for_profile(&self.output_root, self.profile()?).with_min_short_side(self.min_short_side))
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}
