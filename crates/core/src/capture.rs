//! Screenshot capture, validation, and output folder management.
//!
//! Files are named `{nn}_{slug}.png` and grouped per device profile:
//! `<root>/<folder>/01_map_overview.png`. A capture is decoded and checked
//! against the store's minimum size before anything is written, so an
//! undersized image never lands in the output folder.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::profile::DeviceProfile;
use crate::session::AutomationSession;

/// Google Play requires at least this many pixels on the short side.
pub const PLAY_STORE_MIN_SHORT_SIDE: u32 = 1000;

/// Where and how strictly screenshots are saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
	pub root: PathBuf,
	/// Per-profile subdirectory, e.g. `phone`.
	pub folder: String,
	pub min_short_side: u32,
}

impl CaptureTarget {
	pub fn new(root: impl Into<PathBuf>, folder: impl Into<String>) -> Self {
		Self {
			root: root.into(),
			folder: folder.into(),
			min_short_side: PLAY_STORE_MIN_SHORT_SIDE,
		}
	}

	pub fn for_profile(root: impl Into<PathBuf>, profile: &DeviceProfile) -> Self {
		Self::new(root, profile.output_folder.clone())
	}

	pub fn with_min_short_side(mut self, min: u32) -> Self {
		self.min_short_side = min;
		self
	}

	/// Directory the PNG files go into.
	pub fn dir(&self) -> PathBuf {
		self.root.join(&self.folder)
	}

	pub fn path_for(&self, number: u32, slug: &str) -> PathBuf {
		self.dir().join(shot_file_name(number, slug))
	}
}

/// A screenshot written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedShot {
	pub path: PathBuf,
	pub width: u32,
	pub height: u32,
}

/// `{number:02}_{slug}.png`, with the slug normalised.
pub fn shot_file_name(number: u32, slug: &str) -> String {
	format!("{number:02}_{}.png", slugify(slug))
}

/// Placeholder for slugs with no alphanumeric characters.
pub const FALLBACK_SLUG: &str = "shot";

/// Lowercases `raw` and collapses every run of non-alphanumeric characters
/// into a single underscore. Never empty: falls back to [`FALLBACK_SLUG`].
pub fn slugify(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut pending_sep = false;
	for ch in raw.chars() {
		if ch.is_ascii_alphanumeric() {
			if pending_sep && !out.is_empty() {
				out.push('_');
			}
			pending_sep = false;
			out.push(ch.to_ascii_lowercase());
		} else {
			pending_sep = true;
		}
	}
	if out.is_empty() {
		return FALLBACK_SLUG.to_string();
	}
	out
}

/// Decodes `bytes` as PNG and checks the short side against `min_short_side`.
/// Returns the image dimensions.
pub fn validate_png(name: &str, bytes: &[u8], min_short_side: u32) -> Result<(u32, u32)> {
	let decode_err = |source| Error::ImageDecode {
		name: name.to_string(),
		source,
	};
	let image = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
		.decode()
		.map_err(decode_err)?;
	let (width, height) = (image.width(), image.height());
	if width.min(height) < min_short_side {
		return Err(Error::ImageTooSmall {
			name: name.to_string(),
			width,
			height,
			min: min_short_side,
		});
	}
	Ok((width, height))
}

/// Captures the current screen and saves it as shot `number`.
///
/// Compliance failures ([`Error::ImageTooSmall`], [`Error::ImageDecode`])
/// are returned without writing the file.
pub async fn capture_shot<S>(session: &S, target: &CaptureTarget, number: u32, slug: &str) -> Result<CapturedShot>
where
	S: AutomationSession + ?Sized,
{
	let path = target.path_for(number, slug);
	let name = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| slug.to_string());

	let bytes = session.capture_screen().await?;
	let (width, height) = validate_png(&name, &bytes, target.min_short_side)?;

	let dir = target.dir();
	tokio::fs::create_dir_all(&dir)
		.await
		.map_err(|source| Error::Write { path: dir.clone(), source })?;
	tokio::fs::write(&path, &bytes)
		.await
		.map_err(|source| Error::Write { path: path.clone(), source })?;

	info!(target = "storeshot", file = %name, width, height, "saved screenshot");
	Ok(CapturedShot { path, width, height })
}

/// Removes every `*.png` in the target's folder. Returns how many were
/// removed; a missing folder counts as empty.
pub fn clear_output_folder(target: &CaptureTarget) -> Result<usize> {
	let dir = target.dir();
	if !dir.is_dir() {
		return Ok(0);
	}
	let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.png");
	let mut removed = 0;
	for entry in glob::glob(&pattern.to_string_lossy())? {
		let path = entry?;
		std::fs::remove_file(&path)?;
		debug!(target = "storeshot", path = %path.display(), "removed");
		removed += 1;
	}
	info!(target = "storeshot", dir = %dir.display(), removed, "cleared output folder");
	Ok(removed)
}
