//! In-memory [`AutomationSession`] for tests and dry runs.
//!
//! [`ScriptedSession`] models just enough of a device to exercise the guard,
//! the poller, and the storyboard: which package is on top, which selectors
//! resolve, and how far the current screen has been scrolled. Every call is
//! recorded so tests can assert on exact interaction sequences.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageFormat, RgbaImage};
use parking_lot::Mutex;
use storeshot_protocol::{Geolocation, Point, Selector, Size};

use crate::error::Result;
use crate::session::{AutomationSession, ElementHandle};

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	ForegroundApp,
	Activate(String),
	Terminate(String),
	Find(Selector),
	Click(Selector),
	Swipe { from: Point, to: Point },
	Tap(Point),
	SetLocation(Geolocation),
	CaptureScreen,
	ViewportSize,
	Back,
}

#[derive(Debug)]
struct State {
	foreground: Option<String>,
	foreground_reads: VecDeque<Option<String>>,
	activate_failures: VecDeque<String>,
	terminate_failure: Option<String>,
	activate_foregrounds: bool,
	visible: HashSet<Selector>,
	revealed_after: HashMap<Selector, u32>,
	failing_lookups: HashSet<Selector>,
	scrolled: u32,
	viewport: Size,
	screen: Size,
	next_element: u64,
	calls: Vec<Call>,
}

/// Scripted device double.
#[derive(Debug)]
pub struct ScriptedSession {
	state: Mutex<State>,
}

impl Default for ScriptedSession {
	fn default() -> Self {
		Self::new()
	}
}

impl ScriptedSession {
	/// A device with nothing in the foreground and nothing on screen.
	pub fn new() -> Self {
		Self {
			state: Mutex::new(State {
				foreground: None,
				foreground_reads: VecDeque::new(),
				activate_failures: VecDeque::new(),
				terminate_failure: None,
				activate_foregrounds: true,
				visible: HashSet::new(),
				revealed_after: HashMap::new(),
				failing_lookups: HashSet::new(),
				scrolled: 0,
				viewport: Size::new(1080, 2280),
				screen: Size::new(1080, 2280),
				next_element: 0,
				calls: Vec::new(),
			}),
		}
	}

	pub fn with_foreground(self, package: &str) -> Self {
		self.state.lock().foreground = Some(package.to_string());
		self
	}

	/// Overrides the next foreground reads in order; afterwards the modelled
	/// foreground is reported again.
	pub fn queue_foreground_reads<'a>(self, reads: impl IntoIterator<Item = Option<&'a str>>) -> Self {
		self.state
			.lock()
			.foreground_reads
			.extend(reads.into_iter().map(|r| r.map(str::to_string)));
		self
	}

	/// The next `activate_app` fails with a remote error carrying `message`.
	/// Stacks: each call queues one more failure.
	pub fn fail_next_activate(self, message: &str) -> Self {
		self.state.lock().activate_failures.push_back(message.to_string());
		self
	}

	/// Every `terminate_app` fails.
	pub fn fail_terminate(self, message: &str) -> Self {
		self.state.lock().terminate_failure = Some(message.to_string());
		self
	}

	/// `activate_app` succeeds without changing the foreground app.
	pub fn activate_does_not_foreground(self) -> Self {
		self.state.lock().activate_foregrounds = false;
		self
	}

	/// `selector` resolves immediately.
	pub fn with_visible(self, selector: Selector) -> Self {
		self.state.lock().visible.insert(selector);
		self
	}

	/// Exact-text shorthand for [`with_visible`](Self::with_visible).
	pub fn with_text(self, text: &str) -> Self {
		self.with_visible(Selector::text(text))
	}

	/// `selector` resolves once the screen has been scrolled down `scrolls`
	/// times.
	pub fn reveal_after_scrolls(self, selector: Selector, scrolls: u32) -> Self {
		self.state.lock().revealed_after.insert(selector, scrolls);
		self
	}

	/// Lookups of `selector` fail with a session error.
	pub fn fail_lookup(self, selector: Selector) -> Self {
		self.state.lock().failing_lookups.insert(selector);
		self
	}

	/// Size of the PNG returned by `capture_screen`.
	pub fn with_screen(self, width: u32, height: u32) -> Self {
		self.state.lock().screen = Size::new(width, height);
		self
	}

	pub fn with_viewport(self, width: u32, height: u32) -> Self {
		self.state.lock().viewport = Size::new(width, height);
		self
	}

	/// Makes `selector` resolve from now on.
	pub fn show(&self, selector: Selector) {
		self.state.lock().visible.insert(selector);
	}

	pub fn hide(&self, selector: &Selector) {
		let mut state = self.state.lock();
		state.visible.remove(selector);
		state.revealed_after.remove(selector);
	}

	pub fn set_foreground(&self, package: Option<&str>) {
		self.state.lock().foreground = package.map(str::to_string);
	}

	/// All calls so far, oldest first.
	pub fn calls(&self) -> Vec<Call> {
		self.state.lock().calls.clone()
	}

	pub fn clear_calls(&self) {
		self.state.lock().calls.clear();
	}

	/// Downward scroll swipes performed so far, net of upward ones.
	pub fn scroll_position(&self) -> u32 {
		self.state.lock().scrolled
	}

	pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
		self.state.lock().calls.iter().filter(|c| predicate(c)).count()
	}

	/// Number of swipes of either direction.
	pub fn swipe_count(&self) -> usize {
		self.count(|c| matches!(c, Call::Swipe { .. }))
	}

	/// Number of element lookups of any selector.
	pub fn find_count(&self) -> usize {
		self.count(|c| matches!(c, Call::Find(_)))
	}
}

fn remote_error(message: &str) -> crate::Error {
	storeshot_runtime::Error::Remote {
		error: "unknown error".to_string(),
		message: message.to_string(),
		status: 500,
	}
	.into()
}

#[async_trait]
impl AutomationSession for ScriptedSession {
	async fn foreground_app(&self) -> Option<String> {
		let mut state = self.state.lock();
		state.calls.push(Call::ForegroundApp);
		match state.foreground_reads.pop_front() {
			Some(read) => read,
			None => state.foreground.clone(),
		}
	}

	async fn activate_app(&self, app_id: &str) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(Call::Activate(app_id.to_string()));
		if let Some(message) = state.activate_failures.pop_front() {
			return Err(remote_error(&message));
		}
		if state.activate_foregrounds {
			state.foreground = Some(app_id.to_string());
		}
		Ok(())
	}

	async fn terminate_app(&self, app_id: &str) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(Call::Terminate(app_id.to_string()));
		if let Some(message) = state.terminate_failure.clone() {
			return Err(remote_error(&message));
		}
		if state.foreground.as_deref() == Some(app_id) {
			state.foreground = None;
		}
		state.scrolled = 0;
		Ok(())
	}

	async fn find_element(&self, selector: &Selector) -> Result<Option<ElementHandle>> {
		let mut state = self.state.lock();
		state.calls.push(Call::Find(selector.clone()));
		if state.failing_lookups.contains(selector) {
			return Err(remote_error("lookup failed"));
		}
		let revealed = state
			.revealed_after
			.get(selector)
			.is_some_and(|after| state.scrolled >= *after);
		if !(state.visible.contains(selector) || revealed) {
			return Ok(None);
		}
		state.next_element += 1;
		Ok(Some(ElementHandle {
			id: format!("el-{}", state.next_element),
			selector: selector.clone(),
		}))
	}

	async fn click(&self, element: &ElementHandle) -> Result<()> {
		self.state.lock().calls.push(Call::Click(element.selector.clone()));
		Ok(())
	}

	async fn swipe(&self, from: Point, to: Point, _duration: Duration) -> Result<()> {
		let mut state = self.state.lock();
		state.calls.push(Call::Swipe { from, to });
		if from.y > to.y {
			state.scrolled += 1;
		} else if from.y < to.y {
			state.scrolled = state.scrolled.saturating_sub(1);
		}
		Ok(())
	}

	async fn tap(&self, at: Point) -> Result<()> {
		self.state.lock().calls.push(Call::Tap(at));
		Ok(())
	}

	async fn set_geolocation(&self, location: Geolocation) -> Result<()> {
		self.state.lock().calls.push(Call::SetLocation(location));
		Ok(())
	}

	async fn capture_screen(&self) -> Result<Vec<u8>> {
		let screen = {
			let mut state = self.state.lock();
			state.calls.push(Call::CaptureScreen);
			state.screen
		};
		Ok(png_bytes(screen.width, screen.height))
	}

	async fn viewport_size(&self) -> Result<Size> {
		let mut state = self.state.lock();
		state.calls.push(Call::ViewportSize);
		Ok(state.viewport)
	}

	async fn back(&self) -> Result<()> {
		self.state.lock().calls.push(Call::Back);
		Ok(())
	}
}

/// Encodes a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
	let image = RgbaImage::from_pixel(width, height, image::Rgba([16, 78, 139, 255]));
	let mut out = Cursor::new(Vec::new());
	// Encoding an in-memory RGBA buffer to PNG only fails on zero-sized images.
	if image.write_to(&mut out, ImageFormat::Png).is_err() {
		return Vec::new();
	}
	out.into_inner()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn reveal_tracks_net_scroll_position() {
		let session = ScriptedSession::new().reveal_after_scrolls(Selector::text("Sun & Moon"), 2);
		let down = (Point::new(540, 1482), Point::new(540, 798));

		assert!(session.find_element(&Selector::text("Sun & Moon")).await.unwrap().is_none());
		session.swipe(down.0, down.1, Duration::ZERO).await.unwrap();
		session.swipe(down.0, down.1, Duration::ZERO).await.unwrap();
		assert!(session.find_element(&Selector::text("Sun & Moon")).await.unwrap().is_some());

		session.swipe(down.1, down.0, Duration::ZERO).await.unwrap();
		assert_eq!(session.scroll_position(), 1);
		assert!(session.find_element(&Selector::text("Sun & Moon")).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn captured_png_has_requested_size() {
		let session = ScriptedSession::new().with_screen(1080, 1920);
		let bytes = session.capture_screen().await.unwrap();
		let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
		assert_eq!((decoded.width(), decoded.height()), (1080, 1920));
	}
}
