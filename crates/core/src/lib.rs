//! storeshot: app-store screenshot automation over Appium.
//!
//! Drives an Android app through a remote automation session and captures an
//! ordered set of validated PNG screenshots. The decision logic lives in two
//! places:
//!
//! - [`guard`]: makes sure the target app owns the screen, resuming or
//!   restarting it when it does not.
//! - [`poll`]: bounded "check, then scroll" search for on-screen content.
//!
//! Everything is written against the [`AutomationSession`] capability trait,
//! passed explicitly to every call. [`storeshot_runtime::RemoteSession`]
//! implements it over HTTP; [`testing::ScriptedSession`] implements it in
//! memory.
//!
//! # Example
//!
//! ```ignore
//! use storeshot::{AppIdentity, Descriptor, Pacing, ensure_foreground, find_by_scrolling};
//!
//! let pacing = Pacing::default();
//! let app = AppIdentity::new("com.fishing.conditions.debug");
//! let guard = ensure_foreground(&session, &app, &pacing).await;
//! let found = find_by_scrolling(&session, &Descriptor::new("Tide Information"), 6, &pacing).await;
//! ```

pub mod app;
pub mod capture;
pub mod dialogs;
pub mod error;
pub mod gestures;
pub mod guard;
pub mod location;
pub mod pacing;
pub mod poll;
pub mod profile;
pub mod screens;
pub mod session;
pub mod storyboard;
pub mod testing;
pub mod wait;

pub use app::AppIdentity;
pub use capture::{CaptureTarget, CapturedShot, PLAY_STORE_MIN_SHORT_SIDE, capture_shot, clear_output_folder};
pub use error::{Error, Result};
pub use guard::{GuardOutcome, ensure_foreground};
pub use location::{LocationPreset, SpotKind, set_location};
pub use pacing::Pacing;
pub use poll::{Descriptor, PollOutcome, check_all_visible, find_by_scrolling, is_present};
pub use profile::DeviceProfile;
pub use session::{AutomationSession, ElementHandle};
pub use storeshot_protocol::{Geolocation, Point, Selector, Size};
pub use storyboard::{RunContext, Shot, ShotOutcome, ShotReport, Step, Storyboard};
