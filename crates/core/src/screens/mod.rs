//! Page objects for the TideRunner screens.
//!
//! Each screen borrows the session and the pacing for its lifetime; nothing
//! is cached between calls because the UI can change underneath at any time.

mod conditions;
mod map;

pub use conditions::{ConditionsPanel, Section, SuitabilityRating};
pub use map::{FILTER_BY_SPECIES, FISHING_CONDITIONS, MY_LOCATION, MapScreen};
