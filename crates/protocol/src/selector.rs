//! Element selectors and their W3C locator encoding.
//!
//! Text lookups go through the UiAutomator2 `-android uiautomator` strategy,
//! which takes a Java `UiSelector` expression as its value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Locator strategy name for UiSelector expressions.
pub const ANDROID_UIAUTOMATOR: &str = "-android uiautomator";
/// Locator strategy name for content descriptions.
pub const ACCESSIBILITY_ID: &str = "accessibility id";

/// How to look up a single on-screen element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "camelCase")]
pub enum Selector {
	/// Visible text equal to the value.
	ExactText(String),
	/// Visible text containing the value.
	TextContains(String),
	/// Content description (accessibility label).
	AccessibilityId(String),
	/// Android widget class, e.g. `android.widget.ProgressBar`.
	ClassName(String),
}

impl Selector {
	pub fn text(value: impl Into<String>) -> Self {
		Self::ExactText(value.into())
	}

	pub fn text_contains(value: impl Into<String>) -> Self {
		Self::TextContains(value.into())
	}

	pub fn accessibility(value: impl Into<String>) -> Self {
		Self::AccessibilityId(value.into())
	}

	pub fn class_name(value: impl Into<String>) -> Self {
		Self::ClassName(value.into())
	}

	/// Encodes this selector as a W3C `{using, value}` locator.
	pub fn to_locator(&self) -> Locator {
		match self {
			Self::ExactText(text) => Locator::uiautomator(format!("new UiSelector().text({})", java_string(text))),
			Self::TextContains(text) => {
				Locator::uiautomator(format!("new UiSelector().textContains({})", java_string(text)))
			}
			Self::ClassName(class) => Locator::uiautomator(format!("new UiSelector().className({})", java_string(class))),
			Self::AccessibilityId(id) => Locator {
				using: ACCESSIBILITY_ID.to_string(),
				value: id.clone(),
			},
		}
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ExactText(v) => write!(f, "text={v:?}"),
			Self::TextContains(v) => write!(f, "text~={v:?}"),
			Self::AccessibilityId(v) => write!(f, "a11y={v:?}"),
			Self::ClassName(v) => write!(f, "class={v:?}"),
		}
	}
}

/// Body of `POST /session/{id}/element`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
	pub using: String,
	pub value: String,
}

impl Locator {
	fn uiautomator(expression: String) -> Self {
		Self {
			using: ANDROID_UIAUTOMATOR.to_string(),
			value: expression,
		}
	}
}

/// Quotes `raw` as a Java string literal.
fn java_string(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len() + 2);
	out.push('"');
	for ch in raw.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			_ => out.push(ch),
		}
	}
	out.push('"');
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exact_text_uses_uiselector() {
		let locator = Selector::text("Tide Information").to_locator();
		assert_eq!(locator.using, "-android uiautomator");
		assert_eq!(locator.value, r#"new UiSelector().text("Tide Information")"#);
	}

	#[test]
	fn contains_and_class_selectors() {
		assert_eq!(
			Selector::text_contains("Red Drum").to_locator().value,
			r#"new UiSelector().textContains("Red Drum")"#
		);
		assert_eq!(
			Selector::class_name("android.widget.ProgressBar").to_locator().value,
			r#"new UiSelector().className("android.widget.ProgressBar")"#
		);
	}

	#[test]
	fn accessibility_id_passes_value_through() {
		let locator = Selector::accessibility("My Location").to_locator();
		assert_eq!(locator.using, "accessibility id");
		assert_eq!(locator.value, "My Location");
	}

	#[test]
	fn quotes_are_escaped_inside_uiselector() {
		let locator = Selector::text(r#"Say "hi" \o/"#).to_locator();
		assert_eq!(locator.value, r#"new UiSelector().text("Say \"hi\" \\o/")"#);
	}
}
