//! W3C pointer action sequences for touch gestures.
//!
//! See <https://www.w3.org/TR/webdriver/#actions>

use serde::Serialize;

use crate::types::Point;

/// Pause inserted between touch down and up for a tap.
const TAP_HOLD_MS: u64 = 100;

/// Body of `POST /session/{id}/actions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionsRequest {
	pub actions: Vec<PointerSource>,
}

/// One input source with its tick-by-tick actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerSource {
	#[serde(rename = "type")]
	pub kind: &'static str,
	pub id: String,
	pub parameters: PointerParameters,
	pub actions: Vec<PointerAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerParameters {
	pub pointer_type: &'static str,
}

/// Single pointer action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
	PointerMove { duration: u64, x: i32, y: i32 },
	PointerDown { button: u8 },
	PointerUp { button: u8 },
	Pause { duration: u64 },
}

impl ActionsRequest {
	/// Single-finger drag from `from` to `to` taking `duration_ms`.
	pub fn swipe(from: Point, to: Point, duration_ms: u64) -> Self {
		Self::finger(vec![
			PointerAction::PointerMove {
				duration: 0,
				x: from.x,
				y: from.y,
			},
			PointerAction::PointerDown { button: 0 },
			PointerAction::PointerMove {
				duration: duration_ms,
				x: to.x,
				y: to.y,
			},
			PointerAction::PointerUp { button: 0 },
		])
	}

	/// Single-finger tap at `at`.
	pub fn tap(at: Point) -> Self {
		Self::finger(vec![
			PointerAction::PointerMove {
				duration: 0,
				x: at.x,
				y: at.y,
			},
			PointerAction::PointerDown { button: 0 },
			PointerAction::Pause { duration: TAP_HOLD_MS },
			PointerAction::PointerUp { button: 0 },
		])
	}

	fn finger(actions: Vec<PointerAction>) -> Self {
		Self {
			actions: vec![PointerSource {
				kind: "pointer",
				id: "finger1".to_string(),
				parameters: PointerParameters { pointer_type: "touch" },
				actions,
			}],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn swipe_serializes_as_touch_pointer() {
		let request = ActionsRequest::swipe(Point::new(540, 1482), Point::new(540, 798), 600);
		let json = serde_json::to_value(&request).unwrap();
		let source = &json["actions"][0];

		assert_eq!(source["type"], "pointer");
		assert_eq!(source["parameters"]["pointerType"], "touch");
		assert_eq!(
			source["actions"],
			serde_json::json!([
				{ "type": "pointerMove", "duration": 0, "x": 540, "y": 1482 },
				{ "type": "pointerDown", "button": 0 },
				{ "type": "pointerMove", "duration": 600, "x": 540, "y": 798 },
				{ "type": "pointerUp", "button": 0 },
			])
		);
	}

	#[test]
	fn tap_holds_briefly() {
		let request = ActionsRequest::tap(Point::new(10, 20));
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["actions"][0]["actions"][2], serde_json::json!({ "type": "pause", "duration": 100 }));
	}
}
