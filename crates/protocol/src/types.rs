//! Geometry and geolocation primitives used across the wire.

use serde::{Deserialize, Serialize};

/// Point on the device screen, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
	/// X coordinate
	pub x: i32,
	/// Y coordinate
	pub y: i32,
}

impl Point {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// Viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
	/// Viewport width
	pub width: u32,
	/// Viewport height
	pub height: u32,
}

impl Size {
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	/// Point at the given fractions of the viewport, truncated toward zero.
	///
	/// `fx` and `fy` are expected to lie in `0.0..=1.0`.
	pub fn fraction(&self, fx: f64, fy: f64) -> Point {
		Point {
			x: (f64::from(self.width) * fx) as i32,
			y: (f64::from(self.height) * fy) as i32,
		}
	}
}

/// Window rectangle as returned by `GET /session/{id}/window/rect`.
///
/// Servers report these as JSON numbers that may carry a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	/// Rounded viewport size of this rectangle.
	pub fn size(&self) -> Size {
		Size {
			width: self.width.max(0.0).round() as u32,
			height: self.height.max(0.0).round() as u32,
		}
	}
}

/// Simulated GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
	/// Latitude in decimal degrees
	pub latitude: f64,
	/// Longitude in decimal degrees
	pub longitude: f64,
	/// Altitude in metres
	#[serde(default)]
	pub altitude: f64,
}

impl Geolocation {
	/// Sea-level fix at the given coordinates.
	pub const fn new(latitude: f64, longitude: f64) -> Self {
		Self {
			latitude,
			longitude,
			altitude: 0.0,
		}
	}
}

/// Body of `POST /session/{id}/location`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SetLocationRequest {
	pub location: Geolocation,
}

/// Body of the Appium `activate_app` / `terminate_app` endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdRequest<'a> {
	pub app_id: &'a str,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fraction_truncates_like_integer_division() {
		let size = Size::new(1080, 2280);
		assert_eq!(size.fraction(0.5, 0.25), Point::new(540, 570));
		assert_eq!(size.fraction(0.88, 0.72), Point::new(950, 1641));
	}

	#[test]
	fn rect_deserializes_fractional_numbers() {
		let rect: Rect = serde_json::from_str(r#"{"x":0,"y":0,"width":1080.0,"height":2279.6}"#).unwrap();
		assert_eq!(rect.size(), Size::new(1080, 2280));
	}

	#[test]
	fn set_location_request_shape() {
		let body = SetLocationRequest {
			location: Geolocation::new(35.0196, -76.6989),
		};
		let json = serde_json::to_value(body).unwrap();
		assert_eq!(json["location"]["latitude"], 35.0196);
		assert_eq!(json["location"]["altitude"], 0.0);
	}

	#[test]
	fn app_id_request_uses_camel_case() {
		let json = serde_json::to_value(AppIdRequest { app_id: "com.example" }).unwrap();
		assert_eq!(json, serde_json::json!({ "appId": "com.example" }));
	}
}
