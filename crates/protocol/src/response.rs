//! Response envelopes and error bodies.

use serde::{Deserialize, Deserializer, Serialize};

/// W3C web element identifier key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
/// Pre-W3C (JSONWP) element identifier key, still emitted by some servers.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// W3C error code for a failed element lookup.
pub const NO_SUCH_ELEMENT: &str = "no such element";

/// Every WebDriver response wraps its payload in `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
	pub value: T,
}

/// `value` of a failed WebDriver response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	pub error: String,
	#[serde(default)]
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stacktrace: Option<String>,
}

impl ErrorBody {
	pub fn is_no_such_element(&self) -> bool {
		self.error == NO_SUCH_ELEMENT
	}
}

/// Reference to a located element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementReference {
	pub id: String,
}

impl<'de> Deserialize<'de> for ElementReference {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
		map.get(ELEMENT_KEY)
			.or_else(|| map.get(LEGACY_ELEMENT_KEY))
			.and_then(|v| v.as_str())
			.map(|id| ElementReference { id: id.to_string() })
			.ok_or_else(|| serde::de::Error::custom("response value is not an element reference"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn element_reference_reads_w3c_key() {
		let env: Envelope<ElementReference> =
			serde_json::from_str(r#"{"value":{"element-6066-11e4-a52e-4f735466cecf":"00000000-0001"}}"#).unwrap();
		assert_eq!(env.value.id, "00000000-0001");
	}

	#[test]
	fn element_reference_accepts_legacy_key() {
		let r: ElementReference = serde_json::from_str(r#"{"ELEMENT":"42"}"#).unwrap();
		assert_eq!(r.id, "42");
	}

	#[test]
	fn element_reference_rejects_other_shapes() {
		assert!(serde_json::from_str::<ElementReference>(r#"{"id":"42"}"#).is_err());
	}

	#[test]
	fn error_body_detects_missing_element() {
		let env: Envelope<ErrorBody> = serde_json::from_str(
			r#"{"value":{"error":"no such element","message":"An element could not be located","stacktrace":"..."}}"#,
		)
		.unwrap();
		assert!(env.value.is_no_such_element());
	}
}
