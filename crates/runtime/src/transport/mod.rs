//! JSON-over-HTTP transport for the W3C WebDriver wire protocol.
//!
//! Every response body is an envelope `{"value": ...}`. Success values are
//! decoded into the caller's type; failure values carry a W3C error body and
//! become [`Error::Remote`].


use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storeshot_protocol::{Envelope, ErrorBody};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Default per-request timeout. Session creation can boot an emulator-side
/// server, so this is generous.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client bound to one automation server.
#[derive(Debug, Clone)]
pub struct Transport {
	http: reqwest::Client,
	base: Url,
}

impl Transport {
	/// Creates a transport for `server` (e.g. `http://127.0.0.1:4723`).
	///
	/// A base path such as `/wd/hub` is preserved.
	pub fn new(server: &str, timeout: Duration) -> Result<Self> {
		let base = normalize_base(server)?;
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self { http, base })
	}

	/// Base URL every endpoint path is resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base
	}

	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(Method::GET, path, None::<&()>).await
	}

	pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		self.send(Method::POST, path, Some(body)).await
	}

	pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(Method::DELETE, path, None::<&()>).await
	}

	async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<T> {
		let url = self.endpoint(path)?;
		debug!(target = "storeshot", %method, path, "webdriver request");

		let mut request = self.http.request(method, url);
		if let Some(body) = body {
			request = request.json(body);
		}

		let response = request.send().await?;
		let status = response.status();
		let text = response.text().await?;
		debug!(target = "storeshot", status = status.as_u16(), bytes = text.len(), "webdriver response");

		decode_response(status, &text)
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self.base
			.join(path.trim_start_matches('/'))
			.map_err(|e| Error::Protocol(format!("bad endpoint path '{path}': {e}")))
	}
}

/// Decodes a response body given its HTTP status.
pub(crate) fn decode_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T> {
	if status.is_success() {
		let envelope: Envelope<T> = serde_json::from_str(text)?;
		return Ok(envelope.value);
	}

	match serde_json::from_str::<Envelope<ErrorBody>>(text) {
		Ok(envelope) => Err(Error::remote(envelope.value, status.as_u16())),
		Err(_) => Err(Error::Protocol(format!(
			"HTTP {} with unrecognised body: {}",
			status.as_u16(),
			truncate(text, 200)
		))),
	}
}

fn normalize_base(server: &str) -> Result<Url> {
	let mut base = Url::parse(server).map_err(|e| Error::InvalidServerUrl {
		url: server.to_string(),
		reason: e.to_string(),
	})?;

	if !matches!(base.scheme(), "http" | "https") {
		return Err(Error::InvalidServerUrl {
			url: server.to_string(),
			reason: format!("unsupported scheme '{}'", base.scheme()),
		});
	}

	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}
	Ok(base)
}

fn truncate(text: &str, max: usize) -> &str {
	match text.char_indices().nth(max) {
		Some((idx, _)) => &text[..idx],
		None => text,
	}
}
