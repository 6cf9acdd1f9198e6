//! HTTP runtime for talking to an Appium server.
//!
//! [`Transport`] owns the HTTP client and the W3C envelope/error decoding;
//! [`RemoteSession`] layers one method per WebDriver endpoint on top of it.
//! Nothing here makes decisions about retries or app state: every call is a
//! single request/response round trip.

pub mod error;
pub mod session;
pub mod transport;

pub use error::{Error, Result};
pub use session::RemoteSession;
pub use transport::Transport;
