//! Wire types for the Appium / W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable types exchanged with an Appium
//! server over HTTP. These types represent the "protocol layer": the shapes
//! of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization and selector rendering
//! - **1:1 with protocol**: Match the W3C WebDriver and Appium endpoint bodies
//! - **Stable**: Changes only when the wire protocol changes
//!
//! The HTTP client lives in `storeshot-runtime`; the automation logic built
//! on top of it lives in `storeshot`.

pub mod actions;
pub mod capabilities;
pub mod response;
pub mod selector;
pub mod types;

pub use actions::*;
pub use capabilities::*;
pub use response::*;
pub use selector::*;
pub use types::*;
