//! Command-line front end for the storeshot screenshot runner.
//!
//! The binary is a thin shell: it parses arguments, loads the JSON config,
//! opens one Appium session, and hands it to the `storeshot` library.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod styles;
