//! Help output colours.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;

/// Cargo-like help styling: bold green headings, cyan literals and
/// placeholders.
pub fn cli_styles() -> Styles {
	let accent = AnsiColor::Cyan.on_default();
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(accent)
		.placeholder(accent)
		.valid(accent)
		.invalid(AnsiColor::Yellow.on_default().bold())
		.error(AnsiColor::Red.on_default().bold())
}
