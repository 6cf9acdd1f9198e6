//! Subcommand implementations.
//!
//! Commands that talk to the device open exactly one Appium session, use it,
//! and always end it, even when the command itself failed.

mod clean;
mod find;
mod guard;
mod list;
mod locate;
mod run;
mod verify;

use serde::Serialize;
use storeshot_runtime::{RemoteSession, Transport};
use tracing::warn;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, OutputFormat, ResultBuilder};

pub async fn dispatch(cli: Cli) -> Result<()> {
	let format = cli.format;
	let config = Config::resolve(&cli)?;

	match cli.command {
		Commands::Run(args) => run::execute(&config, &args, format).await,
		Commands::Guard => guard::execute(&config, format).await,
		Commands::Find(args) => find::execute(&config, &args, format).await,
		Commands::Verify(args) => verify::execute(&config, &args, format).await,
		Commands::Locate(args) => locate::execute(&config, &args, format).await,
		Commands::Clean => clean::execute(&config, format),
		Commands::List => list::execute(&config, format),
	}
}

/// Starts a session for the configured device and app.
pub(crate) async fn open_session(config: &Config) -> Result<RemoteSession> {
	let profile = config.profile()?;
	let transport = Transport::new(&config.server_url, config.request_timeout())?;
	Ok(RemoteSession::create(transport, profile.capabilities(&config.app)).await?)
}

pub(crate) async fn close_session(session: RemoteSession) {
	if let Err(err) = session.quit().await {
		warn!(target = "storeshot", session = session.id(), error = %err, "failed to end session");
	}
}

/// Prints a successful envelope.
pub(crate) fn emit<T: Serialize>(command: &str, data: T, format: OutputFormat) {
	let result = ResultBuilder::new(command).data(data).build();
	output::print_result(&result, format);
}
