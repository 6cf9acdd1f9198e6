use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
	// 0 = errors only (shot failures still surface)
	// 1 (-v) = progress from storeshot, wire traffic hidden
	// 2+ (-vv) = everything, including every WebDriver request
	let filter = match verbosity {
		0 => "error",
		1 => "info,storeshot_runtime=warn,reqwest=warn,hyper=warn",
		_ => "debug,hyper=info",
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(false)
		.with_level(true)
		.compact()
		.init();
}
