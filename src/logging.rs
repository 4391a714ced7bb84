//! Logging init: stderr, filtered by `RUST_LOG` or the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "warn,unshorten_cli=debug,unshorten=debug",
		_ => "warn,unshorten_cli=trace,unshorten=trace",
	}
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flag.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_ansi(false)
		.try_init();
}
