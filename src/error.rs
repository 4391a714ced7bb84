use std::path::PathBuf;

/// Library-level structured errors for unshorten.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum UnshortenError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to write config file: {path}")]
	ConfigWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to serialize config")]
	ConfigSerializeError {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Config file already exists: {path}")]
	ConfigExists { path: PathBuf },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid pattern index: {input:?}")]
	InvalidPatternIndex { input: String },

	#[error("Pattern index {index} out of range ({len} patterns configured)")]
	PatternIndexOutOfRange { index: usize, len: usize },

	#[error("Failed to build HTTP client")]
	HttpClient {
		#[source]
		source: reqwest::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using UnshortenError.
pub type Result<T> = std::result::Result<T, UnshortenError>;
