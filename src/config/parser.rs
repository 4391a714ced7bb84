use crate::config::types::ResolveConfig;
use crate::error::{Result, UnshortenError};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<ResolveConfig> {
	let content =
		std::fs::read_to_string(path).map_err(|source| UnshortenError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<ResolveConfig> {
	let config: ResolveConfig =
		toml::from_str(content).map_err(|source| UnshortenError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Stored expressions must always compile
	config.validate()?;

	Ok(config)
}

/// Serialize a config to its TOML form.
pub fn config_to_string(config: &ResolveConfig) -> Result<String> {
	toml::to_string(config).map_err(|source| UnshortenError::ConfigSerializeError { source })
}

/// Write a config to the given path, replacing any existing file.
pub fn write_config_file(path: &Path, config: &ResolveConfig) -> Result<()> {
	let content = config_to_string(config)?;
	std::fs::write(path, content).map_err(|source| UnshortenError::ConfigWriteError {
		path: path.to_path_buf(),
		source,
	})
}
