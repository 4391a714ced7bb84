use crate::config::parser::parse_config_file;
use crate::config::types::ResolveConfig;
use crate::error::{Result, UnshortenError};
use std::path::{Path, PathBuf};

/// File name of the user config under the home directory.
pub const CONFIG_FILE_NAME: &str = ".unshorten.toml";

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(UnshortenError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

/// Pick the explicit path when given, otherwise the user config path.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
	match explicit {
		Some(path) => Ok(path.to_path_buf()),
		None => user_config_path(),
	}
}

/// Load the config at `path`, falling back to defaults when the file is absent.
pub fn load_or_default(path: &Path) -> Result<ResolveConfig> {
	if path.exists() {
		parse_config_file(path)
	} else {
		tracing::debug!("no config at {}, using defaults", path.display());
		Ok(ResolveConfig::default())
	}
}

/// Write the template config to `path`. Refuses to overwrite unless `force`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
	if path.exists() && !force {
		return Err(UnshortenError::ConfigExists {
			path: path.to_path_buf(),
		});
	}

	std::fs::write(path, generate_init_template()).map_err(|source| {
		UnshortenError::ConfigWriteError {
			path: path.to_path_buf(),
			source,
		}
	})?;
	tracing::info!("created config at {}", path.display());
	Ok(())
}

/// Template written by `--init`.
pub fn generate_init_template() -> String {
	r#"# unshorten configuration
#
# Patterns are applied in the order listed. Each match is probed with a single
# HEAD request; a 301 response with a Location header replaces the match.

# Master switch. When false, text is never rewritten.
resolve-enabled = true

# Bound on each probe, in milliseconds.
timeout-ms = 1000

# [[patterns]]
# enabled = true
# expression = 'https?://bit\.ly/[\w-]+'

# [[patterns]]
# enabled = false
# expression = 'https?://t\.co/\w+'
"#
	.to_string()
}
