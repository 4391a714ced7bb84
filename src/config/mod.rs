//! Configuration loading and persistence for unshorten.
//!
//! This module handles:
//! - TOML config file parsing and writing
//! - Pattern registry administration (add, remove, enable, disable, edit)
//! - Snapshot-consistent sharing of the config with the rewriter

pub mod parser;
pub mod shared;
pub mod store;
pub mod types;

pub use parser::{config_to_string, parse_config_file, parse_config_str, write_config_file};
pub use shared::{ConfigSnapshot, SharedConfig};
pub use store::{
	CONFIG_FILE_NAME, generate_init_template, init_config, load_or_default, resolve_config_path,
	user_config_path,
};
pub use types::{DEFAULT_TIMEOUT_MS, Pattern, ResolveConfig, parse_pattern_index};
