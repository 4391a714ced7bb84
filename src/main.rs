use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use unshorten_cli::Unshortener;
use unshorten_cli::config::{
	Pattern, ResolveConfig, config_to_string, init_config, load_or_default, parse_config_file,
	parse_pattern_index, resolve_config_path, write_config_file,
};
use unshorten_cli::logging::init_logging;
use unshorten_cli::resolve::{HttpResolver, Resolver};

#[derive(Parser)]
#[command(name = "unshorten")]
#[command(
	author,
	version,
	about = "CLI tool for expanding shortened URLs in text to their redirect targets"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Config file to use instead of ~/.unshorten.toml
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Create a template config file
	#[arg(long)]
	init: bool,

	/// Overwrite an existing config file when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite the given text, or each line of stdin when no text is given
	Rewrite {
		/// Text to rewrite (joined with spaces)
		text: Vec<String>,
	},
	/// Resolve a single URL and print the result
	Resolve {
		url: String,

		/// Probe timeout, defaults to the configured value
		#[arg(long, value_name = "MS")]
		timeout_ms: Option<u64>,
	},
	/// List all patterns with their indices
	List,
	/// Enable the pattern at INDEX
	Enable { index: String },
	/// Disable the pattern at INDEX
	Disable { index: String },
	/// Remove the pattern at INDEX
	Remove { index: String },
	/// Append a new pattern
	Add {
		expression: String,

		/// Store the pattern disabled
		#[arg(long)]
		disabled: bool,
	},
	/// Replace the expression of the pattern at INDEX
	Edit { index: String, expression: String },
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective configuration
	Show,
	/// Check the config file for errors without rewriting anything
	Validate,
	/// Change global settings
	Set {
		/// Master switch for rewriting
		#[arg(long, value_name = "BOOL")]
		resolve_enabled: Option<bool>,

		/// Bound on each resolution probe
		#[arg(long, value_name = "MS")]
		timeout_ms: Option<u64>,
	},
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let config_path =
		resolve_config_path(cli.config.as_deref()).context("Failed to locate config file")?;

	// Handle --init
	if cli.init {
		return handle_init(&config_path, cli.force);
	}

	let Some(command) = cli.command else {
		// No command specified - this shouldn't happen due to arg_required_else_help
		return Ok(ExitCode::SUCCESS);
	};

	match command {
		Commands::Rewrite { text } => handle_rewrite(&config_path, &text),
		Commands::Resolve { url, timeout_ms } => handle_resolve(&config_path, &url, timeout_ms),
		Commands::List => handle_list(&config_path),
		Commands::Enable { index } => handle_switch(&config_path, &index, true),
		Commands::Disable { index } => handle_switch(&config_path, &index, false),
		Commands::Remove { index } => handle_remove(&config_path, &index),
		Commands::Add {
			expression,
			disabled,
		} => handle_add(&config_path, expression, disabled),
		Commands::Edit { index, expression } => handle_edit(&config_path, &index, &expression),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(&config_path),
			ConfigAction::Validate => handle_config_validate(&config_path),
			ConfigAction::Set {
				resolve_enabled,
				timeout_ms,
			} => handle_config_set(&config_path, resolve_enabled, timeout_ms),
		},
	}
}

fn load(path: &Path) -> Result<ResolveConfig> {
	load_or_default(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load, edit, and persist the config. Nothing is written if the edit fails.
fn modify<T>(
	path: &Path,
	edit: impl FnOnce(&mut ResolveConfig) -> unshorten_cli::Result<T>,
) -> Result<T> {
	let mut config = load(path)?;
	let value = edit(&mut config)?;
	write_config_file(path, &config)
		.with_context(|| format!("Failed to save {}", path.display()))?;
	Ok(value)
}

fn handle_init(path: &Path, force: bool) -> Result<ExitCode> {
	init_config(path, force).with_context(|| {
		format!(
			"Failed to create {} (use --force to overwrite)",
			path.display()
		)
	})?;
	println!("Created {}", path.display());
	Ok(ExitCode::SUCCESS)
}

fn handle_rewrite(path: &Path, text: &[String]) -> Result<ExitCode> {
	let config = load(path)?;
	let engine = Unshortener::with_http(config).context("Failed to set up resolver")?;

	if !text.is_empty() {
		println!("{}", engine.rewrite(&text.join(" ")));
		return Ok(ExitCode::SUCCESS);
	}

	// One stdin line is one message
	let stdin = std::io::stdin();
	let mut stdout = std::io::stdout().lock();
	for line in stdin.lock().lines() {
		let line = line.context("Failed to read stdin")?;
		writeln!(stdout, "{}", engine.rewrite(&line)).context("Failed to write stdout")?;
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_resolve(path: &Path, url: &str, timeout_ms: Option<u64>) -> Result<ExitCode> {
	let timeout_ms = match timeout_ms {
		Some(ms) => ms,
		None => load(path)?.timeout_ms,
	};
	let resolver = HttpResolver::new().context("Failed to set up resolver")?;
	let resolution = resolver.resolve(url, Duration::from_millis(timeout_ms));
	println!("{}", resolution.resolved);
	Ok(ExitCode::SUCCESS)
}

fn handle_list(path: &Path) -> Result<ExitCode> {
	let config = load(path)?;

	if config.patterns.is_empty() {
		println!("No patterns configured.");
		return Ok(ExitCode::SUCCESS);
	}

	for (i, pattern) in config.patterns.iter().enumerate() {
		println!("{}: {}", i, pattern);
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_switch(path: &Path, index: &str, enabled: bool) -> Result<ExitCode> {
	let index = parse_pattern_index(index)?;
	let pattern = modify(path, |config| {
		config.set_pattern_enabled(index, enabled).cloned()
	})?;
	let state = if enabled { "Enabled" } else { "Disabled" };
	println!("{} pattern {}", state, pattern.expression);
	Ok(ExitCode::SUCCESS)
}

fn handle_remove(path: &Path, index: &str) -> Result<ExitCode> {
	let index = parse_pattern_index(index)?;
	let pattern = modify(path, |config| config.remove_pattern(index))?;
	println!("Removed pattern {}", pattern.expression);
	Ok(ExitCode::SUCCESS)
}

fn handle_add(path: &Path, expression: String, disabled: bool) -> Result<ExitCode> {
	let pattern = Pattern {
		enabled: !disabled,
		expression,
	};
	let index = modify(path, |config| config.add_pattern(pattern))?;
	println!("Added pattern {}", index);
	Ok(ExitCode::SUCCESS)
}

fn handle_edit(path: &Path, index: &str, expression: &str) -> Result<ExitCode> {
	let index = parse_pattern_index(index)?;
	let pattern = modify(path, |config| {
		config.edit_pattern(index, expression).cloned()
	})?;
	println!("Saved pattern {}: {}", index, pattern);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(path: &Path) -> Result<ExitCode> {
	let config = load(path)?;

	if path.exists() {
		println!("# Source: {}", path.display());
	} else {
		println!("# Source: {} (not found, using defaults)", path.display());
	}
	println!("# patterns: {}", config.patterns.len());
	println!();
	print!("{}", config_to_string(&config)?);

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(path: &Path) -> Result<ExitCode> {
	if !path.exists() {
		println!("No configuration file found at {}", path.display());
		return Ok(ExitCode::SUCCESS);
	}

	match parse_config_file(path) {
		Ok(config) => {
			println!(
				"Configuration file is valid: {} ({} patterns)",
				path.display(),
				config.patterns.len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:?}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_config_set(
	path: &Path,
	resolve_enabled: Option<bool>,
	timeout_ms: Option<u64>,
) -> Result<ExitCode> {
	if resolve_enabled.is_none() && timeout_ms.is_none() {
		anyhow::bail!("Nothing to set. Use --resolve-enabled and/or --timeout-ms.");
	}

	let config = modify(path, |config| {
		if let Some(enabled) = resolve_enabled {
			config.resolve_enabled = enabled;
		}
		if let Some(ms) = timeout_ms {
			config.timeout_ms = ms;
		}
		Ok(config.clone())
	})?;

	println!(
		"resolve-enabled = {}, timeout-ms = {}",
		config.resolve_enabled, config.timeout_ms
	);
	Ok(ExitCode::SUCCESS)
}
