use crate::error::{Result, UnshortenError};
use crate::rules::matcher::compile_regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bound on a single resolution probe, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Top-level configuration from an `.unshorten.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolveConfig {
	/// Master switch. When false, text passes through untouched.
	#[serde(default = "default_true")]
	pub resolve_enabled: bool,

	/// Bound on each resolution network probe, shared by all patterns.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,

	/// Rewrite rules. Insertion order is the order they are applied in.
	#[serde(default)]
	pub patterns: Vec<Pattern>,
}

/// A single rewrite rule: a case-insensitive regex plus an enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pattern {
	/// Whether this rule participates in rewriting.
	#[serde(default = "default_true")]
	pub enabled: bool,

	/// Regex matched against the text, case-insensitively.
	#[serde(default)]
	pub expression: String,
}

fn default_true() -> bool {
	true
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

impl Default for ResolveConfig {
	fn default() -> Self {
		Self {
			resolve_enabled: true,
			timeout_ms: DEFAULT_TIMEOUT_MS,
			patterns: Vec::new(),
		}
	}
}

impl Default for Pattern {
	fn default() -> Self {
		Self {
			enabled: true,
			expression: String::new(),
		}
	}
}

impl Pattern {
	/// Create an enabled pattern for the given expression.
	pub fn new(expression: impl Into<String>) -> Self {
		Self {
			enabled: true,
			expression: expression.into(),
		}
	}

	/// Check that the expression compiles.
	pub fn validate(&self) -> Result<()> {
		compile_regex(&self.expression).map(|_| ())
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "enabled={} pattern={}", self.enabled, self.expression)
	}
}

/// Parse a user-supplied pattern index such as `"0"` or `" 2 "`.
pub fn parse_pattern_index(input: &str) -> Result<usize> {
	input
		.trim()
		.parse()
		.map_err(|_| UnshortenError::InvalidPatternIndex {
			input: input.to_string(),
		})
}

impl ResolveConfig {
	/// Validate every stored pattern expression.
	pub fn validate(&self) -> Result<()> {
		for pattern in &self.patterns {
			pattern.validate()?;
		}
		Ok(())
	}

	/// Borrow the pattern at `index`.
	pub fn pattern_at(&self, index: usize) -> Result<&Pattern> {
		let len = self.patterns.len();
		self.patterns
			.get(index)
			.ok_or(UnshortenError::PatternIndexOutOfRange { index, len })
	}

	fn pattern_at_mut(&mut self, index: usize) -> Result<&mut Pattern> {
		let len = self.patterns.len();
		self.patterns
			.get_mut(index)
			.ok_or(UnshortenError::PatternIndexOutOfRange { index, len })
	}

	/// Append a pattern after validating it. Returns its index.
	pub fn add_pattern(&mut self, pattern: Pattern) -> Result<usize> {
		pattern.validate()?;
		self.patterns.push(pattern);
		Ok(self.patterns.len() - 1)
	}

	/// Remove and return the pattern at `index`.
	pub fn remove_pattern(&mut self, index: usize) -> Result<Pattern> {
		self.pattern_at(index)?;
		Ok(self.patterns.remove(index))
	}

	/// Enable or disable the pattern at `index`.
	pub fn set_pattern_enabled(&mut self, index: usize, enabled: bool) -> Result<&Pattern> {
		let pattern = self.pattern_at_mut(index)?;
		pattern.enabled = enabled;
		Ok(pattern)
	}

	/// Replace the expression of the pattern at `index`, keeping its enabled flag.
	pub fn edit_pattern(&mut self, index: usize, expression: &str) -> Result<&Pattern> {
		compile_regex(expression)?;
		let pattern = self.pattern_at_mut(index)?;
		pattern.expression = expression.to_string();
		Ok(pattern)
	}
}
