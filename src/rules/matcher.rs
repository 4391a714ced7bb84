use crate::config::types::{Pattern, ResolveConfig};
use crate::error::{Result, UnshortenError};
use regex::{Regex, RegexBuilder};

/// A pattern compiled and ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
	/// Position of the pattern in the registry.
	pub index: usize,

	/// The original pattern.
	pub pattern: Pattern,

	/// Compiled case-insensitive regex.
	pub regex: Regex,
}

impl CompiledPattern {
	/// Compile a single pattern at its registry position.
	pub fn compile(index: usize, pattern: &Pattern) -> Result<Self> {
		Ok(CompiledPattern {
			index,
			pattern: pattern.clone(),
			regex: compile_regex(&pattern.expression)?,
		})
	}

	/// Whether the pattern takes part in rewriting.
	pub fn is_enabled(&self) -> bool {
		self.pattern.enabled
	}
}

/// Compile a pattern expression. Matching is always case-insensitive.
pub fn compile_regex(expression: &str) -> Result<Regex> {
	RegexBuilder::new(expression)
		.case_insensitive(true)
		.build()
		.map_err(|source| UnshortenError::InvalidRegex {
			pattern: expression.to_string(),
			source,
		})
}

/// Compile the enabled patterns of a config, in registry order.
///
/// A pattern that fails to compile is logged and skipped so it cannot block
/// the remaining patterns.
pub fn compile_patterns(config: &ResolveConfig) -> Vec<CompiledPattern> {
	config
		.patterns
		.iter()
		.enumerate()
		.filter(|(_, pattern)| pattern.enabled)
		.filter_map(|(index, pattern)| match CompiledPattern::compile(index, pattern) {
			Ok(compiled) => Some(compiled),
			Err(e) => {
				tracing::warn!(index, expression = %pattern.expression, "skipping pattern: {e}");
				None
			}
		})
		.collect()
}
