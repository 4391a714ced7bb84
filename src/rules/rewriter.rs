use crate::config::shared::ConfigSnapshot;
use crate::resolve::Resolver;
use crate::rules::matcher::CompiledPattern;
use regex::Captures;
use std::time::Duration;

/// Rewrite `text` against a config snapshot.
///
/// Returns the input untouched when the master switch is off.
pub fn rewrite_text<R: Resolver + ?Sized>(
	snapshot: &ConfigSnapshot,
	resolver: &R,
	text: &str,
) -> String {
	if !snapshot.resolve_enabled() {
		tracing::trace!("resolution disabled, passing text through");
		return text.to_string();
	}

	apply_patterns(snapshot.patterns(), snapshot.timeout(), resolver, text)
}

/// Apply patterns one after another, each over the previous pattern's output.
///
/// Every match is handed to the resolver, left to right, and replaced with
/// whatever it returns.
pub fn apply_patterns<R: Resolver + ?Sized>(
	patterns: &[CompiledPattern],
	timeout: Duration,
	resolver: &R,
	text: &str,
) -> String {
	let mut text = text.to_string();

	for compiled in patterns.iter().filter(|p| p.is_enabled()) {
		text = compiled
			.regex
			.replace_all(&text, |caps: &Captures| {
				resolver.resolve(&caps[0], timeout).resolved
			})
			.into_owned();
		tracing::trace!(index = compiled.index, "applied pattern");
	}

	text
}
