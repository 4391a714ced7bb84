use crate::config::shared::SharedConfig;
use crate::config::types::ResolveConfig;
use crate::error::Result;
use crate::resolve::{HttpResolver, Resolver};
use crate::rules::rewriter::rewrite_text;

/// Entry point for a host pipeline: hand it text, get text back.
///
/// Each call reads one configuration snapshot and holds it for the whole
/// rewrite, so concurrent edits through [`SharedConfig`] never produce a
/// half-applied pattern set.
#[derive(Debug, Clone)]
pub struct Unshortener<R = HttpResolver> {
	config: SharedConfig,
	resolver: R,
}

impl Unshortener<HttpResolver> {
	/// Build an engine over `config` that resolves through HTTP.
	pub fn with_http(config: ResolveConfig) -> Result<Self> {
		Ok(Self::new(SharedConfig::new(config), HttpResolver::new()?))
	}
}

impl<R: Resolver> Unshortener<R> {
	pub fn new(config: SharedConfig, resolver: R) -> Self {
		Unshortener { config, resolver }
	}

	/// Handle for reading or administering the configuration.
	pub fn config(&self) -> &SharedConfig {
		&self.config
	}

	/// Rewrite one unit of text. Never fails; unresolved matches stay as they were.
	pub fn rewrite(&self, text: &str) -> String {
		let snapshot = self.config.snapshot();
		rewrite_text(&snapshot, &self.resolver, text)
	}
}
