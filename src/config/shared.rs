use crate::config::types::ResolveConfig;
use crate::error::Result;
use crate::rules::matcher::{CompiledPattern, compile_patterns};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// An immutable view of the configuration with its patterns pre-compiled.
#[derive(Debug)]
pub struct ConfigSnapshot {
	config: ResolveConfig,
	patterns: Vec<CompiledPattern>,
}

impl ConfigSnapshot {
	pub fn new(config: ResolveConfig) -> Self {
		let patterns = compile_patterns(&config);
		ConfigSnapshot { config, patterns }
	}

	pub fn config(&self) -> &ResolveConfig {
		&self.config
	}

	/// Enabled, successfully compiled patterns in registry order.
	pub fn patterns(&self) -> &[CompiledPattern] {
		&self.patterns
	}

	pub fn resolve_enabled(&self) -> bool {
		self.config.resolve_enabled
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.config.timeout_ms)
	}
}

impl Default for ConfigSnapshot {
	fn default() -> Self {
		Self::new(ResolveConfig::default())
	}
}

/// Configuration shared between the rewriter and whatever administers it.
///
/// Readers take an `Arc` snapshot that never changes underneath them; writers
/// swap in a whole new snapshot. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
	current: Arc<RwLock<Arc<ConfigSnapshot>>>,
}

impl SharedConfig {
	pub fn new(config: ResolveConfig) -> Self {
		SharedConfig {
			current: Arc::new(RwLock::new(Arc::new(ConfigSnapshot::new(config)))),
		}
	}

	/// The current snapshot.
	pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
		let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(&*guard)
	}

	/// Replace the whole configuration.
	pub fn replace(&self, config: ResolveConfig) {
		let snapshot = Arc::new(ConfigSnapshot::new(config));
		let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
		*guard = snapshot;
	}

	/// Apply an edit to a copy of the configuration and publish it on success.
	///
	/// On error the published configuration is left untouched.
	pub fn update<T>(&self, edit: impl FnOnce(&mut ResolveConfig) -> Result<T>) -> Result<T> {
		let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
		let mut config = guard.config().clone();
		let value = edit(&mut config)?;
		*guard = Arc::new(ConfigSnapshot::new(config));
		Ok(value)
	}
}
