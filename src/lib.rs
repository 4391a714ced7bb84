//! Unshorten - expand shortened URLs in text to the URLs they redirect to.
//!
//! This library provides the core functionality for unshorten, including:
//! - An ordered registry of case-insensitive regex patterns with enable flags
//! - A text rewriter that applies enabled patterns in order
//! - A single-hop HTTP resolver that never fails its caller
//! - TOML configuration with snapshot-consistent sharing
//!
//! # Example
//!
//! ```no_run
//! use unshorten_cli::config::{Pattern, ResolveConfig};
//! use unshorten_cli::Unshortener;
//!
//! let mut config = ResolveConfig::default();
//! config.add_pattern(Pattern::new(r"https?://bit\.ly/\w+")).unwrap();
//!
//! let engine = Unshortener::with_http(config).unwrap();
//! println!("{}", engine.rewrite("read this: http://bit.ly/abc123"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod rules;

pub use engine::Unshortener;
pub use error::{Result, UnshortenError};
