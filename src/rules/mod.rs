//! Pattern matching and text rewriting for unshorten.
//!
//! This module handles:
//! - Compiling registry patterns into case-insensitive regexes
//! - Rewriting text by resolving every match in registry order

pub mod matcher;
pub mod rewriter;

pub use matcher::{CompiledPattern, compile_patterns, compile_regex};
pub use rewriter::{apply_patterns, rewrite_text};
