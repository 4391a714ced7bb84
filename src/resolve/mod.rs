//! Single-hop URL resolution for unshorten.
//!
//! This module handles:
//! - The `Resolver` seam the rewriter calls for every match
//! - The HTTP implementation (HEAD probe, no automatic redirects)
//!
//! A resolver never fails: any problem degrades to returning the input.

pub mod http;

#[cfg(test)]
pub(crate) mod test_support;

pub use http::{HttpResolver, redirect_target};

use std::time::Duration;

/// Outcome of resolving one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	/// The redirect target, or the input unchanged.
	pub resolved: String,

	/// True when `resolved` came from a redirect response.
	pub via_redirect: bool,
}

impl Resolution {
	/// The input is kept as-is.
	pub fn original(url: &str) -> Self {
		Resolution {
			resolved: url.to_string(),
			via_redirect: false,
		}
	}

	/// A redirect target was found.
	pub fn redirect(target: impl Into<String>) -> Self {
		Resolution {
			resolved: target.into(),
			via_redirect: true,
		}
	}
}

/// Turns a matched URL into the URL it redirects to.
///
/// Implementations must not panic or block past `timeout`; every failure is
/// reported as `Resolution::original`.
pub trait Resolver {
	fn resolve(&self, url: &str, timeout: Duration) -> Resolution;
}

impl<R: Resolver + ?Sized> Resolver for &R {
	fn resolve(&self, url: &str, timeout: Duration) -> Resolution {
		(**self).resolve(url, timeout)
	}
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
	fn resolve(&self, url: &str, timeout: Duration) -> Resolution {
		(**self).resolve(url, timeout)
	}
}
