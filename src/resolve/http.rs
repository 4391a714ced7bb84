use crate::error::{Result, UnshortenError};
use crate::resolve::{Resolution, Resolver};
use reqwest::StatusCode;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use std::time::Duration;

/// Resolves URLs with one HEAD request that never follows redirects.
#[derive(Debug, Clone)]
pub struct HttpResolver {
	client: Client,
}

impl HttpResolver {
	/// Build a resolver with a client that hands back raw redirect responses.
	pub fn new() -> Result<Self> {
		Self::from_builder(Client::builder())
	}

	fn from_builder(builder: ClientBuilder) -> Result<Self> {
		let client = builder
			.redirect(Policy::none())
			.build()
			.map_err(|source| UnshortenError::HttpClient { source })?;
		Ok(HttpResolver { client })
	}

	#[cfg(test)]
	pub(crate) fn without_proxy() -> Self {
		Self::from_builder(Client::builder().no_proxy()).expect("test client builds")
	}
}

impl Resolver for HttpResolver {
	fn resolve(&self, url: &str, timeout: Duration) -> Resolution {
		let response = match self.client.head(url).timeout(timeout).send() {
			Ok(response) => response,
			Err(e) => {
				if e.is_timeout() {
					tracing::debug!(url, ?timeout, "probe timed out");
				} else {
					tracing::debug!(url, "probe failed: {e}");
				}
				return Resolution::original(url);
			}
		};

		let status = response.status();
		match redirect_target(status, response.headers().get(LOCATION)) {
			Some(target) => {
				tracing::debug!(url, location = target, "resolved redirect");
				Resolution::redirect(target)
			}
			None => {
				tracing::debug!(url, status = status.as_u16(), "no redirect");
				Resolution::original(url)
			}
		}
	}
}

/// Extract the target of a permanent redirect.
///
/// Only a 301 with a non-empty `Location` counts. The header bytes are
/// decoded as UTF-8 and returned verbatim.
pub fn redirect_target(status: StatusCode, location: Option<&HeaderValue>) -> Option<&str> {
	if status != StatusCode::MOVED_PERMANENTLY {
		return None;
	}
	location
		.and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
		.filter(|target| !target.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resolve::test_support::{refused_url, serve_once, serve_stalled};
	use std::time::Instant;

	const TIMEOUT: Duration = Duration::from_millis(2000);

	#[test]
	fn test_redirect_target_moved_permanently() {
		let location = HeaderValue::from_static("http://example.com/full");
		assert_eq!(
			redirect_target(StatusCode::MOVED_PERMANENTLY, Some(&location)),
			Some("http://example.com/full")
		);
	}

	#[test]
	fn test_redirect_target_missing_or_empty_location() {
		let empty = HeaderValue::from_static("");
		assert_eq!(redirect_target(StatusCode::MOVED_PERMANENTLY, None), None);
		assert_eq!(
			redirect_target(StatusCode::MOVED_PERMANENTLY, Some(&empty)),
			None
		);
	}

	#[test]
	fn test_redirect_target_keeps_utf8_location() {
		let location = HeaderValue::from_bytes("http://example.com/日本".as_bytes()).unwrap();
		assert_eq!(
			redirect_target(StatusCode::MOVED_PERMANENTLY, Some(&location)),
			Some("http://example.com/日本")
		);

		let invalid = HeaderValue::from_bytes(b"http://example.com/\xff").unwrap();
		assert_eq!(
			redirect_target(StatusCode::MOVED_PERMANENTLY, Some(&invalid)),
			None
		);
	}

	#[test]
	fn test_redirect_target_other_statuses() {
		let location = HeaderValue::from_static("http://example.com/full");
		for status in [
			StatusCode::OK,
			StatusCode::FOUND,
			StatusCode::SEE_OTHER,
			StatusCode::TEMPORARY_REDIRECT,
			StatusCode::PERMANENT_REDIRECT,
			StatusCode::NOT_FOUND,
		] {
			assert_eq!(redirect_target(status, Some(&location)), None, "{status}");
		}
	}

	#[test]
	fn test_resolve_moved_permanently() {
		let (url, requests) = serve_once(
			"HTTP/1.1 301 Moved Permanently\r\nLocation: http://example.com/full\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::redirect("http://example.com/full"));

		let request = requests.recv().unwrap();
		assert!(request.starts_with("HEAD /abc "), "{request}");
	}

	#[test]
	fn test_resolve_does_not_follow_target() {
		// Port 1 is never listened on; following the redirect would fail
		let (url, _requests) = serve_once(
			"HTTP/1.1 301 Moved Permanently\r\nLocation: http://127.0.0.1:1/next\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution.resolved, "http://127.0.0.1:1/next");
		assert!(resolution.via_redirect);
	}

	#[test]
	fn test_resolve_moved_permanently_with_utf8_location() {
		let (url, _requests) = serve_once(
			"HTTP/1.1 301 Moved Permanently\r\nLocation: http://example.com/日本\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::redirect("http://example.com/日本"));
	}

	#[test]
	fn test_resolve_moved_permanently_without_location() {
		let (url, _requests) = serve_once(
			"HTTP/1.1 301 Moved Permanently\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_moved_permanently_with_empty_location() {
		let (url, _requests) = serve_once(
			"HTTP/1.1 301 Moved Permanently\r\nLocation: \r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_ok_keeps_url() {
		let (url, _requests) =
			serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_temporary_redirect_keeps_url() {
		let (url, _requests) = serve_once(
			"HTTP/1.1 302 Found\r\nLocation: http://example.com/full\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
		);

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_malformed_response_keeps_url() {
		let (url, _requests) = serve_once("this is not http\r\n\r\n");

		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_connection_refused_keeps_url() {
		let url = refused_url();
		let resolution = HttpResolver::without_proxy().resolve(&url, TIMEOUT);
		assert_eq!(resolution, Resolution::original(&url));
	}

	#[test]
	fn test_resolve_invalid_url_keeps_input() {
		let resolution = HttpResolver::without_proxy().resolve("not a url", TIMEOUT);
		assert_eq!(resolution, Resolution::original("not a url"));
	}

	#[test]
	fn test_resolve_timeout_keeps_url() {
		let url = serve_stalled(Duration::from_secs(5));

		let started = Instant::now();
		let resolution =
			HttpResolver::without_proxy().resolve(&url, Duration::from_millis(200));
		let elapsed = started.elapsed();

		assert_eq!(resolution, Resolution::original(&url));
		assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
	}
}
