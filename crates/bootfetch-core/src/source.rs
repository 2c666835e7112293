//! Source URL validation and the default fetch target.

use crate::error::FetchError;
use url::Url;

/// Installer fetched when nothing else is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://bootstrap.pypa.io/get-pip.py";

/// Output file, relative to the working directory.
pub const DEFAULT_DESTINATION: &str = "get-pip.py";

/// Parses and checks a source URL.
///
/// Only `https` is accepted unless `allow_http` is set (local mirrors, tests).
/// The URL must carry a host.
pub fn parse_source_url(raw: &str, allow_http: bool) -> Result<Url, FetchError> {
    let invalid = |reason: &str| FetchError::invalid_url(raw, reason);

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    match url.scheme() {
        "https" => {}
        "http" if allow_http => {}
        "http" => return Err(invalid("plain http is not allowed; use https")),
        other => return Err(invalid(&format!("unsupported scheme {:?}", other))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

/// Checks the URL a transfer ended on after following redirects.
///
/// An https source must not be downgraded to plain http by a redirect unless
/// `allow_http` is set.
pub fn check_redirect_target(effective_url: &str, allow_http: bool) -> Result<(), FetchError> {
    let scheme = Url::parse(effective_url)
        .map(|u| u.scheme().to_string())
        .map_err(|e| FetchError::invalid_url(effective_url, e))?;
    match scheme.as_str() {
        "https" => Ok(()),
        "http" if allow_http => Ok(()),
        other => Err(FetchError::invalid_url(
            effective_url,
            format!("redirected to a {:?} URL", other),
        )),
    }
}
