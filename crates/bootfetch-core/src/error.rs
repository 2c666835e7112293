//! Fetch error taxonomy.
//!
//! Every failure of a transfer maps to exactly one [`ErrorKind`] so callers can
//! report which category occurred. Nothing here is retried.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned by [`crate::downloader::Downloader::run`] and friends.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS, timeout, or a connection dropped mid-body.
    #[error("network error: GET {url} failed")]
    Network {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The final response had a non-2xx status.
    #[error("HTTP status error: GET {url} returned HTTP {code}")]
    HttpStatus { url: String, code: u32 },

    /// The destination could not be opened, written, or closed.
    #[error("filesystem error: {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source URL was rejected before any I/O.
    #[error("invalid source URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `run` was called on a transfer that already reached `Closed`.
    #[error("transfer already closed; a downloader runs once")]
    Closed,
}

/// Category of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Filesystem,
    /// Rejected input or misuse; no network or file side effects happened.
    InvalidInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Network => "network",
            ErrorKind::HttpStatus => "http-status",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::InvalidInput => "invalid-input",
        };
        f.write_str(s)
    }
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network { .. } => ErrorKind::Network,
            FetchError::HttpStatus { .. } => ErrorKind::HttpStatus,
            FetchError::Filesystem { .. } => ErrorKind::Filesystem,
            FetchError::InvalidUrl { .. } | FetchError::Closed => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn invalid_url(url: &str, reason: impl ToString) -> Self {
        FetchError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Finer cause of a network failure, used for log fields only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCause {
    Timeout,
    Resolve,
    Connection,
    Tls,
    /// Server closed the connection before the advertised body length.
    PartialBody,
    Other,
}

/// Classify a curl error for logging.
pub fn classify_curl_error(e: &curl::Error) -> NetworkCause {
    if e.is_operation_timedout() {
        return NetworkCause::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return NetworkCause::Resolve;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
    {
        return NetworkCause::Tls;
    }
    if e.is_partial_file() {
        return NetworkCause::PartialBody;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return NetworkCause::Connection;
    }
    NetworkCause::Other
}
