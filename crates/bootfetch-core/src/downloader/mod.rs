//! Single-GET downloader.
//!
//! Opens the destination, issues one GET (following redirects), streams the
//! body into the file in arrival order and closes it when the response ends.
//! A `Downloader` runs at most once: `Idle -> Connecting -> Streaming -> Closed`.

mod handler;
mod options;

pub use options::TransferOptions;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use curl::easy::Easy2;
use url::Url;

use crate::destination::DestinationFile;
use crate::error::{classify_curl_error, FetchError};
use crate::response::is_success;
use crate::source::{check_redirect_target, parse_source_url};
use handler::SaveHandler;

/// Lifecycle of a transfer. There is no way back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    Connecting,
    Streaming,
    Closed,
}

/// Outcome of a successful transfer.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// URL of the response that was saved (after redirects).
    pub effective_url: String,
    pub destination: PathBuf,
    pub status: u32,
    pub bytes_written: u64,
    /// `Content-Length` advertised by the final response, if any.
    pub content_length: Option<u64>,
    pub elapsed: Duration,
}

/// Fetch `source_url` into `destination` with default options.
pub fn fetch_and_save(source_url: &str, destination: &Path) -> Result<FetchReport, FetchError> {
    Downloader::new(source_url, destination, TransferOptions::default())?.run()
}

/// One transfer from a source URL to a destination path.
#[derive(Debug)]
pub struct Downloader {
    source: Url,
    destination: PathBuf,
    options: TransferOptions,
    state: TransferState,
}

impl Downloader {
    /// Validates the source URL. Performs no I/O.
    pub fn new(
        source_url: &str,
        destination: impl Into<PathBuf>,
        options: TransferOptions,
    ) -> Result<Self, FetchError> {
        let source = parse_source_url(source_url, options.allow_http)?;
        Ok(Self {
            source,
            destination: destination.into(),
            options,
            state: TransferState::Idle,
        })
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Run the transfer. Fails with [`FetchError::Closed`] if it already ran.
    ///
    /// On any error after the destination was opened, the destination is left
    /// empty.
    pub fn run(&mut self) -> Result<FetchReport, FetchError> {
        if self.state != TransferState::Idle {
            return Err(FetchError::Closed);
        }
        let result = self.transfer();
        self.set_state(TransferState::Closed);
        match &result {
            Ok(report) => tracing::info!(
                url = %report.effective_url,
                path = %report.destination.display(),
                bytes = report.bytes_written,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "download saved"
            ),
            Err(e) => tracing::warn!(
                url = %self.source,
                path = %self.destination.display(),
                kind = %e.kind(),
                cause = ?std::error::Error::source(e),
                "download failed: {}",
                e
            ),
        }
        result
    }

    fn set_state(&mut self, next: TransferState) {
        tracing::debug!(from = ?self.state, to = ?next, "transfer state");
        self.state = next;
    }

    fn transfer(&mut self) -> Result<FetchReport, FetchError> {
        let started = Instant::now();
        let url = self.source.as_str().to_string();
        let network = |source: curl::Error| FetchError::Network {
            url: url.clone(),
            source,
        };

        let destination = DestinationFile::create(&self.destination)
            .map_err(|e| FetchError::filesystem(&self.destination, e))?;

        let mut easy = Easy2::new(SaveHandler::new(destination));
        easy.url(&url)
            .map_err(|e| FetchError::invalid_url(&url, e))?;
        self.options.apply(&mut easy).map_err(network)?;

        self.set_state(TransferState::Connecting);
        let performed = easy.perform();
        if easy.get_ref().streaming {
            self.set_state(TransferState::Streaming);
        }

        if let Err(e) = performed {
            if e.is_write_error() {
                if let Some(io_err) = easy.get_mut().write_error.take() {
                    return Err(FetchError::filesystem(&self.destination, io_err));
                }
            }
            tracing::debug!(cause = ?classify_curl_error(&e), code = e.code(), "GET failed");
            return Err(network(e));
        }

        let code = easy.response_code().map_err(network)?;
        if !is_success(code) {
            return Err(FetchError::HttpStatus {
                url: url.clone(),
                code,
            });
        }

        let effective_url = easy
            .effective_url()
            .ok()
            .flatten()
            .map(str::to_string)
            .unwrap_or_else(|| url.clone());
        check_redirect_target(&effective_url, self.options.allow_http)?;
        let content_length = easy.get_ref().response.content_length;

        let destination = easy.get_mut().destination.take().ok_or_else(|| {
            FetchError::filesystem(
                &self.destination,
                io::Error::new(io::ErrorKind::Other, "destination released before commit"),
            )
        })?;
        let bytes_written = destination
            .commit()
            .map_err(|e| FetchError::filesystem(&self.destination, e))?;

        Ok(FetchReport {
            effective_url,
            destination: self.destination.clone(),
            status: code,
            bytes_written,
            content_length,
            elapsed: started.elapsed(),
        })
    }
}
