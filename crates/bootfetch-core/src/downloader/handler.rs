//! Easy2 handler that streams a successful response body into the destination.
//! Bodies of non-2xx hops are read and dropped so nothing but the final
//! response body ever reaches the file.

use std::io;

use crate::destination::DestinationFile;
use crate::response::ResponseMeta;

pub(super) struct SaveHandler {
    pub(super) destination: Option<DestinationFile>,
    pub(super) response: ResponseMeta,
    /// Set when a destination write failed; curl then reports a write error.
    pub(super) write_error: Option<io::Error>,
    /// True once the first body byte of a 2xx response was written.
    pub(super) streaming: bool,
}

impl SaveHandler {
    pub(super) fn new(destination: DestinationFile) -> Self {
        Self {
            destination: Some(destination),
            response: ResponseMeta::default(),
            write_error: None,
            streaming: false,
        }
    }
}

impl curl::easy::Handler for SaveHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        self.response.observe_header(data);
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        if !self.response.is_success() {
            return Ok(data.len());
        }
        let Some(dest) = self.destination.as_mut() else {
            return Ok(0);
        };
        match dest.append(data) {
            Ok(()) => {
                if !self.streaming {
                    self.streaming = true;
                    tracing::debug!(status = ?self.response.status, "first body chunk written");
                }
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!(path = %dest.path().display(), "destination write failed: {}", e);
                self.write_error = Some(e);
                Ok(0) // abort transfer
            }
        }
    }
}
