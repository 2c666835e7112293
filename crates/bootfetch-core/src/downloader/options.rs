//! libcurl transfer settings.

use std::time::Duration;

use crate::config::FetchConfig;

/// Timeouts and redirect policy for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    pub connect_timeout: Duration,
    /// Hard deadline for the whole transfer (None = no deadline).
    pub deadline: Option<Duration>,
    /// Abort if throughput stays below this many bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub max_redirections: u32,
    /// Receive buffer size hint (None = libcurl default).
    pub buffer_size: Option<usize>,
    /// Accept plain `http://` sources.
    pub allow_http: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            deadline: Some(Duration::from_secs(600)),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            max_redirections: 10,
            buffer_size: None,
            allow_http: false,
        }
    }
}

impl From<&FetchConfig> for TransferOptions {
    fn from(cfg: &FetchConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            deadline: cfg.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            max_redirections: cfg.max_redirections,
            buffer_size: cfg.buffer_size,
            allow_http: cfg.allow_http,
        }
    }
}

impl TransferOptions {
    pub(super) fn apply<H>(&self, easy: &mut curl::easy::Easy2<H>) -> Result<(), curl::Error> {
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirections)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(self.low_speed_limit)?;
        easy.low_speed_time(self.low_speed_time)?;
        if let Some(deadline) = self.deadline {
            easy.timeout(deadline)?;
        }
        if let Some(sz) = self.buffer_size {
            easy.buffer_size(sz)?;
        }
        Ok(())
    }
}
