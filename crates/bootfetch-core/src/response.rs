//! Response header tracking.
//!
//! libcurl hands us every header line of every hop when following redirects,
//! so the tracked state resets on each new status line.

/// Parses the status code out of `HTTP/1.1 200 OK` or `HTTP/2 404`.
pub fn parse_status_line(line: &str) -> Option<u32> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let code = line.split_whitespace().nth(1)?;
    if code.len() != 3 {
        return None;
    }
    code.parse().ok()
}

/// True for 2xx codes.
pub fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Status and body length of the latest response hop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: Option<u32>,
    pub content_length: Option<u64>,
}

impl ResponseMeta {
    /// Feed one raw header line (including the trailing CRLF).
    pub fn observe_header(&mut self, data: &[u8]) {
        let line = match std::str::from_utf8(data) {
            Ok(s) => s.trim_end(),
            Err(_) => return,
        };
        if let Some(code) = parse_status_line(line) {
            *self = ResponseMeta {
                status: Some(code),
                content_length: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse().ok();
            }
        }
    }

    /// True once a 2xx status line has been seen for the current hop.
    pub fn is_success(&self) -> bool {
        self.status.map_or(false, is_success)
    }
}
