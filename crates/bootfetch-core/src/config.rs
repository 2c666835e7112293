use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::source::{DEFAULT_DESTINATION, DEFAULT_SOURCE_URL};

/// Global configuration loaded from `~/.config/bootfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL fetched when none is given on the command line.
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Output path when none is given; relative paths resolve against the working directory.
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    /// Seconds allowed for TCP + TLS connection setup.
    pub connect_timeout_secs: u64,
    /// Deadline for the whole transfer in seconds (missing or 0 = no deadline).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Abort when throughput stays below this many bytes/s ...
    pub low_speed_limit_bytes: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Redirect hops followed before giving up.
    pub max_redirections: u32,
    /// Accept plain `http://` sources (local mirrors only).
    #[serde(default)]
    pub allow_http: bool,
    /// Optional receive buffer size in bytes (None = libcurl default).
    #[serde(default)]
    pub buffer_size: Option<usize>,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION)
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            destination: default_destination(),
            connect_timeout_secs: 30,
            timeout_secs: Some(600),
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            allow_http: false,
            buffer_size: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bootfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
