pub mod config;
pub mod logging;

pub mod checksum;
pub mod destination;
pub mod downloader;
pub mod error;
pub mod response;
pub mod source;

pub use downloader::{fetch_and_save, Downloader, FetchReport, TransferOptions, TransferState};
pub use error::{ErrorKind, FetchError};
