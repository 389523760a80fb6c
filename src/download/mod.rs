//! Video materialization: streams a resolved download to disk.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for multi-gigabyte recordings)
//! - Filename taken from the Content-Disposition header
//! - Temp file in the working directory, copied to the target directory
//! - Crash-recovery purge of temp files left by killed runs
//!
//! # Example
//!
//! ```no_run
//! use savetv_core::config::Config;
//! use savetv_core::download::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(&Config::default())?;
//! let file_path = client
//!     .download_video("http://dl.example.net/get/12345")
//!     .await?;
//! println!("Downloaded: {}", file_path.display());
//! # Ok(())
//! # }
//! ```

mod cleanup;
mod client;
mod constants;
mod error;
mod filename;

pub use cleanup::purge_partial_downloads;
pub use client::HttpClient;
pub use constants::TEMP_EXTENSION;
pub use error::DownloadError;
pub use filename::{is_temp_file, plaintext_video_url, temp_file_name};

use std::path::PathBuf;

use async_trait::async_trait;

/// Turns a resolved download URL into a local file.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Downloads `url` and returns the final local path.
    async fn fetch(&self, url: &str) -> Result<PathBuf, DownloadError>;
}
