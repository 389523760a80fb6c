//! Runtime configuration shared by the API client, materializer and pipeline.
//!
//! The CLI builds a [`Config`] from its arguments; tests build one directly
//! with temporary directories and mock-server URLs.

use std::path::PathBuf;

/// Production API host. Metadata requests go over HTTPS.
pub const DEFAULT_BASE_URL: &str = "https://www.save.tv";

/// Port used for video transfers, which the service serves over plain HTTP.
pub const DEFAULT_VIDEO_PORT: u16 = 80;

/// File name of the completion ledger inside the working directory.
pub const LEDGER_FILE_NAME: &str = "savetv-dl.db";

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host of the archive API, without trailing slash.
    pub base_url: String,
    /// Fixed port that resolved video URLs are rewritten to.
    pub video_port: u16,
    /// Whether recordings are deleted remotely after a successful save.
    pub remove_remote: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            video_port: DEFAULT_VIDEO_PORT,
            remove_remote: false,
        }
    }
}

impl ApiConfig {
    /// Joins an endpoint path (with query) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path_and_query)
    }
}

/// Full configuration for one archive run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding temp files and the ledger database.
    pub work_dir: PathBuf,
    /// Directory that finished videos are copied into.
    pub target_dir: PathBuf,
    /// Whether to render a transfer progress bar.
    pub show_progress: bool,
    /// Remote API settings.
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            target_dir: PathBuf::from("."),
            show_progress: true,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Location of the completion ledger database.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.work_dir.join(LEDGER_FILE_NAME)
    }
}
