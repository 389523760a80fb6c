//! Save.TV archive core library
//!
//! Downloads every recording of a Save.TV account that has an ad-free
//! encoding, remembers what was saved so later runs skip it, and can delete
//! the online copy afterwards.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Login, archive listing, download-url resolution, remote deletion
//! - [`quality`] - Picks the best ad-free encoding of a recording
//! - [`download`] - Streams a video to disk and purges leftover temp files
//! - [`ledger`] - Persistent record of finished downloads
//! - [`db`] - Database connection and schema management
//! - [`pipeline`] - Runs the above in order, one recording at a time
//! - [`config`] - Runtime settings built by the binary
//! - [`progress`] - Transfer progress reporting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod db;
pub mod download;
pub mod ledger;
pub mod pipeline;
pub mod progress;
pub mod quality;
mod user_agent;

// Re-export commonly used types
pub use api::{CatalogItem, SaveTvApi, SaveTvClient, Session, TelecastId};
pub use config::{ApiConfig, Config};
pub use db::Database;
pub use download::{DownloadError, HttpClient, VideoFetcher, purge_partial_downloads};
pub use ledger::{CompletionLedger, Ledger, LedgerError};
pub use pipeline::{Credentials, ItemError, ItemOutcome, Pipeline, PipelineError, RunSummary};
pub use progress::{NoopReporter, ProgressReporter, TerminalReporter};
pub use quality::{EncodingOption, QualityTier, select_best};
