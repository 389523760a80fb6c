//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use savetv_core::config::{ApiConfig, Config, DEFAULT_BASE_URL, DEFAULT_VIDEO_PORT};

/// Archive your Save.TV recordings.
///
/// Downloads every recording with an ad-free encoding in the best available
/// quality, skips recordings saved by earlier runs, and optionally deletes
/// them online once they are safely on disk.
#[derive(Parser, Debug)]
#[command(name = "savetv-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Save.TV account name
    #[arg(short, long)]
    pub user: String,

    /// Save.TV account password
    #[arg(short, long)]
    pub password: String,

    /// Directory the finished videos are copied to
    #[arg(short, long, default_value = ".", value_parser = existing_directory)]
    pub directory: PathBuf,

    /// Delete each recording online after it was saved
    #[arg(short, long)]
    pub remove: bool,

    /// Do not draw a progress bar
    #[arg(short, long)]
    pub no_progress: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Base URL of the Save.TV service
    #[arg(long, default_value = DEFAULT_BASE_URL, hide_short_help = true)]
    pub base_url: String,

    /// Port used for video transfers
    #[arg(long, default_value_t = DEFAULT_VIDEO_PORT, hide_short_help = true)]
    pub video_port: u16,
}

impl Args {
    /// Builds the runtime configuration. Temp files and the ledger live in
    /// the current directory.
    pub fn to_config(&self) -> Config {
        Config {
            work_dir: PathBuf::from("."),
            target_dir: self.directory.clone(),
            show_progress: !self.no_progress && !self.quiet,
            api: ApiConfig {
                base_url: self.base_url.clone(),
                video_port: self.video_port,
                remove_remote: self.remove,
            },
        }
    }

    /// Default log level for the `-q`/`-v` flags. `RUST_LOG` overrides it.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

fn existing_directory(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("'{value}' is not an existing directory"))
    }
}
