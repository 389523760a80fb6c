//! Transfer progress reporting.
//!
//! The materializer reports byte counts through [`ProgressReporter`]; the CLI
//! renders them with an `indicatif` bar, everything else uses [`NoopReporter`].

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives progress events for a single transfer at a time.
pub trait ProgressReporter: Send + Sync {
    /// A transfer started; `total_bytes` comes from `Content-Length` when sent.
    fn start(&self, total_bytes: Option<u64>);

    /// `bytes` more bytes were written.
    fn advance(&self, bytes: u64);

    /// The transfer ended, successfully or not.
    fn finish(&self);
}

/// Discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn start(&self, _total_bytes: Option<u64>) {}

    fn advance(&self, _bytes: u64) {}

    fn finish(&self) {}
}

const BAR_TEMPLATE: &str = "Download in progress: [{bar:40}] {percent}% {eta}";
const SPINNER_TEMPLATE: &str = "{spinner} Download in progress: {bytes}";

/// Renders a terminal progress bar on stderr.
#[derive(Debug, Default)]
pub struct TerminalReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    /// Creates a reporter with no active bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for TerminalReporter {
    fn start(&self, total_bytes: Option<u64>) {
        let bar = match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("= "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(1));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn advance(&self, bytes: u64) {
        if let Ok(slot) = self.bar.lock()
            && let Some(bar) = slot.as_ref()
        {
            bar.inc(bytes);
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            bar.finish_and_clear();
        }
    }
}
