//! Progress reporting for sync operations.
//!
//! Two modes: interactive (TTY) prints styled status lines with console,
//! non-TTY (CI, pipes) reports through tracing instead.

#![cfg(feature = "github")]

use console::{style, Term};
use loam::sync::{ProgressCallback, SyncProgress};

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Styled terminal output for TTY.
    Interactive,
    /// Structured logging for non-TTY (CI, pipes).
    Logging,
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive
        } else {
            Self::Logging
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: SyncProgress) {
        match self {
            Self::Interactive => Self::print(event),
            Self::Logging => Self::log(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn into_callback(self) -> ProgressCallback {
        Box::new(move |event| self.handle(event))
    }

    fn print(event: SyncProgress) {
        match event {
            SyncProgress::ResolvingRepository { origin } => {
                println!("{} {}", style("Resolving").cyan().bold(), origin);
            }
            SyncProgress::ListingTree { branch } => {
                println!("{} branch {}", style("Listing").cyan().bold(), branch);
            }
            SyncProgress::TreeListed {
                total,
                eligible,
                truncated,
            } => {
                if truncated {
                    println!(
                        "{} listing truncated by the remote, nothing will be mirrored",
                        style("Warning").yellow().bold()
                    );
                } else {
                    println!(
                        "{} {} entries, {} eligible",
                        style("Listed").cyan().bold(),
                        total,
                        eligible
                    );
                }
            }
            SyncProgress::FetchingBatch {
                batch,
                total_batches,
            } => {
                println!(
                    "{} batch {}/{}",
                    style("Fetching").cyan().bold(),
                    batch,
                    total_batches
                );
            }
            SyncProgress::FileSynced { path } => {
                println!("  {} {}", style("+").green().bold(), path);
            }
            SyncProgress::FileSkipped { path, error } => {
                println!(
                    "  {} {} ({})",
                    style("-").yellow().bold(),
                    path,
                    style(error).dim()
                );
            }
            SyncProgress::Completed {
                files_synced,
                attempted,
            } => {
                println!(
                    "{} {} of {} files mirrored",
                    style("Done").green().bold(),
                    files_synced,
                    attempted
                );
            }
            _ => {}
        }
    }

    fn log(event: SyncProgress) {
        match event {
            SyncProgress::ResolvingRepository { origin } => {
                tracing::info!(origin = %origin, "Resolving repository");
            }
            SyncProgress::TreeListed {
                total,
                eligible,
                truncated,
            } => {
                tracing::info!(total, eligible, truncated, "Tree listed");
            }
            SyncProgress::FileSkipped { path, error } => {
                tracing::warn!(path = %path, error = %error, "File skipped");
            }
            SyncProgress::Completed {
                files_synced,
                attempted,
            } => {
                tracing::info!(files_synced, attempted, "Sync complete");
            }
            _ => {}
        }
    }
}
