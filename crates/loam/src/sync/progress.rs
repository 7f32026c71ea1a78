//! Progress reporting for sync operations.

/// Progress events emitted during a repository sync.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Resolving repository metadata from the remote.
    ResolvingRepository {
        /// The `owner/repo` being resolved.
        origin: String,
    },

    /// Fetching the recursive tree listing.
    ListingTree {
        /// The branch being listed.
        branch: String,
    },

    /// Tree listing retrieved and filtered.
    TreeListed {
        /// Total entries in the listing.
        total: usize,
        /// Entries that passed the eligibility filter and cap.
        eligible: usize,
        /// Whether the remote truncated the listing.
        truncated: bool,
    },

    /// Starting one batch of concurrent blob fetches.
    FetchingBatch {
        /// Batch number (1-indexed).
        batch: usize,
        /// Total number of batches.
        total_batches: usize,
    },

    /// A file was fetched and written to the store.
    FileSynced {
        /// The file's repository-relative path.
        path: String,
    },

    /// A file was skipped (fetch or write failure, swallowed).
    FileSkipped {
        /// The file's repository-relative path.
        path: String,
        /// Short description of the failure.
        error: String,
    },

    /// Sync finished.
    Completed {
        /// Files written this sync.
        files_synced: usize,
        /// Entries submitted to the fetcher.
        attempted: usize,
    },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_invokes_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let callback: ProgressCallback = Box::new(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        emit(
            Some(&callback),
            SyncProgress::FileSynced {
                path: "a.md".to_string(),
            },
        );
        emit(
            Some(&callback),
            SyncProgress::Completed {
                files_synced: 1,
                attempted: 1,
            },
        );

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emit_without_callback_is_a_noop() {
        emit(
            None,
            SyncProgress::TreeListed {
                total: 3,
                eligible: 2,
                truncated: false,
            },
        );
    }
}
