//! Repository sync: policy, batched fetching, and the orchestration engine.

mod engine;
mod fetcher;
mod policy;
mod progress;
mod types;

pub use engine::sync_repository;
pub use fetcher::{
    fetch_all, BatchFetchOutcome, EntryFetchError, FetchErrorKind, FetchedFile, FETCH_BATCH_SIZE,
};
pub use policy::{is_eligible, select_candidates, DEFAULT_MAX_FILES, MAX_BLOB_SIZE};
pub use progress::{emit, ProgressCallback, SyncProgress};
pub use types::{SyncError, SyncOutcome, SyncRequest};
