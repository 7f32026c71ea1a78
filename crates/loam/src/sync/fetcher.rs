//! Batched, bounded-concurrency blob retrieval.
//!
//! Approved entries are partitioned into fixed-size batches. Batches run
//! strictly in sequence; within a batch every fetch is issued concurrently
//! and all are awaited before the next batch starts. This keeps at most
//! [`FETCH_BATCH_SIZE`] requests in flight without a general worker pool.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use tokio::time::Instant;

use crate::remote::{RemoteError, RemoteTreeClient, RepoOrigin, TreeEntry};
use crate::sync::progress::{emit, ProgressCallback, SyncProgress};

/// Number of blob fetches issued concurrently per batch.
pub const FETCH_BATCH_SIZE: usize = 10;

/// One successfully retrieved and decoded file.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    /// Repository-relative path.
    pub path: String,
    /// Decoded content.
    pub content: String,
    /// Decoded size in bytes.
    pub size: i64,
    /// Remote-supplied content hash.
    pub content_hash: String,
}

/// Why one entry could not be retrieved. These never abort a sync.
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    /// The remote call failed.
    #[error(transparent)]
    Remote(RemoteError),

    /// The remote reported a transfer encoding other than base64.
    #[error("Unsupported transfer encoding '{0}'")]
    UnsupportedEncoding(String),

    /// The payload decoded to nothing, or the remote sent no content body.
    #[error("Empty content body")]
    EmptyContent,

    /// The content was not valid base64.
    #[error("Base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The sync deadline expired while this entry was in flight.
    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

/// A per-entry fetch failure, tagged with the path it belongs to.
#[derive(Debug, Error)]
#[error("Failed to fetch '{path}': {kind}")]
pub struct EntryFetchError {
    /// Repository-relative path of the failed entry.
    pub path: String,
    /// The failure cause.
    #[source]
    pub kind: FetchErrorKind,
}

/// All per-entry outcomes of a batched fetch.
///
/// Absent entries are a visible part of the contract: each element is either
/// a retrieved file or the error that was swallowed for it.
#[derive(Debug, Default)]
pub struct BatchFetchOutcome {
    /// Per-entry results, in submission order.
    pub results: Vec<Result<FetchedFile, EntryFetchError>>,
}

impl BatchFetchOutcome {
    /// Number of entries attempted.
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    /// Number of entries retrieved successfully.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Iterate over the successfully retrieved files.
    pub fn files(&self) -> impl Iterator<Item = &FetchedFile> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Iterate over the swallowed failures.
    pub fn failures(&self) -> impl Iterator<Item = &EntryFetchError> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }
}

/// Fetch every approved entry's content, batch by batch.
///
/// Individual failures are recorded in the outcome and never abort the run.
/// When a `deadline` is set, entries still pending once it passes resolve to
/// [`FetchErrorKind::DeadlineExceeded`].
pub async fn fetch_all(
    client: &dyn RemoteTreeClient,
    origin: &RepoOrigin,
    branch: &str,
    entries: &[TreeEntry],
    deadline: Option<Instant>,
    on_progress: Option<&ProgressCallback>,
) -> BatchFetchOutcome {
    let mut outcome = BatchFetchOutcome::default();
    let total_batches = entries.len().div_ceil(FETCH_BATCH_SIZE);

    for (index, batch) in entries.chunks(FETCH_BATCH_SIZE).enumerate() {
        emit(
            on_progress,
            SyncProgress::FetchingBatch {
                batch: index + 1,
                total_batches,
            },
        );

        let fetches = batch
            .iter()
            .map(|entry| fetch_one(client, origin, branch, entry, deadline));
        let results = futures::future::join_all(fetches).await;
        outcome.results.extend(results);
    }

    outcome
}

async fn fetch_one(
    client: &dyn RemoteTreeClient,
    origin: &RepoOrigin,
    branch: &str,
    entry: &TreeEntry,
    deadline: Option<Instant>,
) -> Result<FetchedFile, EntryFetchError> {
    let fail = |kind| EntryFetchError {
        path: entry.path.clone(),
        kind,
    };

    let fetch = client.fetch_blob(origin, &entry.path, branch);
    let payload = match deadline {
        Some(at) => match tokio::time::timeout_at(at, fetch).await {
            Ok(result) => result,
            Err(_) => return Err(fail(FetchErrorKind::DeadlineExceeded)),
        },
        None => fetch.await,
    }
    .map_err(|e| fail(FetchErrorKind::Remote(e)))?;

    if payload.encoding != "base64" {
        return Err(fail(FetchErrorKind::UnsupportedEncoding(payload.encoding)));
    }
    if payload.content.is_empty() {
        return Err(fail(FetchErrorKind::EmptyContent));
    }

    let content = decode_base64(&payload.content).map_err(|e| fail(FetchErrorKind::Decode(e)))?;
    if content.is_empty() {
        return Err(fail(FetchErrorKind::EmptyContent));
    }

    let size = content.len() as i64;
    Ok(FetchedFile {
        path: entry.path.clone(),
        content,
        size,
        content_hash: payload.sha.clone(),
    })
}

/// Decode base64 content, tolerating the line breaks the remote inserts.
fn decode_base64(content: &str) -> Result<String, base64::DecodeError> {
    let compact: String = content.split_whitespace().collect();
    let bytes = BASE64.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
