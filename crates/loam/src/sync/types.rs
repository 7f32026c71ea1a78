//! Shared sync types: requests, outcomes, and the operation-level error.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::remote::{OriginParseError, RemoteError, RepoOrigin};
use crate::store::StoreError;
use crate::sync::policy::DEFAULT_MAX_FILES;

/// Parameters for one sync operation.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// The repository to mirror.
    pub origin: RepoOrigin,
    /// Branch to sync. None means the remote's default branch.
    pub branch: Option<String>,
    /// Whether to mirror file contents. When false the sync only registers
    /// the source and records an empty log.
    pub sync_files: bool,
    /// Ceiling on files mirrored per sync, applied after filtering.
    pub max_files: usize,
    /// Optional overall deadline for the operation.
    pub timeout: Option<Duration>,
}

impl SyncRequest {
    /// Build a request with the default file cap, no deadline, and file
    /// syncing enabled.
    pub fn new(origin: RepoOrigin) -> Self {
        Self {
            origin,
            branch: None,
            sync_files: true,
            max_files: DEFAULT_MAX_FILES,
            timeout: None,
        }
    }
}

/// Summary of a completed sync operation.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The source row the sync wrote to.
    pub source_id: Uuid,
    /// The sync log row recording this attempt.
    pub log_id: Uuid,
    /// The origin that was synced.
    pub origin: RepoOrigin,
    /// The branch that was synced.
    pub branch: String,
    /// Files successfully written this sync.
    pub files_synced: usize,
    /// Entries submitted to the fetcher (after filtering and capping).
    pub attempted: usize,
    /// True when the remote listing was truncated and no files were synced.
    pub truncated: bool,
}

/// Operation-level sync failures.
///
/// Per-file problems never surface here; they are swallowed by the fetcher
/// and reconciler so the sync makes maximal forward progress.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The origin string was not a valid `owner/repo`.
    #[error(transparent)]
    InvalidOrigin(#[from] OriginParseError),

    /// The remote repository could not be resolved or listed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The local store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Another sync for the same source is still in flight.
    #[error("A sync for '{origin}' is already in progress")]
    AlreadySyncing { origin: String },

    /// The operation exceeded its deadline.
    #[error("Sync deadline exceeded")]
    DeadlineExceeded,
}

impl SyncError {
    /// Whether the failure maps to a client-side cause (bad input, missing
    /// repository, rejected credential, concurrent sync) rather than a
    /// server-side fault.
    pub fn is_client_fault(&self) -> bool {
        match self {
            Self::InvalidOrigin(_) | Self::AlreadySyncing { .. } => true,
            Self::Remote(err) => err.is_credential_rejection() || err.is_not_found(),
            Self::Store(StoreError::SyncInFlight { .. }) => true,
            _ => false,
        }
    }
}
