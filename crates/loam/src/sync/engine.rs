//! Sync orchestration: resolve, list, filter, fetch, reconcile, log.

use std::future::Future;

use sea_orm::DatabaseConnection;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entity::source_mode::SourceMode;
use crate::remote::{self, RemoteTreeClient, RepoOrigin};
use crate::store::{self, StoreError};
use crate::sync::fetcher::fetch_all;
use crate::sync::policy::select_candidates;
use crate::sync::progress::{emit, ProgressCallback, SyncProgress};
use crate::sync::types::{SyncError, SyncOutcome, SyncRequest};

/// Mirror one remote repository into the local store.
///
/// The operation resolves the repository, registers (or refreshes) its
/// source row, opens a sync log, and then mirrors eligible files. Per-file
/// problems are swallowed; operation-level faults close the log as
/// `failure` before the error is returned, so a log never sticks at
/// `syncing` past its operation.
#[tracing::instrument(
    skip(db, client, request, on_progress),
    fields(origin = %request.origin)
)]
pub async fn sync_repository(
    db: &DatabaseConnection,
    client: &dyn RemoteTreeClient,
    request: SyncRequest,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome, SyncError> {
    let deadline = request.timeout.map(|timeout| Instant::now() + timeout);
    let origin = request.origin.clone();

    emit(
        on_progress,
        SyncProgress::ResolvingRepository {
            origin: origin.to_string(),
        },
    );
    let repo = with_deadline(deadline, client.fetch_repository(&origin)).await?;
    let branch = request
        .branch
        .clone()
        .unwrap_or_else(|| repo.default_branch.clone());
    debug!(branch = %branch, "Resolved repository");

    let source = store::source::ensure(
        db,
        &origin.to_string(),
        SourceMode::Remote,
        Some(&branch),
        store::source::SourceMetadata {
            description: repo.description,
            ..Default::default()
        },
    )
    .await?;

    let log = store::sync_log::open(db, source.id)
        .await
        .map_err(|err| match err {
            StoreError::SyncInFlight { .. } => SyncError::AlreadySyncing {
                origin: origin.to_string(),
            },
            other => SyncError::Store(other),
        })?;

    let result = if request.sync_files {
        mirror_files(
            db,
            client,
            &origin,
            &branch,
            source.id,
            &request,
            deadline,
            on_progress,
        )
        .await
    } else {
        Ok(MirrorResult::default())
    };

    match result {
        Ok(mirror) => {
            store::sync_log::close_success(db, log.id, mirror.files_synced as i32).await?;
            store::source::mark_synced(db, source.id).await?;
            info!(
                files_synced = mirror.files_synced,
                attempted = mirror.attempted,
                truncated = mirror.truncated,
                "Sync complete"
            );
            emit(
                on_progress,
                SyncProgress::Completed {
                    files_synced: mirror.files_synced,
                    attempted: mirror.attempted,
                },
            );
            Ok(SyncOutcome {
                source_id: source.id,
                log_id: log.id,
                origin,
                branch,
                files_synced: mirror.files_synced,
                attempted: mirror.attempted,
                truncated: mirror.truncated,
            })
        }
        Err(err) => {
            // The log must not stay at `syncing` past its operation.
            if let Err(close_err) = store::sync_log::close_failure(db, log.id, 0).await {
                warn!(error = %close_err, "Failed to close sync log after fault");
            }
            Err(err)
        }
    }
}

#[derive(Debug, Default)]
struct MirrorResult {
    files_synced: usize,
    attempted: usize,
    truncated: bool,
}

#[allow(clippy::too_many_arguments)]
async fn mirror_files(
    db: &DatabaseConnection,
    client: &dyn RemoteTreeClient,
    origin: &RepoOrigin,
    branch: &str,
    source_id: Uuid,
    request: &SyncRequest,
    deadline: Option<Instant>,
    on_progress: Option<&ProgressCallback>,
) -> Result<MirrorResult, SyncError> {
    emit(
        on_progress,
        SyncProgress::ListingTree {
            branch: branch.to_string(),
        },
    );
    let listing = with_deadline(deadline, client.fetch_tree(origin, branch)).await?;
    let candidates = select_candidates(&listing, request.max_files);
    emit(
        on_progress,
        SyncProgress::TreeListed {
            total: listing.entries.len(),
            eligible: candidates.len(),
            truncated: listing.truncated,
        },
    );

    if listing.truncated {
        warn!("Tree listing truncated; refusing to mirror a partial view");
        return Ok(MirrorResult {
            truncated: true,
            ..Default::default()
        });
    }

    let fetched = fetch_all(client, origin, branch, &candidates, deadline, on_progress).await;

    let mut files_synced = 0usize;
    for result in &fetched.results {
        match result {
            Ok(file) => {
                match store::file_record::upsert(
                    db,
                    source_id,
                    &file.path,
                    file.content.clone(),
                    file.size,
                    &file.content_hash,
                )
                .await
                {
                    Ok(_) => {
                        files_synced += 1;
                        emit(
                            on_progress,
                            SyncProgress::FileSynced {
                                path: file.path.clone(),
                            },
                        );
                    }
                    Err(err) => {
                        // Same partial-progress policy as fetch failures.
                        warn!(path = %file.path, error = %err, "Failed to store file");
                        emit(
                            on_progress,
                            SyncProgress::FileSkipped {
                                path: file.path.clone(),
                                error: err.to_string(),
                            },
                        );
                    }
                }
            }
            Err(err) => {
                warn!(path = %err.path, error = %err.kind, "Failed to fetch file");
                emit(
                    on_progress,
                    SyncProgress::FileSkipped {
                        path: err.path.clone(),
                        error: err.kind.to_string(),
                    },
                );
            }
        }
    }

    Ok(MirrorResult {
        files_synced,
        attempted: fetched.attempted(),
        truncated: false,
    })
}

async fn with_deadline<T, F>(deadline: Option<Instant>, fut: F) -> Result<T, SyncError>
where
    F: Future<Output = remote::Result<T>>,
{
    match deadline {
        Some(at) => match tokio::time::timeout_at(at, fut).await {
            Ok(result) => result.map_err(SyncError::from),
            Err(_) => Err(SyncError::DeadlineExceeded),
        },
        None => fut.await.map_err(SyncError::from),
    }
}
