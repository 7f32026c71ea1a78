use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::sync_log::{ActiveModel, Column, Entity as SyncLog, Model};
use crate::entity::sync_status::SyncStatus;

use super::errors::{Result, StoreError};

/// Find the in-flight log for a source, if any.
pub async fn find_in_flight(db: &DatabaseConnection, source_id: Uuid) -> Result<Option<Model>> {
    SyncLog::find()
        .filter(Column::SourceId.eq(source_id))
        .filter(Column::Status.eq(SyncStatus::Syncing))
        .one(db)
        .await
        .map_err(StoreError::from)
}

/// Open a sync log for a source with status `syncing`.
///
/// Fails with [`StoreError::SyncInFlight`] when the source already has an
/// open log, so concurrent syncs of the same source are rejected up front.
pub async fn open(db: &DatabaseConnection, source_id: Uuid) -> Result<Model> {
    if find_in_flight(db, source_id).await?.is_some() {
        return Err(StoreError::SyncInFlight { source_id });
    }

    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        source_id: Set(source_id),
        status: Set(SyncStatus::Syncing),
        files_added: Set(0),
        started_at: Set(Utc::now().fixed_offset()),
        completed_at: Set(None),
    };
    model.insert(db).await.map_err(StoreError::from)
}

/// Close a log as `success`, recording the final file count.
pub async fn close_success(db: &DatabaseConnection, log_id: Uuid, files_added: i32) -> Result<Model> {
    close(db, log_id, SyncStatus::Success, files_added).await
}

/// Close a log as `failure`, recording however many files landed first.
pub async fn close_failure(db: &DatabaseConnection, log_id: Uuid, files_added: i32) -> Result<Model> {
    close(db, log_id, SyncStatus::Failure, files_added).await
}

async fn close(
    db: &DatabaseConnection,
    log_id: Uuid,
    status: SyncStatus,
    files_added: i32,
) -> Result<Model> {
    let existing = SyncLog::find_by_id(log_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found_by_id(log_id))?;

    // Closing is one-way; a terminal log stays as it was closed.
    if existing.status.is_terminal() {
        return Err(StoreError::invalid_input(format!(
            "Sync log {log_id} already closed as {}",
            existing.status
        )));
    }

    let mut model = ActiveModel::from(existing);
    model.status = Set(status);
    model.files_added = Set(files_added);
    model.completed_at = Set(Some(Utc::now().fixed_offset()));
    model.update(db).await.map_err(StoreError::from)
}

/// List a source's logs, most recent first.
pub async fn list_for_source(db: &DatabaseConnection, source_id: Uuid) -> Result<Vec<Model>> {
    SyncLog::find()
        .filter(Column::SourceId.eq(source_id))
        .order_by_desc(Column::StartedAt)
        .all(db)
        .await
        .map_err(StoreError::from)
}

/// List all logs, most recent first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>> {
    SyncLog::find()
        .order_by_desc(Column::StartedAt)
        .all(db)
        .await
        .map_err(StoreError::from)
}
