use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::source::{ActiveModel, Column, Entity as Source, Model};
use crate::entity::source_mode::SourceMode;
use crate::filetype;

use super::errors::{Result, StoreError};

/// Optional fields applied when a source is created or refreshed.
#[derive(Debug, Clone, Default)]
pub struct SourceMetadata {
    /// Display name. Defaults to the origin's final segment.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Owner identity. Defaults to `local`.
    pub owner_login: Option<String>,
}

// ─── Single Record Operations ────────────────────────────────────────────────

/// Find a source by its UUID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>> {
    Source::find_by_id(id).one(db).await.map_err(StoreError::from)
}

/// Find a source by its natural key (origin + mode).
pub async fn find_by_origin(
    db: &DatabaseConnection,
    origin: &str,
    mode: SourceMode,
) -> Result<Option<Model>> {
    Source::find()
        .filter(Column::Origin.eq(origin))
        .filter(Column::Mode.eq(mode))
        .one(db)
        .await
        .map_err(StoreError::from)
}

/// List all sources, most recently updated first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Source::find()
        .order_by_desc(Column::UpdatedAt)
        .all(db)
        .await
        .map_err(StoreError::from)
}

/// Find or create a source by its natural key (origin + mode).
///
/// If a source with the same origin and mode exists, its branch and
/// description are refreshed. Otherwise a new source is inserted. Repeated
/// syncs of the same repository therefore reuse one row.
pub async fn ensure(
    db: &DatabaseConnection,
    origin: &str,
    mode: SourceMode,
    branch: Option<&str>,
    metadata: SourceMetadata,
) -> Result<Model> {
    mode.validate_origin(origin)
        .map_err(StoreError::invalid_input)?;

    let now = Utc::now().fixed_offset();
    let existing = find_by_origin(db, origin, mode).await?;

    match existing {
        Some(existing) => {
            let mut model = ActiveModel::from(existing);
            model.branch = Set(branch.map(String::from));
            if let Some(description) = metadata.description {
                model.description = Set(Some(description));
            }
            model.updated_at = Set(now);
            model.update(db).await.map_err(StoreError::from)
        }
        None => {
            let name = metadata
                .name
                .unwrap_or_else(|| filetype::file_name(origin).to_string());
            let model = ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name),
                mode: Set(mode),
                origin: Set(origin.to_string()),
                branch: Set(branch.map(String::from)),
                description: Set(metadata.description),
                owner_login: Set(metadata.owner_login.unwrap_or_else(|| "local".to_string())),
                synced_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            model.insert(db).await.map_err(StoreError::from)
        }
    }
}

/// Record a successful sync completion time on the source.
pub async fn mark_synced(db: &DatabaseConnection, id: Uuid) -> Result<Model> {
    let existing = find_by_id(db, id)
        .await?
        .ok_or_else(|| StoreError::not_found_by_id(id))?;

    let now = Utc::now().fixed_offset();
    let mut model = ActiveModel::from(existing);
    model.synced_at = Set(Some(now));
    model.updated_at = Set(now);
    model.update(db).await.map_err(StoreError::from)
}

/// Delete a source by its UUID. Files and sync logs cascade.
///
/// Returns the number of rows deleted (0 or 1).
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<u64> {
    let result = Source::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use super::*;
    use crate::connect_and_migrate;

    async fn setup_db() -> DatabaseConnection {
        connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate")
    }

    #[tokio::test]
    async fn ensure_creates_then_reuses_row() {
        let db = setup_db().await;

        let first = ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            Some("main"),
            SourceMetadata::default(),
        )
        .await
        .expect("first ensure should insert");
        assert_eq!(first.name, "notes");
        assert_eq!(first.branch.as_deref(), Some("main"));
        assert_eq!(first.owner_login, "local");

        let second = ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            Some("dev"),
            SourceMetadata {
                description: Some("scratch".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("second ensure should update");
        assert_eq!(second.id, first.id);
        assert_eq!(second.branch.as_deref(), Some("dev"));
        assert_eq!(second.description.as_deref(), Some("scratch"));

        let all = list(&db).await.expect("list should succeed");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn ensure_rejects_invalid_origin_for_mode() {
        let db = setup_db().await;

        let err = ensure(
            &db,
            "not-a-repo",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect_err("invalid origin should fail");
        assert!(matches!(err, StoreError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn same_origin_different_mode_gets_own_row() {
        let db = setup_db().await;

        ensure(
            &db,
            "https://example.com/page",
            SourceMode::Link,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("link source should insert");
        ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("remote source should insert");

        assert_eq!(list(&db).await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn mark_synced_sets_timestamp() {
        let db = setup_db().await;
        let source = ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("ensure");
        assert!(source.synced_at.is_none());

        let marked = mark_synced(&db, source.id).await.expect("mark synced");
        assert!(marked.synced_at.is_some());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let db = setup_db().await;
        let source = ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("ensure");

        assert_eq!(delete(&db, source.id).await.expect("delete"), 1);
        assert_eq!(delete(&db, source.id).await.expect("delete again"), 0);
        assert!(find_by_id(&db, source.id)
            .await
            .expect("lookup")
            .is_none());
    }
}
