use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::file_record::{ActiveModel, Column, Entity as FileRecord, Model};
use crate::filetype;

use super::errors::{Result, StoreError};

/// Find a file by its natural key (source_id + path).
pub async fn find_by_path(
    db: &DatabaseConnection,
    source_id: Uuid,
    path: &str,
) -> Result<Option<Model>> {
    FileRecord::find()
        .filter(Column::SourceId.eq(source_id))
        .filter(Column::Path.eq(path))
        .one(db)
        .await
        .map_err(StoreError::from)
}

/// Write or overwrite the file record keyed by (source_id, path).
///
/// Name and MIME type are derived from the path. The same path synced twice
/// updates one row in place.
pub async fn upsert(
    db: &DatabaseConnection,
    source_id: Uuid,
    path: &str,
    content: String,
    size: i64,
    content_hash: &str,
) -> Result<Model> {
    if path.is_empty() {
        return Err(StoreError::invalid_input("File path must not be empty"));
    }

    let now = Utc::now().fixed_offset();
    let existing = find_by_path(db, source_id, path).await?;

    match existing {
        Some(existing) => {
            let mut model = ActiveModel::from(existing);
            model.content = Set(Some(content));
            model.size = Set(size);
            model.content_hash = Set(content_hash.to_string());
            model.updated_at = Set(now);
            model.update(db).await.map_err(StoreError::from)
        }
        None => {
            let model = ActiveModel {
                id: Set(Uuid::new_v4()),
                source_id: Set(source_id),
                path: Set(path.to_string()),
                name: Set(filetype::file_name(path).to_string()),
                content: Set(Some(content)),
                size: Set(size),
                content_hash: Set(content_hash.to_string()),
                mime_type: Set(filetype::mime_type(path).to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            model.insert(db).await.map_err(StoreError::from)
        }
    }
}

/// Count the files mirrored for a source.
pub async fn count_for_source(db: &DatabaseConnection, source_id: Uuid) -> Result<u64> {
    FileRecord::find()
        .filter(Column::SourceId.eq(source_id))
        .count(db)
        .await
        .map_err(StoreError::from)
}

/// List a source's files ordered by path.
pub async fn list_for_source(db: &DatabaseConnection, source_id: Uuid) -> Result<Vec<Model>> {
    FileRecord::find()
        .filter(Column::SourceId.eq(source_id))
        .order_by_asc(Column::Path)
        .all(db)
        .await
        .map_err(StoreError::from)
}

#[cfg(all(test, feature = "sqlite", feature = "migrate"))]
mod tests {
    use super::*;
    use crate::connect_and_migrate;
    use crate::entity::source_mode::SourceMode;
    use crate::store::source::{self, SourceMetadata};

    async fn setup() -> (DatabaseConnection, Uuid) {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let source = source::ensure(
            &db,
            "octocat/notes",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("source should insert");
        (db, source.id)
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates_in_place() {
        let (db, source_id) = setup().await;

        let first = upsert(&db, source_id, "docs/a.md", "one".to_string(), 3, "h1")
            .await
            .expect("insert");
        assert_eq!(first.name, "a.md");
        assert_eq!(first.mime_type, "text/markdown");
        assert_eq!(first.content.as_deref(), Some("one"));

        let second = upsert(&db, source_id, "docs/a.md", "two".to_string(), 3, "h2")
            .await
            .expect("update");
        assert_eq!(second.id, first.id);
        assert_eq!(second.content.as_deref(), Some("two"));
        assert_eq!(second.content_hash, "h2");

        assert_eq!(count_for_source(&db, source_id).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn paths_are_unique_per_source_not_globally() {
        let (db, source_id) = setup().await;
        let other = source::ensure(
            &db,
            "octocat/journal",
            SourceMode::Remote,
            None,
            SourceMetadata::default(),
        )
        .await
        .expect("second source");

        upsert(&db, source_id, "a.md", "x".to_string(), 1, "h")
            .await
            .expect("first");
        upsert(&db, other.id, "a.md", "y".to_string(), 1, "h")
            .await
            .expect("second");

        assert_eq!(count_for_source(&db, source_id).await.expect("count"), 1);
        assert_eq!(count_for_source(&db, other.id).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let (db, source_id) = setup().await;
        let err = upsert(&db, source_id, "", "x".to_string(), 1, "h")
            .await
            .expect_err("empty path");
        assert!(matches!(err, StoreError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn deleting_source_cascades_to_files() {
        let (db, source_id) = setup().await;
        upsert(&db, source_id, "a.md", "x".to_string(), 1, "h")
            .await
            .expect("upsert");

        source::delete(&db, source_id).await.expect("delete source");
        assert_eq!(count_for_source(&db, source_id).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn list_orders_by_path() {
        let (db, source_id) = setup().await;
        upsert(&db, source_id, "b.md", "x".to_string(), 1, "h")
            .await
            .expect("b");
        upsert(&db, source_id, "a.md", "y".to_string(), 1, "h")
            .await
            .expect("a");

        let files = list_for_source(&db, source_id).await.expect("list");
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.md", "b.md"]);
    }
}
