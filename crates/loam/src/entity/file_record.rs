//! FileRecord entity - a mirrored copy of one remote blob.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// FileRecord model - one mirrored file, unique per (source, path).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// The source this file belongs to.
    pub source_id: Uuid,
    /// Relative, forward-slash separated path; unique within a source.
    pub path: String,
    /// The path's final segment.
    pub name: String,
    /// Decoded content. None if not yet fetched.
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    /// Size in bytes.
    pub size: i64,
    /// Remote-supplied content hash; the change-detection token for a future
    /// incremental sync.
    pub content_hash: String,
    /// MIME type derived from the file extension.
    pub mime_type: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::source::Entity",
        from = "Column::SourceId",
        to = "super::source::Column::Id"
    )]
    Source,
}

impl Related<super::source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Source.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
