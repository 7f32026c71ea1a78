//! Source entity - a registered origin of files.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::source_mode::SourceMode;

/// Source model - a named pointer to a remote or local origin of files.
///
/// (`origin`, `mode`) is the natural key: repeated syncs of the same
/// repository reuse one row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sources")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name, defaults to the origin's final segment.
    pub name: String,
    /// How the origin is interpreted (remote repo, link, local folder).
    pub mode: SourceMode,
    /// Origin path: `owner/repo` for remote, a URL for link, a path for
    /// local_sync.
    pub origin: String,
    /// Branch to sync (remote mode only; None means the default branch).
    pub branch: Option<String>,
    /// Free-form description.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Owner identity (login) this source belongs to.
    pub owner_login: String,
    /// When the last successful sync completed.
    pub synced_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A source owns its mirrored files.
    #[sea_orm(has_many = "super::file_record::Entity")]
    FileRecord,
    /// A source owns its sync logs.
    #[sea_orm(has_many = "super::sync_log::Entity")]
    SyncLog,
}

impl Related<super::file_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FileRecord.def()
    }
}

impl Related<super::sync_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SyncLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn model_round_trips_through_serde() {
        let now = Utc::now().fixed_offset();
        let model = Model {
            id: Uuid::new_v4(),
            name: "notes".to_string(),
            mode: SourceMode::Remote,
            origin: "octocat/notes".to_string(),
            branch: Some("main".to_string()),
            description: None,
            owner_login: "local".to_string(),
            synced_at: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&model).expect("serialize");
        let back: Model = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, model);
        assert!(json.contains("\"remote\""));
    }
}
