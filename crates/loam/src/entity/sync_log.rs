//! SyncLog entity - audit record of one sync attempt against a source.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::sync_status::SyncStatus;

/// SyncLog model - one record per sync attempt.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sync_logs")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// The source this attempt belongs to.
    pub source_id: Uuid,
    /// Current status; `syncing` until closed exactly once.
    pub status: SyncStatus,
    /// Number of files written by this attempt.
    pub files_added: i32,

    pub started_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
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

impl Model {
    /// True while this attempt is still in flight.
    pub fn is_in_flight(&self) -> bool {
        self.status == SyncStatus::Syncing
    }
}
