//! Common re-exports for convenient entity usage.

pub use super::file_record::{
    ActiveModel as FileRecordActiveModel, Column as FileRecordColumn, Entity as FileRecord,
    Model as FileRecordModel,
};
pub use super::source::{
    ActiveModel as SourceActiveModel, Column as SourceColumn, Entity as Source,
    Model as SourceModel,
};
pub use super::source_mode::SourceMode;
pub use super::sync_log::{
    ActiveModel as SyncLogActiveModel, Column as SyncLogColumn, Entity as SyncLog,
    Model as SyncLogModel,
};
pub use super::sync_status::SyncStatus;
