//! Sync log status enum.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a sync attempt. `Syncing` is the only non-terminal state and
/// transitions one-way to `Success` or `Failure`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[sea_orm(string_value = "syncing")]
    #[default]
    Syncing,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "failure")]
    Failure,
}

impl SyncStatus {
    /// True once the log has been closed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SyncStatus::Syncing)
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Syncing => write!(f, "syncing"),
            SyncStatus::Success => write!(f, "success"),
            SyncStatus::Failure => write!(f, "failure"),
        }
    }
}
