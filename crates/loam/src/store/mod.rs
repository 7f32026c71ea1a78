//! Persistent store operations for sources, sync logs, and mirrored files.

mod errors;
pub mod file_record;
pub mod source;
pub mod sync_log;

pub use errors::{Result, StoreError};
