//! SeaORM entity definitions for the loam database schema.

pub mod file_record;
pub mod prelude;
pub mod source;
pub mod source_mode;
pub mod sync_log;
pub mod sync_status;
