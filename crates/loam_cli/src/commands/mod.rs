//! Command handlers for the loam CLI.

pub(crate) mod log;
pub(crate) mod meta;
#[cfg(feature = "migrate")]
pub(crate) mod migrate;
pub(crate) mod source;
#[cfg(feature = "github")]
pub(crate) mod sync;
