//! Loam - a personal knowledge base that mirrors remote repository trees.
//!
//! This library provides the storage schema and sync engine behind loam's
//! "sources": registered origins (a remote repository, an external link, or a
//! locally synced folder) whose files are mirrored into a local database.
//!
//! # Features
//!
//! - `github` - Enables the remote tree client for GitHub-style hosting APIs.
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//!
//! # Example
//!
//! ```ignore
//! use loam::{connect_and_migrate, github::TreeClient, sync};
//!
//! let db = connect_and_migrate("sqlite://loam.db?mode=rwc").await?;
//! let client = TreeClient::new("ghp_...");
//!
//! let request = sync::SyncRequest::new("rust-lang/mdBook".parse()?);
//! let outcome = sync::sync_repository(&db, &client, request, None).await?;
//! println!("synced {} files", outcome.files_synced);
//! ```

pub mod db;
pub mod entity;
pub mod filetype;
pub mod remote;
pub mod store;
pub mod sync;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use remote::{RemoteError, RemoteTreeClient, RepoOrigin};
pub use store::StoreError;
pub use sync::{SyncError, SyncOutcome, SyncRequest};
