//! Remote hosting API seam: shared types, errors, and the client trait.
//!
//! The sync engine is written against [`RemoteTreeClient`] so it can be
//! exercised with a scripted client in tests and extended to other hosting
//! platforms without touching the engine. The concrete GitHub implementation
//! lives in [`crate::github`] (feature `github`).

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to a remote hosting API.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Network or transport failure reaching the remote.
    #[error("Remote unavailable: {message}")]
    Unavailable { message: String },

    /// The remote responded with a non-success status. Carries the upstream
    /// status and message so callers can pass them through.
    #[error("Remote rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Unexpected/internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RemoteError {
    /// Create an unavailable (transport) error.
    #[inline]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a rejected error from an upstream status and message.
    #[inline]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error came from a credential problem (401/403).
    #[inline]
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status == 401 || *status == 403)
    }

    /// Check if the remote reported the resource as missing.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status == 404)
    }
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Error returned when an `owner/repo` origin string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid repository origin '{origin}': expected exactly one '/' separating owner and repo")]
pub struct OriginParseError {
    /// The offending input.
    pub origin: String,
}

/// A parsed `owner/repo` origin.
///
/// Remote sources identify their origin with exactly one separator between a
/// non-empty owner and a non-empty repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoOrigin {
    owner: String,
    repo: String,
}

impl RepoOrigin {
    /// Parse an `owner/repo` string.
    pub fn parse(origin: &str) -> std::result::Result<Self, OriginParseError> {
        let mut parts = origin.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(OriginParseError {
                origin: origin.to_string(),
            }),
        }
    }

    /// The owner (user or organization) half.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name half.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for RepoOrigin {
    type Err = OriginParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository metadata returned by the remote.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoInfo {
    /// The branch the remote serves when none is requested.
    pub default_branch: String,
    /// Repository description, if any.
    #[serde(default)]
    pub description: Option<String>,
}

/// The kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A single file.
    Blob,
    /// A directory.
    Tree,
    /// A submodule or symlink; never mirrored.
    #[serde(other)]
    Other,
}

/// One entry of a recursive tree listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeEntry {
    /// Forward-slash relative path within the repository.
    pub path: String,
    /// Entry kind (`blob` for files, `tree` for directories).
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Remote-supplied content hash; used as the change-detection token.
    pub sha: String,
    /// Size in bytes. Absent for `tree` entries and for some blobs.
    #[serde(default)]
    pub size: Option<i64>,
}

/// A recursive tree listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TreeListing {
    /// All entries, in the remote's original order.
    #[serde(rename = "tree", default)]
    pub entries: Vec<TreeEntry>,
    /// True when the remote dropped entries because the listing exceeded its
    /// internal size limit. A truncated listing is unreliable.
    #[serde(default)]
    pub truncated: bool,
}

/// Raw blob content plus its transfer encoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobPayload {
    /// Transfer-encoded content (only `base64` is supported downstream).
    #[serde(default)]
    pub content: String,
    /// Transfer encoding tag reported by the remote.
    pub encoding: String,
    /// Content hash of the blob.
    pub sha: String,
    /// Size in bytes of the decoded content.
    #[serde(default)]
    pub size: Option<i64>,
}

/// Client for a remote hosting API's read endpoints.
///
/// Implementations hold the caller-supplied bearer credential internally and
/// keep no other state between calls.
#[async_trait]
pub trait RemoteTreeClient: Send + Sync {
    /// Fetch repository metadata, including its default branch.
    async fn fetch_repository(&self, origin: &RepoOrigin) -> Result<RepoInfo>;

    /// Fetch the recursive tree listing for a branch.
    async fn fetch_tree(&self, origin: &RepoOrigin, branch: &str) -> Result<TreeListing>;

    /// Fetch one blob's content (with its transfer encoding) for a path.
    async fn fetch_blob(&self, origin: &RepoOrigin, path: &str, branch: &str)
        -> Result<BlobPayload>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_owner_slash_repo() {
        let origin = RepoOrigin::parse("rust-lang/rust").expect("valid origin");
        assert_eq!(origin.owner(), "rust-lang");
        assert_eq!(origin.repo(), "rust");
        assert_eq!(origin.to_string(), "rust-lang/rust");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(RepoOrigin::parse("rust-lang").is_err());
    }

    #[test]
    fn parse_rejects_extra_separator() {
        assert!(RepoOrigin::parse("a/b/c").is_err());
    }

    #[test]
    fn parse_rejects_empty_halves() {
        assert!(RepoOrigin::parse("/repo").is_err());
        assert!(RepoOrigin::parse("owner/").is_err());
        assert!(RepoOrigin::parse("/").is_err());
        assert!(RepoOrigin::parse("").is_err());
    }

    #[test]
    fn from_str_round_trips() {
        let origin: RepoOrigin = "octocat/hello-world".parse().expect("valid origin");
        assert_eq!(origin.to_string(), "octocat/hello-world");
    }

    #[test]
    fn rejected_predicates() {
        assert!(RemoteError::rejected(401, "bad credentials").is_credential_rejection());
        assert!(RemoteError::rejected(403, "forbidden").is_credential_rejection());
        assert!(RemoteError::rejected(404, "not found").is_not_found());
        assert!(!RemoteError::rejected(500, "oops").is_credential_rejection());
        assert!(!RemoteError::unavailable("timeout").is_not_found());
    }

    #[test]
    fn tree_listing_deserializes_github_shape() {
        let json = r#"{
            "sha": "abc",
            "tree": [
                {"path": "README.md", "type": "blob", "sha": "aaa", "size": 120},
                {"path": "src", "type": "tree", "sha": "bbb"},
                {"path": "vendored", "type": "commit", "sha": "ccc"}
            ],
            "truncated": false
        }"#;
        let listing: TreeListing = serde_json::from_str(json).expect("valid listing");
        assert_eq!(listing.entries.len(), 3);
        assert_eq!(listing.entries[0].kind, EntryKind::Blob);
        assert_eq!(listing.entries[0].size, Some(120));
        assert_eq!(listing.entries[1].kind, EntryKind::Tree);
        assert_eq!(listing.entries[1].size, None);
        assert_eq!(listing.entries[2].kind, EntryKind::Other);
        assert!(!listing.truncated);
    }
}
