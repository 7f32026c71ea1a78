//! GitHub REST client for repository metadata, trees, and blob contents.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::remote::{
    BlobPayload, RemoteError, RemoteTreeClient, RepoInfo, RepoOrigin, Result, TreeListing,
};

/// Default base URL for the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub tree client authenticated with a bearer token.
///
/// The token is supplied at construction, sent as an `Authorization` header
/// on every request, and never logged. No other state is kept between calls.
#[derive(Clone)]
pub struct TreeClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for TreeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token deliberately omitted.
        f.debug_struct("TreeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TreeClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a client against an alternate base URL (GitHub Enterprise, or
    /// a local stub server in tests).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Make an authenticated GET request and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, route);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "loam")
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| RemoteError::unavailable(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        match status {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| RemoteError::internal(format!("JSON parse error: {e}"))),
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<unreadable body>"));
                Err(RemoteError::rejected(status.as_u16(), truncate(&message)))
            }
        }
    }
}

/// Keep upstream error bodies short enough for logs.
fn truncate(message: &str) -> String {
    const MAX: usize = 256;
    if message.len() <= MAX {
        message.to_string()
    } else {
        let mut end = MAX;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &message[..end])
    }
}

fn encode_path(path: &str) -> String {
    // Minimal percent-encoding for path segments; slashes stay literal since
    // GitHub's contents endpoint takes the repo-relative path in the route.
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[async_trait]
impl RemoteTreeClient for TreeClient {
    async fn fetch_repository(&self, origin: &RepoOrigin) -> Result<RepoInfo> {
        let route = format!("/repos/{}/{}", origin.owner(), origin.repo());
        self.get_json(&route).await
    }

    async fn fetch_tree(&self, origin: &RepoOrigin, branch: &str) -> Result<TreeListing> {
        let route = format!(
            "/repos/{}/{}/git/trees/{}?recursive=1",
            origin.owner(),
            origin.repo(),
            encode_segment(branch),
        );
        self.get_json(&route).await
    }

    async fn fetch_blob(
        &self,
        origin: &RepoOrigin,
        path: &str,
        branch: &str,
    ) -> Result<BlobPayload> {
        let route = format!(
            "/repos/{}/{}/contents/{}?ref={}",
            origin.owner(),
            origin.repo(),
            encode_path(path),
            encode_segment(branch),
        );
        self.get_json(&route).await
    }
}
