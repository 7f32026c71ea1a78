//! Source mode enum - how a source's files reach the local store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::remote::RepoOrigin;

/// How a source's origin is interpreted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Mirrored from a remote repository; origin is `owner/repo`.
    #[sea_orm(string_value = "remote")]
    #[default]
    Remote,
    /// A bookmarked external link; origin is a URL.
    #[sea_orm(string_value = "link")]
    Link,
    /// A locally synced folder; origin is a filesystem path.
    #[sea_orm(string_value = "local_sync")]
    LocalSync,
}

impl SourceMode {
    /// Validate an origin string against this mode's invariant.
    ///
    /// `Remote` origins must contain exactly one `/` separating owner and
    /// repo; `Link` origins must be syntactically valid URLs. `LocalSync`
    /// accepts any non-empty path.
    pub fn validate_origin(&self, origin: &str) -> Result<(), String> {
        match self {
            SourceMode::Remote => RepoOrigin::parse(origin)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            SourceMode::Link => url::Url::parse(origin)
                .map(|_| ())
                .map_err(|e| format!("Invalid link origin '{origin}': {e}")),
            SourceMode::LocalSync => {
                if origin.is_empty() {
                    Err("Local sync origin must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::Remote => write!(f, "remote"),
            SourceMode::Link => write!(f, "link"),
            SourceMode::LocalSync => write!(f, "local_sync"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_remote() {
        assert_eq!(SourceMode::default(), SourceMode::Remote);
    }

    #[test]
    fn display_outputs_expected_strings() {
        assert_eq!(SourceMode::Remote.to_string(), "remote");
        assert_eq!(SourceMode::Link.to_string(), "link");
        assert_eq!(SourceMode::LocalSync.to_string(), "local_sync");
    }

    #[test]
    fn remote_origin_requires_owner_repo() {
        assert!(SourceMode::Remote.validate_origin("octocat/notes").is_ok());
        assert!(SourceMode::Remote.validate_origin("octocat").is_err());
        assert!(SourceMode::Remote.validate_origin("a/b/c").is_err());
    }

    #[test]
    fn link_origin_requires_url() {
        assert!(SourceMode::Link
            .validate_origin("https://example.com/page")
            .is_ok());
        assert!(SourceMode::Link.validate_origin("not a url").is_err());
    }

    #[test]
    fn local_sync_origin_requires_non_empty() {
        assert!(SourceMode::LocalSync.validate_origin("/home/me/notes").is_ok());
        assert!(SourceMode::LocalSync.validate_origin("").is_err());
    }
}
