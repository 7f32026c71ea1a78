//! Eligibility rules for mirroring tree entries.
//!
//! Pure decision logic, independent of transport. Three constraints apply in
//! order: entry type, size ceiling, extension allow-list. The surviving list
//! is then capped at `max_files` preserving the remote's original ordering;
//! no prioritization is attempted.

use crate::filetype;
use crate::remote::{EntryKind, TreeEntry, TreeListing};

/// Size ceiling in bytes for a mirrorable blob. Larger blobs are usually
/// binary or generated assets, not knowledge artifacts.
pub const MAX_BLOB_SIZE: i64 = 500_000;

/// Default ceiling on files mirrored per sync.
pub const DEFAULT_MAX_FILES: usize = 500;

/// Whether one tree entry passes all three constraints.
///
/// A blob with unknown size is rejected; the ceiling cannot be verified.
pub fn is_eligible(entry: &TreeEntry) -> bool {
    if entry.kind != EntryKind::Blob {
        return false;
    }
    match entry.size {
        Some(size) if size <= MAX_BLOB_SIZE => {}
        _ => return false,
    }
    filetype::is_allowed_extension(&entry.path)
}

/// Select the entries worth mirroring from a tree listing.
///
/// A truncated listing yields no candidates at all: the remote dropped
/// entries, so any subset mirrored from it would be silently incomplete.
pub fn select_candidates(listing: &TreeListing, max_files: usize) -> Vec<TreeEntry> {
    if listing.truncated {
        return Vec::new();
    }
    listing
        .entries
        .iter()
        .filter(|entry| is_eligible(entry))
        .take(max_files)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str, size: Option<i64>) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: EntryKind::Blob,
            sha: format!("sha-{path}"),
            size,
        }
    }

    fn tree(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: EntryKind::Tree,
            sha: format!("sha-{path}"),
            size: None,
        }
    }

    #[test]
    fn directories_are_never_eligible() {
        assert!(!is_eligible(&tree("docs")));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(is_eligible(&blob("a.md", Some(MAX_BLOB_SIZE))));
        assert!(!is_eligible(&blob("a.md", Some(MAX_BLOB_SIZE + 1))));
    }

    #[test]
    fn unknown_size_is_rejected() {
        assert!(!is_eligible(&blob("a.md", None)));
    }

    #[test]
    fn extension_outside_allow_list_is_rejected() {
        assert!(!is_eligible(&blob("logo.png", Some(10))));
        assert!(!is_eligible(&blob("Makefile", Some(10))));
        assert!(is_eligible(&blob("notes.md", Some(10))));
    }

    #[test]
    fn truncated_listing_yields_no_candidates() {
        let listing = TreeListing {
            entries: (0..50).map(|i| blob(&format!("f{i}.md"), Some(10))).collect(),
            truncated: true,
        };
        assert!(select_candidates(&listing, DEFAULT_MAX_FILES).is_empty());
    }

    #[test]
    fn cap_preserves_remote_ordering() {
        let listing = TreeListing {
            entries: vec![
                blob("a.md", Some(1)),
                tree("dir"),
                blob("b.md", Some(1)),
                blob("c.md", Some(1)),
            ],
            truncated: false,
        };
        let candidates = select_candidates(&listing, 2);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].path, "a.md");
        assert_eq!(candidates[1].path, "b.md");
    }

    #[test]
    fn mixed_listing_filters_each_constraint() {
        let listing = TreeListing {
            entries: vec![
                blob("keep.md", Some(100)),
                blob("keep.ts", Some(200)),
                blob("skip.png", Some(10)),
                blob("huge.md", Some(600_000)),
                tree("src"),
            ],
            truncated: false,
        };
        let candidates = select_candidates(&listing, DEFAULT_MAX_FILES);
        let paths: Vec<_> = candidates.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["keep.md", "keep.ts"]);
    }
}
