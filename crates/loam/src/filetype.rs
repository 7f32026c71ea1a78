//! File type classification by extension.
//!
//! Both tables here are compiled-in rather than runtime-configurable. The
//! allow-list decides sync eligibility; the MIME table labels stored files.

/// Extensions eligible for mirroring: text and source formats only.
/// Lower-cased, compared against the substring after the last `.`.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    // Markdown and plain text
    "md", "markdown", "txt", "rst", "org",
    // Structured data
    "json", "yaml", "yml", "toml", "xml", "csv", "ini",
    // Programming language source
    "rs", "ts", "tsx", "js", "jsx", "py", "rb", "go", "java", "c", "h", "cpp", "hpp", "cs", "php",
    "swift", "kt", "scala", "lua", "sql",
    // Stylesheet and markup
    "html", "htm", "css", "scss", "less", "svg", "tex",
    // Shell
    "sh", "bash", "zsh", "fish", "ps1",
];

/// Extract the lower-cased extension from a path, if any.
///
/// The extension is the substring after the last `.` of the final path
/// segment. Dotfiles like `.gitignore` and names ending in `.` have none.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

/// The final segment of a forward-slash separated path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether a path's extension appears in the allow-list.
pub fn is_allowed_extension(path: &str) -> bool {
    match extension(path) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// MIME type for a path, derived from its extension. Unknown or missing
/// extensions map to `text/plain` since only text formats pass the
/// allow-list.
pub fn mime_type(path: &str) -> &'static str {
    let ext = match extension(path) {
        Some(ext) => ext,
        None => return "text/plain",
    };
    match ext.as_str() {
        "md" | "markdown" => "text/markdown",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" | "scss" | "less" => "text/css",
        "svg" => "image/svg+xml",
        "js" | "jsx" => "text/javascript",
        "ts" | "tsx" => "text/typescript",
        "rs" => "text/x-rust",
        "py" => "text/x-python",
        "rb" => "text/x-ruby",
        "go" => "text/x-go",
        "java" => "text/x-java-source",
        "c" | "h" => "text/x-c",
        "cpp" | "hpp" => "text/x-c++",
        "cs" => "text/x-csharp",
        "php" => "text/x-php",
        "swift" => "text/x-swift",
        "kt" => "text/x-kotlin",
        "scala" => "text/x-scala",
        "lua" => "text/x-lua",
        "sql" => "application/sql",
        "sh" | "bash" | "zsh" | "fish" => "application/x-sh",
        "ps1" => "application/x-powershell",
        "tex" => "application/x-tex",
        _ => "text/plain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("README.MD"), Some("md".to_string()));
        assert_eq!(extension("src/main.rs"), Some("rs".to_string()));
    }

    #[test]
    fn extension_handles_missing_and_dotfiles() {
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension(".gitignore"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn extension_uses_final_segment_only() {
        assert_eq!(extension("a.b/file"), None);
        assert_eq!(extension("a.b/file.txt"), Some("txt".to_string()));
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(file_name("docs/notes/today.md"), "today.md");
        assert_eq!(file_name("single.md"), "single.md");
    }

    #[test]
    fn allow_list_rejects_binaries() {
        assert!(is_allowed_extension("notes/idea.md"));
        assert!(is_allowed_extension("src/app.ts"));
        assert!(!is_allowed_extension("assets/logo.png"));
        assert!(!is_allowed_extension("bin/tool.exe"));
        assert!(!is_allowed_extension("Makefile"));
    }

    #[test]
    fn mime_types_match_extensions() {
        assert_eq!(mime_type("a.md"), "text/markdown");
        assert_eq!(mime_type("a.json"), "application/json");
        assert_eq!(mime_type("a.rs"), "text/x-rust");
        assert_eq!(mime_type("script.sh"), "application/x-sh");
        assert_eq!(mime_type("LICENSE"), "text/plain");
    }
}
