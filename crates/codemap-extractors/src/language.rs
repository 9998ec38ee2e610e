// Extension to language tag mapping

use std::path::Path;

/// Every language tag with a registered extractor
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "c",
    "cpp",
    "csharp",
    "css",
    "go",
    "html",
    "java",
    "javascript",
    "kotlin",
    "markdown",
    "php",
    "python",
    "rust",
    "sql",
    "swift",
    "typescript",
    "yaml",
];

/// Maps a file extension (with or without the dot) to a language tag
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    let language = match ext.as_str() {
        "py" | "pyi" => "python",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "c" | "h" => "c",
        "cpp" | "hpp" | "cc" | "hh" | "cxx" | "hxx" => "cpp",
        "cs" => "csharp",
        "php" | "phtml" => "php",
        "css" => "css",
        "html" | "htm" => "html",
        "sql" => "sql",
        "md" | "markdown" => "markdown",
        "yaml" | "yml" => "yaml",
        _ => return None,
    };
    Some(language)
}

pub fn detect_language_from_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(detect_language_from_extension)
}
