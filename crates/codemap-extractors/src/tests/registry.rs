// Registry: language filtering and dispatch

use crate::base::ExtractError;
use crate::language::SUPPORTED_LANGUAGES;
use crate::manager::ExtractorRegistry;
use std::path::Path;

#[test]
fn test_every_supported_language_is_registered() {
    let registry = ExtractorRegistry::new();
    assert_eq!(registry.languages(), SUPPORTED_LANGUAGES.to_vec());
}

#[test]
fn test_registered_extensions_match_detection() {
    let registry = ExtractorRegistry::new();
    for language in registry.languages() {
        let extractor = registry.get(language).unwrap();
        for ext in extractor.extensions() {
            let path = format!("file{}", ext);
            assert_eq!(
                registry.language_for_path(Path::new(&path)),
                Some(language),
                "extension {} should map to {}",
                ext,
                language
            );
        }
    }
}

#[test]
fn test_allow_list_filters_languages() {
    let registry = ExtractorRegistry::with_languages(&["python", "markdown"]);

    assert_eq!(registry.languages(), vec!["markdown", "python"]);
    assert_eq!(registry.language_for_path(Path::new("a/b.py")), Some("python"));
    assert_eq!(registry.language_for_path(Path::new("a/b.rs")), None);
}

#[test]
fn test_empty_allow_list_enables_everything() {
    let registry = ExtractorRegistry::with_languages::<String>(&[]);
    assert_eq!(registry.languages().len(), SUPPORTED_LANGUAGES.len());
}

#[test]
fn test_extract_symbols_dispatch() {
    let registry = ExtractorRegistry::new();

    let symbols = registry
        .extract_symbols("python", "a.py", "def main():\n    pass\n")
        .unwrap();
    assert_eq!(symbols.len(), 1);

    let none = registry.extract_symbols("cobol", "a.cbl", "IDENTIFICATION DIVISION.").unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_syntax_failure_surfaces() {
    let registry = ExtractorRegistry::new();
    let err = registry
        .extract_symbols("python", "bad.py", ")))) (((( ::: ")
        .unwrap_err();
    assert!(matches!(err, ExtractError::Syntax { .. }));
    assert!(err.to_string().contains("bad.py"));
}
