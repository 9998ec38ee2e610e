// CSS extraction: selector typing, media nesting, at-rules

use super::test_utils::{extract, names};
use crate::base::SymbolKind;
use crate::languages::css;

const CODE: &str = r#"@import url("reset.css");

/* Site-wide variables */
:root {
    --accent: #0af;
}

.button, .link {
    color: red;
}

#header {
    background: blue;
}

.card {
    display: flex;
    padding: 20px;
    margin: 10px;
    border: 1px solid #ccc;
}

@media (max-width: 768px) {
    .sidebar { display: none; }
    nav ul li a { padding: 4px; }
}

@keyframes fadeIn {
    from { opacity: 0; }
    to { opacity: 1; }
}
"#;

#[test]
fn test_css_symbols() {
    let symbols = extract(&css::extractor(), CODE, "static/site.css");
    assert_eq!(
        names(&symbols),
        vec![
            "@import reset.css",
            ":root",
            ".button",
            "#header",
            ".card",
            "@media (max-width: 768px)",
            "@keyframes fadeIn",
        ]
    );

    let kinds: Vec<&str> = symbols.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["import", "pseudo", "class", "id", "class", "media", "keyframe"]
    );
}

#[test]
fn test_rule_set_signature_and_comment() {
    let symbols = extract(&css::extractor(), CODE, "static/site.css");

    let root = &symbols[1];
    assert_eq!(root.docstring.as_deref(), Some("Site-wide variables"));
    assert_eq!((root.lines.start, root.lines.end), (4, 6));

    assert_eq!(symbols[2].signature.as_deref(), Some("{color}"));
    assert_eq!(
        symbols[4].signature.as_deref(),
        Some("{display, padding, margin, ...} (4 properties)")
    );
}

#[test]
fn test_media_nests_rule_sets() {
    let symbols = extract(&css::extractor(), CODE, "static/site.css");
    let media = &symbols[5];

    assert_eq!(names(&media.children), vec![".sidebar", "nav ul li a"]);
    assert_eq!(
        media.children[1].kind,
        SymbolKind::Other("selector".to_string())
    );
    // Keyframe steps are not rule sets
    assert!(symbols[6].children.is_empty());
}

#[test]
fn test_selector_names_are_bounded() {
    assert_eq!(css::selector_name("h1, h2, h3"), "h1");
    assert_eq!(css::selector_name(".a >\n  .b"), ".a > .b");

    let long = format!(".{}", "x".repeat(80));
    let name = css::selector_name(&long);
    assert_eq!(name.chars().count(), 50);
    assert!(name.ends_with("..."));
}

#[test]
fn test_import_targets() {
    assert_eq!(css::import_target("@import \"theme.css\";"), "theme.css");
    assert_eq!(css::import_target("@import url(print.css) print;"), "print.css");
    assert_eq!(css::import_target("@import 'a.css' screen;"), "a.css");
}

#[test]
fn test_empty_stylesheet() {
    assert!(extract(&css::extractor(), "", "empty.css").is_empty());
}
