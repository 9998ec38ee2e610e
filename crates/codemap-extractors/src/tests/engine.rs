// Generic interpreter behaviour, exercised through small hand-written rule
// tables over the Python grammar

use super::test_utils::{extract, find, names};
use crate::base::SymbolKind;
use crate::engine::{SymbolExtractor, TreeSitterExtractor};
use crate::rules::{DocStrategy, LanguageSpec, NodeRule};
use tree_sitter::Language;

fn python(_: &str) -> Language {
    tree_sitter_python::LANGUAGE.into()
}

fn spec_with(class_rule: NodeRule) -> TreeSitterExtractor {
    let spec = LanguageSpec::new("python", &[".py"], python)
        .rule("class_definition", class_rule)
        .rule(
            "function_definition",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["parameters"])
                .doc(DocStrategy::None),
        )
        .comments(&["comment"]);
    TreeSitterExtractor::new(spec)
}

const CODE: &str = r#"# Top-level helper.
def helper(x):
    return x

class Outer:
    def method(self):
        def nested():
            pass
        return nested

    class Inner:
        def deep(self):
            pass

if True:
    def conditional():
        pass
"#;

#[test]
fn test_functions_in_bodies_become_methods() {
    let extractor = spec_with(NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["block"]));
    let symbols = extract(&extractor, CODE, "sample.py");

    let helper = find(&symbols, "helper").unwrap();
    assert_eq!(helper.kind, SymbolKind::Function);

    let outer = find(&symbols, "Outer").unwrap();
    assert_eq!(names(&outer.children), vec!["method", "Inner"]);
    assert_eq!(outer.children[0].kind, SymbolKind::Method);

    let inner = find(&symbols, "Inner").unwrap();
    assert_eq!(inner.kind, SymbolKind::Class);
    assert_eq!(inner.children[0].kind, SymbolKind::Method);
}

#[test]
fn test_rule_nodes_only_walk_their_body() {
    let extractor = spec_with(NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["block"]));
    let symbols = extract(&extractor, CODE, "sample.py");

    // function_definition has no body path, so `nested` is never reached
    assert!(find(&symbols, "nested").is_none());
}

#[test]
fn test_unmapped_nodes_are_transparent() {
    let extractor = spec_with(NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["block"]));
    let symbols = extract(&extractor, CODE, "sample.py");

    assert_eq!(names(&symbols), vec!["helper", "Outer", "conditional"]);
    assert_eq!(find(&symbols, "conditional").unwrap().kind, SymbolKind::Function);
}

#[test]
fn test_member_kinds_kept_when_asked() {
    let extractor = spec_with(
        NodeRule::new(SymbolKind::Module, &["identifier"])
            .body(&["block"])
            .keep_member_kinds(),
    );
    let symbols = extract(&extractor, CODE, "sample.py");

    let outer = find(&symbols, "Outer").unwrap();
    assert_eq!(outer.kind, SymbolKind::Module);
    assert_eq!(outer.children[0].kind, SymbolKind::Function);
}

#[test]
fn test_unnamed_nodes_are_skipped() {
    let extractor = spec_with(
        NodeRule::new(SymbolKind::Class, &["no_such_child/identifier"]).body(&["block"]),
    );
    let symbols = extract(&extractor, CODE, "sample.py");

    assert_eq!(names(&symbols), vec!["helper", "conditional"]);
}

#[test]
fn test_first_matching_name_path_wins() {
    let extractor = spec_with(
        NodeRule::new(SymbolKind::Class, &["missing", "identifier", "block"]).body(&["block"]),
    );
    let symbols = extract(&extractor, CODE, "sample.py");

    assert!(find(&symbols, "Outer").is_some());
}

#[test]
fn test_preceding_comment_and_lines() {
    let spec = LanguageSpec::new("python", &[".py"], python).rule(
        "function_definition",
        NodeRule::new(SymbolKind::Function, &["identifier"]).signature(&["parameters"]),
    );
    let extractor = TreeSitterExtractor::new(spec);
    let symbols = extractor.extract(CODE, "sample.py").unwrap();

    let helper = &symbols[0];
    assert_eq!(helper.name, "helper");
    assert_eq!(helper.docstring.as_deref(), Some("Top-level helper."));
    assert_eq!(helper.signature.as_deref(), Some("(x)"));
    assert_eq!((helper.lines.start, helper.lines.end), (2, 3));
}

#[test]
fn test_comment_separated_by_blank_line_is_ignored() {
    let code = "# Unrelated note.\n\ndef lonely():\n    pass\n";
    let spec = LanguageSpec::new("python", &[".py"], python).rule(
        "function_definition",
        NodeRule::new(SymbolKind::Function, &["identifier"]),
    );
    let symbols = TreeSitterExtractor::new(spec).extract(code, "a.py").unwrap();

    assert_eq!(symbols.len(), 1);
    assert!(symbols[0].docstring.is_none());
}

#[test]
fn test_garbage_input_is_a_syntax_failure() {
    let extractor = spec_with(NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["block"]));
    let result = extractor.extract(")))) (((( ::: ", "broken.py");
    assert!(result.is_err());
}

#[test]
fn test_empty_source_yields_nothing() {
    let extractor = spec_with(NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["block"]));
    assert!(extractor.extract("", "empty.py").unwrap().is_empty());
}
