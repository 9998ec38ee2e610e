// Swift extraction: one declaration node, kind from the keyword

use super::test_utils::{extract, find, names};
use crate::base::SymbolKind;
use crate::languages::swift;

const CODE: &str = r#"import Foundation

/// A user record.
struct User {
    let id: Int

    func describe() -> String {
        return "user"
    }
}

enum Role {
    case admin
}

protocol Store {
    func load(id: Int) -> User?
}

class Cache {
    func clear() {}
}

func helper() {}
"#;

#[test]
fn test_keyword_decides_kind() {
    let symbols = extract(&swift::extractor(), CODE, "Sources/App/User.swift");
    assert_eq!(names(&symbols), vec!["User", "Role", "Store", "Cache", "helper"]);

    let kinds: Vec<_> = symbols.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Struct,
            SymbolKind::Enum,
            SymbolKind::Interface,
            SymbolKind::Class,
            SymbolKind::Function
        ]
    );
}

#[test]
fn test_members_and_doc() {
    let symbols = extract(&swift::extractor(), CODE, "Sources/App/User.swift");

    let user = &symbols[0];
    assert_eq!(user.docstring.as_deref(), Some("A user record."));
    assert_eq!(names(&user.children), vec!["describe"]);
    assert_eq!(user.children[0].kind, SymbolKind::Method);

    let clear = find(&symbols, "clear").unwrap();
    assert_eq!(clear.kind, SymbolKind::Method);
    assert_eq!((clear.lines.start, clear.lines.end), (21, 21));
}
