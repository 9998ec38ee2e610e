// Python extraction: docstrings, decorators, async and methods

use super::test_utils::{extract, find, names};
use crate::base::SymbolKind;
use crate::languages::python;

const CODE: &str = r#"import os

def top_level(a: int, b: int = 2) -> int:
    """Adds numbers.

    More detail here.
    """
    return a + b

class UserService:
    """Manages users."""

    def get_user(self, user_id):
        return None

    async def fetch(self):
        pass

    @staticmethod
    def helper():
        pass
"#;

#[test]
fn test_top_level_function() {
    let symbols = extract(&python::extractor(), CODE, "app/service.py");
    let function = find(&symbols, "top_level").unwrap();

    assert_eq!(function.kind, SymbolKind::Function);
    assert_eq!((function.lines.start, function.lines.end), (3, 8));
    assert_eq!(
        function.signature.as_deref(),
        Some("(a: int, b: int = 2) -> int")
    );
    assert_eq!(function.docstring.as_deref(), Some("Adds numbers."));
    assert!(function.children.is_empty());
}

#[test]
fn test_class_methods_are_retagged() {
    let symbols = extract(&python::extractor(), CODE, "app/service.py");
    assert_eq!(names(&symbols), vec!["top_level", "UserService"]);

    let class = &symbols[1];
    assert_eq!(class.kind, SymbolKind::Class);
    assert_eq!(class.docstring.as_deref(), Some("Manages users."));
    assert_eq!(names(&class.children), vec!["get_user", "fetch", "helper"]);
    assert_eq!(class.children[0].kind, SymbolKind::Method);
    assert_eq!(class.children[0].signature.as_deref(), Some("(self, user_id)"));
    assert_eq!(class.children[1].kind, SymbolKind::AsyncMethod);
}

#[test]
fn test_decorator_widens_start_line() {
    let symbols = extract(&python::extractor(), CODE, "app/service.py");
    let helper = find(&symbols, "helper").unwrap();

    assert_eq!(helper.kind, SymbolKind::Method);
    assert_eq!((helper.lines.start, helper.lines.end), (19, 21));
}

#[test]
fn test_async_top_level_function() {
    let code = "async def main():\n    await run()\n";
    let symbols = extract(&python::extractor(), code, "main.py");

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].kind, SymbolKind::AsyncFunction);
}

#[test]
fn test_nested_functions_not_indexed() {
    let code = "def outer():\n    def inner():\n        pass\n    return inner\n";
    let symbols = extract(&python::extractor(), code, "nested.py");

    assert_eq!(names(&symbols), vec!["outer"]);
    assert!(symbols[0].children.is_empty());
}
