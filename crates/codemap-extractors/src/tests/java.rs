// Java extraction: classes, constructors and Javadoc

use super::test_utils::{extract, names};
use crate::base::SymbolKind;
use crate::languages::java;

const CODE: &str = r#"package app;

/**
 * Repository of users.
 */
public class UserRepository {
    public UserRepository() {}

    /** Finds a user. */
    public User findById(long id) {
        return null;
    }
}
"#;

#[test]
fn test_class_with_members() {
    let symbols = extract(&java::extractor(), CODE, "src/app/UserRepository.java");
    assert_eq!(names(&symbols), vec!["UserRepository"]);

    let class = &symbols[0];
    assert_eq!(class.kind, SymbolKind::Class);
    assert_eq!(class.docstring.as_deref(), Some("Repository of users."));
    assert_eq!(names(&class.children), vec!["UserRepository", "findById"]);
    assert!(class.children.iter().all(|c| c.kind == SymbolKind::Method));
}

#[test]
fn test_method_signature_and_doc() {
    let symbols = extract(&java::extractor(), CODE, "src/app/UserRepository.java");
    let find_by_id = &symbols[0].children[1];

    assert_eq!(find_by_id.signature.as_deref(), Some("(long id)"));
    assert_eq!(find_by_id.docstring.as_deref(), Some("Finds a user."));
    assert_eq!((find_by_id.lines.start, find_by_id.lines.end), (10, 12));
}
