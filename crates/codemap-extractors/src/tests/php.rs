// PHP extraction: statement-form namespaces, interfaces, classes

use super::test_utils::{extract, names};
use crate::base::SymbolKind;
use crate::languages::php;

const CODE: &str = r#"<?php

namespace App;

interface Repo {
    public function find(int $id): ?User;
}

/**
 * Stores users.
 */
class UserRepo implements Repo {
    public function find(int $id): ?User {
        return null;
    }
}

function helper($x) {
    return $x;
}
"#;

#[test]
fn test_top_level_declarations() {
    let symbols = extract(&php::extractor(), CODE, "src/UserRepo.php");
    assert_eq!(names(&symbols), vec!["App", "Repo", "UserRepo", "helper"]);

    let kinds: Vec<_> = symbols.iter().map(|s| s.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Namespace,
            SymbolKind::Interface,
            SymbolKind::Class,
            SymbolKind::Function
        ]
    );
    assert_eq!(symbols[3].signature.as_deref(), Some("($x)"));
}

#[test]
fn test_class_doc_and_methods() {
    let symbols = extract(&php::extractor(), CODE, "src/UserRepo.php");
    let repo = &symbols[2];

    assert_eq!(repo.docstring.as_deref(), Some("Stores users."));
    assert_eq!(names(&repo.children), vec!["find"]);
    assert_eq!(repo.children[0].kind, SymbolKind::Method);
    assert_eq!(names(&symbols[1].children), vec!["find"]);
}
