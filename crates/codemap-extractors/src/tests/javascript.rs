// JavaScript extraction: exports, arrow bindings, classes

use super::test_utils::{extract, find, names};
use crate::base::SymbolKind;
use crate::languages::javascript;

const CODE: &str = r#"/**
 * Formats a name.
 * @param {string} name
 */
export function formatName(name) {
  return name.trim();
}

export const greet = async (who) => `hi ${who}`;

const LIMIT = 10;

class Greeter {
  constructor(prefix) {
    this.prefix = prefix;
  }

  async greet(name) {
    return this.prefix + name;
  }
}
"#;

#[test]
fn test_exported_function_with_jsdoc() {
    let symbols = extract(&javascript::extractor(), CODE, "src/format.js");
    let format = find(&symbols, "formatName").unwrap();

    assert_eq!(format.kind, SymbolKind::Function);
    assert_eq!(format.signature.as_deref(), Some("(name)"));
    assert_eq!(format.docstring.as_deref(), Some("Formats a name."));
    assert_eq!((format.lines.start, format.lines.end), (5, 7));
}

#[test]
fn test_arrow_binding_is_a_function() {
    let symbols = extract(&javascript::extractor(), CODE, "src/format.js");
    let greet = &symbols[1];

    assert_eq!(greet.name, "greet");
    assert_eq!(greet.kind, SymbolKind::AsyncFunction);
    assert_eq!(greet.signature.as_deref(), Some("(who)"));
}

#[test]
fn test_plain_constants_are_not_symbols() {
    let symbols = extract(&javascript::extractor(), CODE, "src/format.js");
    assert_eq!(names(&symbols), vec!["formatName", "greet", "Greeter"]);
}

#[test]
fn test_class_methods() {
    let symbols = extract(&javascript::extractor(), CODE, "src/format.js");
    let class = find(&symbols, "Greeter").unwrap();

    assert_eq!(class.kind, SymbolKind::Class);
    assert_eq!(names(&class.children), vec!["constructor", "greet"]);
    assert_eq!(class.children[0].kind, SymbolKind::Method);
    assert_eq!(class.children[1].kind, SymbolKind::AsyncMethod);
}
