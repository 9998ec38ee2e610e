// SQL extraction: DDL statements and table columns

use super::test_utils::{extract, find, names};
use crate::base::SymbolKind;
use crate::languages::sql;

const SCHEMA: &str = r#"CREATE SCHEMA analytics;

-- Registered accounts
CREATE TABLE users (
    id INT PRIMARY KEY,
    email VARCHAR(255) NOT NULL
);

CREATE INDEX idx_users_email ON users(email);

CREATE VIEW active_users AS
SELECT * FROM users WHERE active = true;

CREATE SEQUENCE user_id_seq START WITH 1 INCREMENT BY 1;

CREATE TYPE status_enum AS ENUM ('active', 'inactive');
"#;

#[test]
fn test_sql_symbols() {
    let symbols = extract(&sql::extractor(), SCHEMA, "db/schema.sql");
    assert_eq!(
        names(&symbols),
        vec![
            "analytics",
            "users",
            "idx_users_email",
            "active_users",
            "user_id_seq",
            "status_enum",
        ]
    );

    let kinds: Vec<&str> = symbols.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["schema", "table", "index", "view", "sequence", "type"]
    );
    assert_eq!(symbols[5].kind, SymbolKind::Type);
}

#[test]
fn test_table_columns_and_comment() {
    let symbols = extract(&sql::extractor(), SCHEMA, "db/schema.sql");
    let users = find(&symbols, "users").unwrap();

    assert_eq!(users.docstring.as_deref(), Some("Registered accounts"));
    assert_eq!((users.lines.start, users.lines.end), (4, 7));
    assert_eq!(names(&users.children), vec!["id", "email"]);
    assert!(
        users
            .children
            .iter()
            .all(|c| c.kind == SymbolKind::Other("column".to_string()))
    );
}

#[test]
fn test_function_signature_includes_return_type() {
    let code = r#"CREATE FUNCTION add_numbers(a INT, b INT) RETURNS INT AS $$
BEGIN
    RETURN a + b;
END;
$$ LANGUAGE plpgsql;
"#;
    let symbols = extract(&sql::extractor(), code, "db/functions.sql");
    assert_eq!(names(&symbols), vec!["add_numbers"]);
    assert_eq!(symbols[0].kind, SymbolKind::Function);

    let signature = symbols[0].signature.as_deref().unwrap();
    assert!(signature.starts_with("(a INT, b INT)"), "{}", signature);
    assert!(signature.ends_with("-> INT"), "{}", signature);
}

#[test]
fn test_trigger_and_database() {
    let code = r#"CREATE DATABASE test_db;

CREATE TRIGGER update_timestamp
BEFORE UPDATE ON users
FOR EACH ROW EXECUTE FUNCTION update_ts();
"#;
    let symbols = extract(&sql::extractor(), code, "db/setup.sql");
    assert_eq!(names(&symbols), vec!["test_db", "update_timestamp"]);
    assert_eq!(symbols[0].kind.as_str(), "database");
    assert_eq!(symbols[1].kind.as_str(), "trigger");
}

#[test]
fn test_queries_are_not_symbols() {
    let code = "SELECT id, email FROM users WHERE id = 1;\n";
    assert!(extract(&sql::extractor(), code, "db/query.sql").is_empty());
}
