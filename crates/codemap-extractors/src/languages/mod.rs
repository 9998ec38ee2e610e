//! Language registry
//!
//! Tree-sitter languages are rule tables over the generic engine; Markdown
//! and YAML are line oriented. CSS and HTML lean on override handlers.

pub mod c;
pub mod cpp;
pub mod csharp;
pub mod css;
pub mod go;
pub mod html;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod markdown;
pub mod php;
pub mod python;
pub mod rust;
pub mod sql;
pub mod swift;
pub mod typescript;
pub mod yaml;

use crate::engine::SymbolExtractor;

/// Every extractor this crate ships
pub fn all_extractors() -> Vec<Box<dyn SymbolExtractor>> {
    vec![
        Box::new(python::extractor()),
        Box::new(javascript::extractor()),
        Box::new(typescript::extractor()),
        Box::new(rust::extractor()),
        Box::new(go::extractor()),
        Box::new(java::extractor()),
        Box::new(kotlin::extractor()),
        Box::new(swift::extractor()),
        Box::new(c::extractor()),
        Box::new(cpp::extractor()),
        Box::new(csharp::extractor()),
        Box::new(php::extractor()),
        Box::new(css::extractor()),
        Box::new(html::extractor()),
        Box::new(sql::extractor()),
        Box::new(markdown::MarkdownExtractor::new()),
        Box::new(yaml::YamlExtractor::new()),
    ]
}
