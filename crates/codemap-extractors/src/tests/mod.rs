//! Tests for codemap-extractors
//!
//! Extractor tests parse real snippets with the bundled grammars.

pub mod css;
pub mod engine;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;
pub mod registry;
pub mod sql;
pub mod swift;
