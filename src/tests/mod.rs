// CodeMap's Test Infrastructure
//
// Store, orchestrator, and watcher suites. Extractor tests live in the
// codemap-extractors crate.

pub mod helpers;



// ============================================================================
// WATCHER TESTS - Live file system events through the debouncer
// ============================================================================
pub mod watcher_tests;
