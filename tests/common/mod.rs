#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use jobgraph_test_utils::init_tracing;

/// Write `contents` to a temp file whose name ends in `suffix`
/// (the loader picks the format from the extension).
pub fn document_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

pub fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
