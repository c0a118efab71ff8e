//! Integration tests for `SharedCatalog` snapshot and swap semantics.

use content_mcp::catalog::{Catalog, SharedCatalog};
use content_mcp::config::{ContentSource, ServerConfig};

use super::test_helpers::{sample_document, write_document};

#[test]
fn reload_swaps_in_new_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_document(dir.path(), &sample_document("first"));
    let source = ContentSource::Explicit(path);
    let config = ServerConfig::default();

    let shared = SharedCatalog::new(Catalog::load(&source, &config).expect("loads"));
    let before = shared.snapshot();

    write_document(dir.path(), &sample_document("second"));
    shared.reload(&source, &config).expect("reload succeeds");

    assert_eq!(shared.snapshot().store().tips(None), ["second"]);
    assert_eq!(before.store().tips(None), ["first"], "old snapshot unchanged");
}

#[test]
fn failed_reload_keeps_previous_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_document(dir.path(), &sample_document("stable"));
    let source = ContentSource::Explicit(path.clone());
    let config = ServerConfig::default();

    let shared = SharedCatalog::new(Catalog::load(&source, &config).expect("loads"));
    std::fs::write(&path, "{ broken").expect("write broken");

    let err = shared.reload(&source, &config).expect_err("broken JSON");
    assert!(err.to_string().starts_with("parse:"));
    assert_eq!(shared.snapshot().store().tips(None), ["stable"]);
    assert_eq!(
        shared.snapshot().prompts().names(),
        ["learning_learning_plan_prompt"]
    );
}

#[test]
fn clones_share_the_same_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_document(dir.path(), &sample_document("one"));
    let source = ContentSource::Explicit(path);
    let config = ServerConfig::default();

    let shared = SharedCatalog::new(Catalog::load(&source, &config).expect("loads"));
    let clone = shared.clone();

    write_document(dir.path(), &sample_document("two"));
    clone.reload(&source, &config).expect("reload");

    assert_eq!(shared.snapshot().store().tips(None), ["two"]);
}
