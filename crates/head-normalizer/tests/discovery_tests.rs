mod fixtures;

use std::collections::BTreeSet;

use head_normalizer::discovery::discover;
use head_normalizer::NormalizeError;

#[test]
fn finds_html_files_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_sample_site(dir.path());
    fixtures::write_page(dir.path(), "UPPER.HTML", "<p>x</p>");

    let found: BTreeSet<String> = discover(dir.path(), "html")
        .unwrap()
        .map(|p| {
            p.unwrap()
                .strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    let expected: BTreeSet<String> = [
        "UPPER.HTML",
        "about.html",
        "index.html",
        "locations/north_ridge.html",
        "services/tree-removal/index.html",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn walk_is_restartable() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::write_sample_site(dir.path());

    let first = discover(dir.path(), "html").unwrap().count();
    let second = discover(dir.path(), "html").unwrap().count();
    assert_eq!(first, 4);
    assert_eq!(first, second);
}

#[test]
fn directories_named_like_documents_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("weird.html")).unwrap();
    assert_eq!(discover(dir.path(), "html").unwrap().count(), 0);
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("dist");
    match discover(&missing, "html") {
        Err(NormalizeError::RootNotFound(path)) => assert_eq!(path, missing),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("expected RootNotFound"),
    }
}
