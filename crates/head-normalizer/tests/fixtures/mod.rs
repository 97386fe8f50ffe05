#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use head_normalizer::NormalizerConfig;

pub const BASE_URL: &str = "https://example.com";
pub const SITE_NAME: &str = "Summit Tree Care";
pub const SUFFIX: &str = "Expert tree care from certified local arborists.";

/// Resolved config pointing at `root` with stable test values.
pub fn config_for(root: &Path) -> NormalizerConfig {
    NormalizerConfig {
        root_directory: root.to_path_buf(),
        site_base_url: BASE_URL.to_string(),
        site_name: SITE_NAME.to_string(),
        description_suffix: SUFFIX.to_string(),
        ..NormalizerConfig::default()
    }
    .resolve()
    .unwrap()
}

/// Config for in-memory tests that never touch the filesystem.
pub fn test_config() -> NormalizerConfig {
    config_for(Path::new("dist"))
}

/// Write `html` at `relative` under `root`, creating parent directories.
pub fn write_page(root: &Path, relative: &str, html: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, html).unwrap();
    path
}

pub fn read_page(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// A pre-rendered page with the given head and body markup.
pub fn page(head: &str, body: &str) -> String {
    format!("<!DOCTYPE html>\n<html lang=\"en\"><head>{head}</head><body>{body}</body></html>")
}

/// A description of exactly `len` characters.
pub fn description_of_len(len: usize) -> String {
    let base = "Storm damage cleanup and hazardous limb removal for homes and businesses. ";
    base.chars().cycle().take(len).collect()
}

/// A small site exercising the interesting cases.
pub fn write_sample_site(root: &Path) {
    write_page(
        root,
        "index.html",
        &page("<title>Summit Tree Care</title>", "<h1>Welcome</h1>"),
    );
    write_page(
        root,
        "services/tree-removal/index.html",
        &page(
            r#"<meta name="description" content="short"><meta name="description" content="dup">"#,
            "<h1>Tree Removal</h1><p>Safe takedowns &amp; cleanup.</p>",
        ),
    );
    write_page(
        root,
        "about.html",
        &page(
            r#"<link rel="icon" href="/vite.svg"><link rel="icon" href="/favicon.ico">"#,
            "<h1>About Us</h1>",
        ),
    );
    write_page(
        root,
        "locations/north_ridge.html",
        "<html><body><h1>North Ridge</h1></body></html>",
    );
    write_page(root, "assets/site.css", "body { color: green; }");
}
