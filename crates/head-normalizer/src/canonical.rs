use std::path::{Component, Path};

/// Relative path of `path` under `root`, with `/` separators regardless of host.
///
/// Returns `None` when `path` is not inside `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Page slug for a relative document path.
///
/// Strips the `.{extension}` suffix, collapses a trailing `index` segment and
/// any leading slash. The root index document has the empty slug.
pub fn page_slug(relative_path: &str, extension: &str) -> String {
    let path = relative_path.replace('\\', "/");
    if path == format!("index.{extension}") {
        return String::new();
    }

    let suffix = format!(".{extension}");
    let stem = strip_suffix_ignore_ascii_case(&path, &suffix).unwrap_or(&path);

    let collapsed = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };

    collapsed.trim_start_matches('/').to_string()
}

/// Canonical URL for a document: `base/` for the site root, `base/slug` otherwise.
///
/// `base_url` is expected without a trailing slash (see
/// [`crate::config::NormalizerConfig::resolve`]). Depends on nothing but its
/// arguments.
pub fn canonical_url(base_url: &str, relative_path: &str, extension: &str) -> String {
    let slug = page_slug(relative_path, extension);
    if slug.is_empty() {
        format!("{base_url}/")
    } else {
        format!("{base_url}/{slug}")
    }
}

fn strip_suffix_ignore_ascii_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(cut) {
        return None;
    }
    let (head, tail) = s.split_at(cut);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
