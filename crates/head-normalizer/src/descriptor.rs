use crate::canonical::{canonical_url, page_slug};
use crate::config::{
    NormalizerConfig, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, MIN_DESCRIPTION_CHARS,
};
use crate::extraction::HeadSnapshot;
use crate::normalization::{title_case_segment, truncate_chars};

/// The metadata one document should end up with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalDescriptor {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub canonical_url: String,
    pub title: String,
    pub description: String,
}

impl CanonicalDescriptor {
    pub fn derive(relative_path: &str, snapshot: &HeadSnapshot, config: &NormalizerConfig) -> Self {
        let slug = page_slug(relative_path, &config.html_extension);
        Self {
            path: relative_path.to_string(),
            canonical_url: canonical_url(
                &config.site_base_url,
                relative_path,
                &config.html_extension,
            ),
            title: resolve_title(snapshot.title.as_deref(), &slug, &config.site_name),
            description: resolve_description(
                snapshot.description.as_deref(),
                snapshot.heading.as_deref(),
                &config.description_suffix,
            ),
        }
    }
}

/// Existing title if non-blank, else one derived from the slug's last segment.
pub fn resolve_title(existing: Option<&str>, slug: &str, site_name: &str) -> String {
    let title = match existing.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_string(),
        None => derived_title(slug, site_name),
    };
    truncate_chars(&title, MAX_TITLE_CHARS)
}

/// Title built from the page slug: `services/tree-removal` -> `Tree Removal | {site}`.
pub fn derived_title(slug: &str, site_name: &str) -> String {
    let segment = slug.rsplit('/').next().unwrap_or_default();
    let mut page = title_case_segment(segment);
    if page.is_empty() {
        page = "Home".to_string();
    }
    if site_name.trim().is_empty() {
        page
    } else {
        format!("{page} | {}", site_name.trim())
    }
}

/// Existing description when long enough, else `{heading} - {suffix}` or the suffix alone.
pub fn resolve_description(existing: Option<&str>, heading: Option<&str>, suffix: &str) -> String {
    let description = match existing {
        Some(d) if d.chars().count() >= MIN_DESCRIPTION_CHARS => d.to_string(),
        _ => fallback_description(heading, suffix),
    };
    truncate_chars(&description, MAX_DESCRIPTION_CHARS)
}

fn fallback_description(heading: Option<&str>, suffix: &str) -> String {
    let suffix = suffix.trim();
    match heading.map(str::trim).filter(|h| !h.is_empty()) {
        Some(h) if suffix.is_empty() => h.to_string(),
        Some(h) => format!("{h} - {suffix}"),
        None => suffix.to_string(),
    }
}
