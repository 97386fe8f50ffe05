//! Streaming `<head>` rewriting on top of `lol_html`.
//!
//! The rewriter only touches the elements it is told to; every other byte of
//! the document passes through as-is. Work is split into passes because
//! content inserted during a pass is not visible to that pass's own
//! selectors:
//!
//! 1. [`ensure_head`] gives documents without a `<head>` an empty one.
//! 2. [`insert_missing_tags`] removes placeholder favicons and adds a bare
//!    element for every managed tag kind the document lacks.
//! 3. [`apply_descriptor`] collapses duplicates and writes every value.
//!
//! All values are written in pass 3 by the rewriter itself, so a value always
//! serializes the same way whether its element was inserted or pre-existing.
//!
//! Managed tags are only ever looked for as direct children of `<head>`, so
//! an inline SVG `<title>` or stray markup in the body is never touched.

use std::cell::Cell;

use lol_html::errors::RewritingError;
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};

use crate::config::NormalizerConfig;
use crate::descriptor::CanonicalDescriptor;
use crate::extraction::HeadSnapshot;

const HTML5_DOCTYPE: &str = "<!DOCTYPE html>\n";

pub(crate) const TITLE: &str = "head > title";
pub(crate) const DESCRIPTION: &str = r#"head > meta[name="description"]"#;
pub(crate) const CANONICAL: &str = r#"head > link[rel="canonical"]"#;
pub(crate) const OG_TITLE: &str = r#"head > meta[property="og:title"]"#;
pub(crate) const OG_DESCRIPTION: &str = r#"head > meta[property="og:description"]"#;
pub(crate) const OG_URL: &str = r#"head > meta[property="og:url"]"#;
pub(crate) const OG_IMAGE: &str = r#"head > meta[property="og:image"]"#;
pub(crate) const FAVICON: &str = r#"head > link[rel~="icon"]"#;
/// Placeholder icons are dropped wherever they appear.
pub(crate) const ANY_FAVICON: &str = r#"link[rel~="icon"]"#;

/// Byte length of a leading doctype declaration, BOM and leading whitespace included.
///
/// This is a literal prefix check on raw text, not a parsed-tree property.
pub fn doctype_prefix_len(raw: &str) -> Option<usize> {
    let without_bom = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
    let body = without_bom.trim_start();
    let offset = raw.len() - body.len();
    let opener = body.get(..9)?;
    if !opener.eq_ignore_ascii_case("<!doctype") {
        return None;
    }
    let close = body.find('>')?;
    Some(offset + close + 1)
}

/// Prepend an HTML5 doctype to `output` unless `original` already started with one.
pub fn with_doctype(original: &str, output: String) -> String {
    if doctype_prefix_len(original).is_some() {
        output
    } else {
        format!("{HTML5_DOCTYPE}{output}")
    }
}

/// Give a document without a `<head>` element an empty one.
///
/// The head becomes the first child of `<html>`, or is placed right after
/// the doctype when the document has no `<html>` tag either.
pub fn ensure_head(html: &str) -> Result<String, RewritingError> {
    let heads = Cell::new(0usize);
    let roots = Cell::new(0usize);
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("head", |_el| {
                    heads.set(heads.get() + 1);
                    Ok(())
                }),
                element!("html", |_el| {
                    roots.set(roots.get() + 1);
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    if heads.get() > 0 {
        return Ok(html.to_string());
    }

    if roots.get() > 0 {
        let inserted = Cell::new(false);
        let output = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("html", |el| {
                    if !inserted.replace(true) {
                        el.prepend("<head></head>", ContentType::Html);
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )?;
        return Ok(output);
    }

    let at = doctype_prefix_len(html).unwrap_or(0);
    Ok(format!("{}<head></head>{}", &html[..at], &html[at..]))
}

/// True when the first `<head>` start tag is followed by a literal `</head>`.
///
/// Content appended to a head without an end tag would land wherever the
/// rewriter finally closes it, which is after the body.
pub fn head_has_end_tag(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    match find_start_tag(&lower, "<head") {
        Some(start) => lower[start..].contains("</head"),
        None => false,
    }
}

fn find_start_tag(lower: &str, open: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = lower[from..].find(open) {
        let at = from + rel;
        let next = *lower.as_bytes().get(at + open.len())?;
        if next == b'>' || next == b'/' || next.is_ascii_whitespace() {
            return Some(at);
        }
        from = at + open.len();
    }
    None
}

/// Pass 2: drop placeholder favicons and append bare elements for missing tag kinds.
///
/// `snapshot` must describe the same document. The default favicon goes in
/// as the first child of `<head>`. Everything else is appended at the end of
/// the head, or placed right after the favicon when `head_closed` is false
/// and there is no end tag to append before.
pub fn insert_missing_tags(
    html: &str,
    snapshot: &HeadSnapshot,
    config: &NormalizerConfig,
    head_closed: bool,
) -> Result<String, RewritingError> {
    let mut missing = String::new();
    if snapshot.title_count == 0 {
        missing.push_str("<title></title>");
    }
    if snapshot.description_count == 0 {
        missing.push_str(r#"<meta name="description">"#);
    }
    if snapshot.canonical_count == 0 {
        missing.push_str(r#"<link rel="canonical">"#);
    }
    if snapshot.og_title_count == 0 {
        missing.push_str(r#"<meta property="og:title">"#);
    }
    if snapshot.og_description_count == 0 {
        missing.push_str(r#"<meta property="og:description">"#);
    }
    if snapshot.og_url_count == 0 {
        missing.push_str(r#"<meta property="og:url">"#);
    }
    if snapshot.og_image_count == 0 && config.og_image_url().is_some() {
        missing.push_str(r#"<meta property="og:image">"#);
    }

    let mut leading = String::new();
    if !snapshot.has_usable_favicon(|href| config.is_placeholder_favicon(href)) {
        leading.push_str(&format!(
            r#"<link rel="icon" type="image/x-icon" href="{}">"#,
            escape_attribute(&config.favicon_href)
        ));
    }
    if !head_closed {
        leading.push_str(&missing);
        missing.clear();
    }

    let head_done = Cell::new(false);
    let output = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("head", |el| {
                    if head_done.replace(true) {
                        return Ok(());
                    }
                    if !leading.is_empty() {
                        el.prepend(&leading, ContentType::Html);
                    }
                    if !missing.is_empty() {
                        el.append(&missing, ContentType::Html);
                    }
                    Ok(())
                }),
                element!(ANY_FAVICON, |el| {
                    let href = el.get_attribute("href").unwrap_or_default();
                    if config.is_placeholder_favicon(&href) {
                        el.remove();
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(output)
}

/// Pass 3: keep the first element of each managed kind, remove the rest, write values.
///
/// `og_image` is written only when the document had no `og:image` of its own
/// before pass 2; an existing social image is never overwritten. Of the
/// favicon links, the first is kept untouched.
pub fn apply_descriptor(
    html: &str,
    descriptor: &CanonicalDescriptor,
    og_image: Option<&str>,
) -> Result<String, RewritingError> {
    let title_seen = Cell::new(false);
    let description_seen = Cell::new(false);
    let canonical_seen = Cell::new(false);
    let og_title_seen = Cell::new(false);
    let og_description_seen = Cell::new(false);
    let og_url_seen = Cell::new(false);
    let og_image_seen = Cell::new(false);
    let favicon_seen = Cell::new(false);

    let output = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(TITLE, |el| {
                    if title_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_inner_content(&descriptor.title, ContentType::Text);
                    }
                    Ok(())
                }),
                element!(DESCRIPTION, |el| {
                    if description_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_attribute("content", &descriptor.description)?;
                    }
                    Ok(())
                }),
                element!(CANONICAL, |el| {
                    if canonical_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_attribute("href", &descriptor.canonical_url)?;
                    }
                    Ok(())
                }),
                element!(OG_TITLE, |el| {
                    if og_title_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_attribute("content", &descriptor.title)?;
                    }
                    Ok(())
                }),
                element!(OG_DESCRIPTION, |el| {
                    if og_description_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_attribute("content", &descriptor.description)?;
                    }
                    Ok(())
                }),
                element!(OG_URL, |el| {
                    if og_url_seen.replace(true) {
                        el.remove();
                    } else {
                        el.set_attribute("content", &descriptor.canonical_url)?;
                    }
                    Ok(())
                }),
                element!(OG_IMAGE, |el| {
                    if og_image_seen.replace(true) {
                        el.remove();
                    } else if let Some(url) = og_image {
                        el.set_attribute("content", url)?;
                    }
                    Ok(())
                }),
                element!(FAVICON, |el| {
                    if favicon_seen.replace(true) {
                        el.remove();
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(output)
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
