use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::canonical::relative_path;
use crate::config::NormalizerConfig;
use crate::descriptor::CanonicalDescriptor;
use crate::error::NormalizeError;
use crate::extraction::{HeadSelectors, HeadSnapshot};
use crate::rewrite;

/// Result of normalizing one document in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedDocument {
    pub descriptor: CanonicalDescriptor,
    pub html: String,
    /// Whether the output differs from the input.
    pub changed: bool,
    /// The output's head still has no `meta[name=description]`.
    pub missing_description: bool,
    /// Favicon links in the output that still point at a placeholder.
    pub stale_favicon_refs: usize,
}

/// Normalize one document's head. Pure: no filesystem access.
///
/// `relative_path` is the document's `/`-separated path under the output root.
pub fn normalize_html(
    relative_path: &str,
    raw: &str,
    config: &NormalizerConfig,
    selectors: &HeadSelectors,
) -> Result<NormalizedDocument, lol_html::errors::RewritingError> {
    let snapshot = HeadSnapshot::from_html(raw, selectors);
    let descriptor = CanonicalDescriptor::derive(relative_path, &snapshot, config);

    let og_image = if snapshot.og_image_count == 0 {
        config.og_image_url()
    } else {
        None
    };

    let with_head = rewrite::ensure_head(raw)?;
    let head_closed = rewrite::head_has_end_tag(&with_head);
    let skeleton = rewrite::insert_missing_tags(&with_head, &snapshot, config, head_closed)?;
    let filled = rewrite::apply_descriptor(&skeleton, &descriptor, og_image.as_deref())?;
    let html = rewrite::with_doctype(raw, filled);

    let after = HeadSnapshot::from_html(&html, selectors);
    let stale_favicon_refs = after
        .favicon_hrefs
        .iter()
        .filter(|href| config.is_placeholder_favicon(href))
        .count();

    Ok(NormalizedDocument {
        changed: html != raw,
        missing_description: after.description_count == 0,
        stale_favicon_refs,
        descriptor,
        html,
    })
}

/// Read, normalize and write back one file under `root`.
///
/// The file is replaced atomically and only after the whole document was
/// rewritten. Unchanged documents and dry runs skip the write.
pub fn process_file(
    root: &Path,
    path: &Path,
    config: &NormalizerConfig,
    selectors: &HeadSelectors,
) -> Result<NormalizedDocument, NormalizeError> {
    let relative = relative_path(root, path).unwrap_or_else(|| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let raw = fs::read_to_string(path).map_err(|source| NormalizeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document = normalize_html(&relative, &raw, config, selectors).map_err(|source| {
        NormalizeError::Rewrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if document.changed && !config.dry_run {
        write_atomically(path, &document.html)?;
    }

    tracing::debug!(
        path = %relative,
        canonical = %document.descriptor.canonical_url,
        changed = document.changed,
        "normalized document"
    );
    Ok(document)
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), NormalizeError> {
    let write_err = |source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let permissions = fs::metadata(path).map_err(write_err)?.permissions();
    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
