use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::NormalizeError;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 60;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 155;
/// Existing descriptions shorter than this are replaced by a fallback.
pub const MIN_DESCRIPTION_CHARS: usize = 80;

/// Options for one normalization run.
///
/// Every field has a default so a partial TOML file (or none at all) is
/// enough. Call [`NormalizerConfig::resolve`] before handing the value to the
/// pipeline.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Directory holding the pre-rendered HTML files.
    pub root_directory: PathBuf,
    /// Absolute site URL, e.g. `https://summittreecare.com`.
    pub site_base_url: String,
    /// File extension of documents to process, without the dot.
    pub html_extension: String,
    /// Appended to titles derived from file names.
    pub site_name: String,
    /// Appended to descriptions derived from the page heading.
    pub description_suffix: String,
    /// Inserted when a document has no usable favicon link.
    pub favicon_href: String,
    /// Default social image, absolute or relative to the site root.
    pub og_image: Option<String>,
    /// Favicon hrefs containing any of these are leftover toolchain assets.
    pub placeholder_favicons: Vec<String>,
    /// Worker threads; 1 processes files sequentially.
    pub jobs: usize,
    /// Compute and report without touching any file.
    pub dry_run: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("dist"),
            site_base_url: "https://summittreecare.com".to_string(),
            html_extension: "html".to_string(),
            site_name: "Summit Tree Care".to_string(),
            description_suffix: "Licensed, insured arborists for tree removal, trimming, \
                                 stump grinding and 24/7 storm cleanup."
                .to_string(),
            favicon_href: "/favicon.ico".to_string(),
            og_image: Some("/og-image.jpg".to_string()),
            placeholder_favicons: vec!["vite.svg".to_string()],
            jobs: 1,
            dry_run: false,
        }
    }
}

impl NormalizerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, NormalizeError> {
        toml::from_str(text).map_err(|e| NormalizeError::Config(e.to_string()))
    }

    /// Load a TOML file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, NormalizeError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(NormalizeError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Validate and canonicalize the values the pipeline relies on.
    ///
    /// Strips trailing slashes from the base URL and a leading dot from the
    /// extension so that derivation never has to.
    pub fn resolve(mut self) -> Result<Self, NormalizeError> {
        let base = self.site_base_url.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("https://") || base.starts_with("http://"))
            || base.ends_with("://")
        {
            return Err(NormalizeError::Config(format!(
                "site_base_url must be an absolute http(s) URL, got `{}`",
                self.site_base_url
            )));
        }
        self.site_base_url = base;

        let ext = self.html_extension.trim().trim_start_matches('.').to_string();
        if ext.is_empty() {
            return Err(NormalizeError::Config("html_extension is empty".to_string()));
        }
        self.html_extension = ext;

        if self.jobs == 0 {
            return Err(NormalizeError::Config("jobs must be at least 1".to_string()));
        }

        self.placeholder_favicons.retain(|p| !p.trim().is_empty());
        self.og_image = self.og_image.filter(|s| !s.trim().is_empty());
        Ok(self)
    }

    /// Absolute URL of the default social image, if one is configured.
    pub fn og_image_url(&self) -> Option<String> {
        let image = self.og_image.as_deref()?.trim();
        if image.starts_with("https://") || image.starts_with("http://") {
            Some(image.to_string())
        } else {
            Some(format!("{}/{}", self.site_base_url, image.trim_start_matches('/')))
        }
    }

    /// True when `href` points at a leftover placeholder favicon.
    pub fn is_placeholder_favicon(&self, href: &str) -> bool {
        self.placeholder_favicons
            .iter()
            .any(|marker| href.contains(marker.as_str()))
    }
}
