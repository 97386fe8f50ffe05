use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while normalizing a site.
///
/// `RootNotFound` and the per-file variants are recoverable: the pipeline
/// logs them and keeps going. The remaining variants indicate a setup or
/// programming defect and abort the run.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("output directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rewrite {}: {source}", .path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: lol_html::errors::RewritingError,
    },

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
