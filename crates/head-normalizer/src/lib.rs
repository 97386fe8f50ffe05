//! Build-time `<head>` normalization for pre-rendered HTML sites.
//!
//! Walks a directory of generated HTML files and rewrites each document's
//! head so that title, meta description, canonical link, Open Graph tags and
//! favicon are present exactly once and derived deterministically from the
//! file's path and existing content. Everything outside the managed elements
//! is passed through untouched, and a second run over the output is a no-op.

pub mod canonical;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extraction;
pub mod normalization;
pub mod pipeline;
pub mod report;
pub mod rewrite;

pub use config::NormalizerConfig;
pub use error::NormalizeError;
pub use pipeline::run;
pub use report::RunReport;
