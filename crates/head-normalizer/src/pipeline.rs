use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::NormalizerConfig;
use crate::discovery::discover;
use crate::document::process_file;
use crate::error::NormalizeError;
use crate::extraction::HeadSelectors;
use crate::report::{ReportAccumulator, RunReport};

/// Normalize every document under `config.root_directory`.
///
/// A missing root is logged and yields an empty report. Per-file failures are
/// logged, counted in [`RunReport::failed`] and never stop the run. Only
/// setup defects (bad config, selectors, worker pool) return `Err`.
pub fn run(config: &NormalizerConfig) -> Result<RunReport, NormalizeError> {
    let config = config.clone().resolve()?;
    let selectors = HeadSelectors::new()?;

    let root = config
        .root_directory
        .canonicalize()
        .unwrap_or_else(|_| config.root_directory.clone());

    let files = match discover(&root, &config.html_extension) {
        Ok(files) => files,
        Err(NormalizeError::RootNotFound(path)) => {
            tracing::warn!(
                root = %path.display(),
                "output directory does not exist, nothing to normalize"
            );
            return Ok(RunReport::default());
        }
        Err(e) => return Err(e),
    };

    let accumulator = ReportAccumulator::default();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in files {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                tracing::error!("{e}");
                accumulator.record_failure();
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        files = paths.len(),
        jobs = config.jobs,
        "normalizing documents"
    );

    let handle = |path: &PathBuf| handle_file(&root, path, &config, &selectors, &accumulator);
    if config.jobs <= 1 {
        paths.iter().for_each(handle);
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()?;
        pool.install(|| paths.par_iter().for_each(handle));
    }

    let report = accumulator.finish();
    if report.missing_description > 0 {
        tracing::warn!(
            count = report.missing_description,
            "documents still missing a meta description"
        );
    }
    if report.stale_favicon_refs > 0 {
        tracing::warn!(
            count = report.stale_favicon_refs,
            "placeholder favicon references remain"
        );
    }
    tracing::info!("{report}");
    Ok(report)
}

fn handle_file(
    root: &Path,
    path: &Path,
    config: &NormalizerConfig,
    selectors: &HeadSelectors,
    accumulator: &ReportAccumulator,
) {
    match process_file(root, path, config, selectors) {
        Ok(document) => accumulator.record(&document),
        Err(e) => {
            tracing::error!(path = %path.display(), "{e}");
            accumulator.record_failure();
        }
    }
}
