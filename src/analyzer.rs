//! Analysis orchestration
//!
//! Runs one request end-to-end: validate, acquire the source tree, collect
//! files, extract per-file structure, derive the dependency graph, compose
//! the summary. Each run builds its own state from scratch; there is no
//! incremental update and no shared mutable state between runs.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::acquire::{self, SourceSpec};
use crate::collect;
use crate::config;
use crate::deps;
use crate::error::{AnalyzerError, Result};
use crate::extract;
use crate::schema::{AnalysisRequest, AnalysisResult, StructureIndex};
use crate::summary;

/// Analyze a codebase per the given request
///
/// Fatal errors are `InvalidRequest` (contract violation, surfaced before
/// any I/O) and `Acquisition` (clone failure). Per-file problems never fail
/// the run; the affected file is omitted from the structural output.
///
/// For remote sources the clone directory is scoped to this call and removed
/// on every exit path.
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisResult> {
    let source = validate(request)?;

    // Empty pattern lists fall back to the defaults
    let include = if request.include.is_empty() {
        config::default_include_patterns()
    } else {
        request.include.clone()
    };
    let exclude = if request.exclude.is_empty() {
        config::default_exclude_patterns()
    } else {
        request.exclude.clone()
    };

    let acquired = acquire::acquire(&source, config::github_token().as_deref())?;
    let root = acquired.root();

    let files = collect::collect(root, &include, &exclude, request.max_file_size);
    debug!(count = files.len(), "collected files");

    // Per-file extraction fans out across the pool; aggregation into sorted
    // maps restores the pinned deterministic order
    let structures: Vec<_> = files
        .par_iter()
        .filter_map(extract::extract)
        .collect();

    let mut structure = StructureIndex::default();
    for file_structure in structures {
        structure.insert(file_structure);
    }

    let dependencies = deps::build_dependency_graph(&structure, &files);
    let summary = summary::compose(&structure);

    info!(
        files = files.len(),
        classes = structure.classes.len(),
        functions = structure.functions.len(),
        "analysis complete"
    );

    let mut file_contents = std::collections::BTreeMap::new();
    let mut file_paths = Vec::with_capacity(files.len());
    for file in files {
        file_paths.push(file.path.clone());
        file_contents.insert(file.path, file.content);
    }

    Ok(AnalysisResult {
        files: file_paths,
        file_contents,
        structure,
        dependencies,
        summary,
        root_path: root.display().to_string(),
    })
}

/// Check the source contract: exactly one of repo_url/local_path
fn validate(request: &AnalysisRequest) -> Result<SourceSpec> {
    match (&request.repo_url, &request.local_path) {
        (Some(_), Some(_)) => Err(AnalyzerError::InvalidRequest {
            message: "cannot specify both repo_url and local_path".to_string(),
        }),
        (None, None) => Err(AnalyzerError::InvalidRequest {
            message: "must specify either repo_url or local_path".to_string(),
        }),
        (Some(url), None) => Ok(SourceSpec::Remote { url: url.clone() }),
        (None, Some(path)) => Ok(SourceSpec::Local { path: path.clone() }),
    }
}
