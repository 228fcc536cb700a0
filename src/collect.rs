//! File collection: walk a tree, apply patterns, read contents
//!
//! Enumeration is recursive over all regular files. Oversized, unstattable
//! and unreadable files are skipped silently; the run never fails because of
//! a single file. The returned records are sorted lexicographically by
//! relative path — callers rely on this ordering being stable across runs.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::pattern::{self, Pattern};
use crate::schema::FileRecord;

/// Collect all in-scope files under `root`
///
/// Applies the exclude-then-include pattern policy to `/`-normalized paths
/// relative to `root`, skips files larger than `max_file_size`, and reads
/// survivors with lossy UTF-8 decoding.
pub fn collect(
    root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
    max_file_size: u64,
) -> Vec<FileRecord> {
    let include = pattern::compile_all(include_patterns);
    let exclude = pattern::compile_all(exclude_patterns);

    let mut candidates = Vec::new();
    walk(root, root, &include, &exclude, max_file_size, &mut candidates);

    // Reads fan out across the pool; the sort below restores the
    // deterministic order the enumeration contract promises
    let mut records: Vec<FileRecord> = candidates
        .par_iter()
        .filter_map(|(abs, rel, size)| read_record(abs, rel, *size))
        .collect();

    records.sort_by(|a, b| a.path.cmp(&b.path));
    records
}

/// Recursively enumerate candidate files, applying size and pattern filters
fn walk(
    root: &Path,
    dir: &Path,
    include: &[Pattern],
    exclude: &[Pattern],
    max_file_size: u64,
    out: &mut Vec<(PathBuf, String, u64)>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            walk(root, &path, include, exclude, max_file_size, out);
            continue;
        }
        if !path.is_file() {
            continue;
        }

        // Stat failures and oversized files are silently omitted
        let size = match path.metadata() {
            Ok(meta) => meta.len(),
            Err(_) => continue,
        };
        if size > max_file_size {
            debug!(path = %path.display(), size, "skipping oversized file");
            continue;
        }

        let rel = match path.strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let rel = posix_path(rel);

        if pattern::is_included(&rel, include, exclude) {
            out.push((path, rel, size));
        }
    }
}

/// Read one file with best-effort decoding; `None` on any I/O failure
fn read_record(abs: &Path, rel: &str, size: u64) -> Option<FileRecord> {
    match fs::read(abs) {
        Ok(bytes) => Some(FileRecord {
            path: rel.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            size,
        }),
        Err(e) => {
            debug!(path = rel, error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Render a relative path with `/` separators on every platform
fn posix_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
