//! Source acquisition: remote clones and local paths
//!
//! A remote source is cloned into a scoped temporary directory via a git
//! subprocess. The clone directory lives exactly as long as the returned
//! [`AcquiredSource`], so it is removed on every exit path, including errors
//! and caller cancellation.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use crate::error::{AnalyzerError, Result};

/// Where a codebase comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A remote git repository URL
    Remote { url: String },
    /// A local directory used in place
    Local { path: PathBuf },
}

impl SourceSpec {
    /// Stable identifier for cache keys and logs
    pub fn id(&self) -> String {
        match self {
            Self::Remote { url } => url.clone(),
            Self::Local { path } => path.display().to_string(),
        }
    }
}

/// A resolved codebase root
///
/// For remote sources this owns the temporary clone directory; dropping the
/// value removes it.
#[derive(Debug)]
pub struct AcquiredSource {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl AcquiredSource {
    /// The file-tree root to analyze
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether this source owns a scoped temporary directory
    pub fn is_scoped(&self) -> bool {
        self.temp.is_some()
    }
}

/// Resolve a source to a local file-tree root
///
/// Remote sources are fully cloned; a clone failure (network, auth,
/// not-found) is fatal for the run and is not retried here. Local paths are
/// returned verbatim without taking ownership.
pub fn acquire(source: &SourceSpec, token: Option<&str>) -> Result<AcquiredSource> {
    match source {
        SourceSpec::Local { path } => Ok(AcquiredSource {
            root: path.clone(),
            temp: None,
        }),
        SourceSpec::Remote { url } => {
            let temp = TempDir::new()?;
            let clone_url = match token {
                Some(token) => inject_token(url, token),
                None => url.clone(),
            };

            debug!(url = %url, "cloning repository");
            clone_into(&clone_url, temp.path())?;

            Ok(AcquiredSource {
                root: temp.path().to_path_buf(),
                temp: Some(temp),
            })
        }
    }
}

/// Inject an access token into an https GitHub clone URL
fn inject_token(url: &str, token: &str) -> String {
    url.replace("https://github.com/", &format!("https://{}@github.com/", token))
}

/// Run `git clone` into the given directory
fn clone_into(url: &str, dest: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clone", url])
        .arg(dest)
        .output()
        .map_err(|e| AnalyzerError::Acquisition {
            message: format!("failed to execute git: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AnalyzerError::Acquisition {
            message: format!("git clone failed: {}", stderr.trim()),
        });
    }

    Ok(())
}
