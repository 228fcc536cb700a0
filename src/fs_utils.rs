//! Cross-platform filesystem helpers for the snapshot cache

use std::io;
use std::path::{Path, PathBuf};

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
    }
    std::fs::rename(src, dst)
}

/// Platform-appropriate cache base directory for repograph.
///
/// - **Unix**: `$XDG_CACHE_HOME/repograph` or `~/.cache/repograph`
/// - **Windows**: `%LOCALAPPDATA%\repograph`
/// - **Fallback**: system temp directory + `repograph`
pub fn cache_base_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        return cache.join("repograph");
    }
    std::env::temp_dir().join("repograph")
}
