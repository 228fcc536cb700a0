//! Cache command handler - manage analysis snapshots

use crate::cache::CacheDir;
use crate::cli::{CacheArgs, OutputFormat};
use crate::error::Result;

use super::CommandContext;

/// Run the cache command
pub fn run_cache(ctx: &CommandContext, args: &CacheArgs) -> Result<String> {
    let cache = CacheDir::for_source(&args.source);

    if args.clear {
        cache.clear()?;
        return Ok(format!("cache_cleared: {}\n", cache.root.display()));
    }

    if !cache.exists() {
        return Ok(format!(
            "snapshot: none\ncache: {}\n",
            cache.root.display()
        ));
    }

    let snapshot = cache.load()?;
    let output = match ctx.format {
        OutputFormat::Json => serde_json::to_string_pretty(&snapshot)?,
        OutputFormat::Text => format!(
            "source: {}\nanalyzed_at: {}\nfiles: {}\ncache: {}",
            snapshot.source,
            snapshot.analyzed_at.to_rfc3339(),
            snapshot.result.files.len(),
            cache.root.display()
        ),
    };

    Ok(format!("{}\n", output))
}
