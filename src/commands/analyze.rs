//! Analyze command implementation

use crate::analyzer;
use crate::cache::{CacheDir, Snapshot};
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::error::Result;
use crate::schema::AnalysisResult;

use super::CommandContext;

/// Run the analyze command
pub fn run_analyze(ctx: &CommandContext, args: &AnalyzeArgs) -> Result<String> {
    let request = args.source.to_request();

    if ctx.verbose {
        eprintln!(
            "Analyzing {} ({} include, {} exclude patterns, max {} bytes)",
            args.source.source_id(),
            request.include.len(),
            request.exclude.len(),
            request.max_file_size
        );
    }

    let result = analyzer::analyze(&request)?;

    if args.save {
        let cache = CacheDir::for_source(&args.source.source_id());
        cache.save(&Snapshot::new(&args.source.source_id(), result.clone()))?;
        if ctx.verbose {
            eprintln!("Snapshot saved to {}", cache.snapshot_path().display());
        }
    }

    let output = match ctx.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => format_text(&result),
    };

    Ok(format!("{}\n", output))
}

/// Human-readable rendering of a full analysis result
fn format_text(result: &AnalysisResult) -> String {
    let mut text = String::new();

    text.push_str(&result.summary);
    text.push_str("\n\nDependencies:\n");

    let mut any = false;
    for (file, deps) in &result.dependencies {
        if deps.is_empty() {
            continue;
        }
        any = true;
        let list: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
        text.push_str(&format!("  {} -> {}\n", file, list.join(", ")));
    }
    if !any {
        text.push_str("  (none)\n");
    }

    text.push_str(&format!("\nroot: {}", result.root_path));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_format_text_lists_dependencies() {
        let mut result = AnalysisResult::default();
        result.summary = "Codebase Structure:\n- 1 files analyzed".to_string();
        result
            .dependencies
            .insert("a.py".to_string(), BTreeSet::from(["os".to_string()]));
        result.dependencies.insert("b.py".to_string(), BTreeSet::new());
        result.root_path = "/repo".to_string();

        let text = format_text(&result);
        assert!(text.contains("a.py -> os"));
        assert!(!text.contains("b.py ->"));
        assert!(text.contains("root: /repo"));
    }

    #[test]
    fn test_format_text_empty_dependencies() {
        let result = AnalysisResult::default();
        assert!(format_text(&result).contains("(none)"));
    }
}
