//! Summary command implementation

use crate::analyzer;
use crate::cli::{OutputFormat, SummaryArgs};
use crate::error::Result;

use super::CommandContext;

/// Run the summary command
pub fn run_summary(ctx: &CommandContext, args: &SummaryArgs) -> Result<String> {
    let request = args.source.to_request();
    let result = analyzer::analyze(&request)?;

    let output = match ctx.format {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "summary": result.summary,
            "root_path": result.root_path,
        }))?,
        OutputFormat::Text => result.summary,
    };

    Ok(format!("{}\n", output))
}
