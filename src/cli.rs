//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config;
use crate::schema::AnalysisRequest;

/// Codebase structure analyzer with knowledge graph output
#[derive(Parser, Debug)]
#[command(name = "repograph")]
#[command(about = "Analyze a codebase and build its dependency and knowledge graphs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for repograph
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a codebase and print the full result
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Build the knowledge graph for a codebase
    #[command(visible_alias = "g")]
    Graph(GraphArgs),

    /// Print the structure digest only
    #[command(visible_alias = "s")]
    Summary(SummaryArgs),

    /// Manage cached analysis snapshots
    Cache(CacheArgs),
}

/// Source selection and collection settings shared by analysis commands
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local directory to analyze (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Remote repository URL to clone and analyze instead of a local path
    #[arg(long, value_name = "URL", conflicts_with = "path")]
    pub repo: Option<String>,

    /// Include glob pattern (can be repeated)
    #[arg(long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Exclude glob pattern, checked before includes (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Maximum file size in bytes (default 100000, env REPOGRAPH_MAX_FILE_SIZE)
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,
}

impl SourceArgs {
    /// Build an analysis request from the CLI arguments
    pub fn to_request(&self) -> AnalysisRequest {
        let (repo_url, local_path) = match &self.repo {
            Some(url) => (Some(url.clone()), None),
            None => {
                let path = self.path.clone().unwrap_or_else(|| PathBuf::from("."));
                (None, Some(path))
            }
        };

        AnalysisRequest {
            repo_url,
            local_path,
            include: if self.include.is_empty() {
                config::default_include_patterns()
            } else {
                self.include.clone()
            },
            exclude: if self.exclude.is_empty() {
                config::default_exclude_patterns()
            } else {
                self.exclude.clone()
            },
            max_file_size: self.max_file_size.unwrap_or_else(config::max_file_size),
        }
    }

    /// Identifier used for snapshot cache keys
    pub fn source_id(&self) -> String {
        match &self.repo {
            Some(url) => url.clone(),
            None => self
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .display()
                .to_string(),
        }
    }
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Persist the result to the snapshot cache
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the cache command
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Source identifier (repo URL or local path) the snapshot belongs to
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Remove the cached snapshot instead of showing it
    #[arg(long)]
    pub clear: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}
