//! Graph command implementation

use crate::analyzer;
use crate::cli::{GraphArgs, OutputFormat};
use crate::error::Result;
use crate::graph::build_knowledge_graph;
use crate::schema::{KnowledgeGraph, NodeType};

use super::CommandContext;

/// Run the graph command
pub fn run_graph(ctx: &CommandContext, args: &GraphArgs) -> Result<String> {
    let request = args.source.to_request();
    let result = analyzer::analyze(&request)?;
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);

    let output = match ctx.format {
        OutputFormat::Json => serde_json::to_string_pretty(&graph)?,
        OutputFormat::Text => format_text(&graph),
    };

    Ok(format!("{}\n", output))
}

/// Per-type node counts and edge total
fn format_text(graph: &KnowledgeGraph) -> String {
    let count = |t: NodeType| graph.nodes.iter().filter(|n| n.node_type == t).count();

    format!(
        "Knowledge Graph:\n\
         - {} nodes ({} files, {} classes, {} functions)\n\
         - {} edges",
        graph.nodes.len(),
        count(NodeType::File),
        count(NodeType::Class),
        count(NodeType::Function),
        graph.edges.len()
    )
}
