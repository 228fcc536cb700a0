//! repograph: codebase structure analyzer with knowledge graph output
//!
//! This library analyzes a codebase — a local directory or a cloned git
//! repository — and produces a structural index (files, classes, functions,
//! imports), a per-file dependency graph, and a typed knowledge graph of
//! entities and relationships.
//!
//! Python sources are parsed with tree-sitter; JavaScript/TypeScript
//! structure is recovered by pattern search over raw text. Every analysis
//! run recomputes from scratch and is deterministic: file enumeration is
//! sorted, and all aggregate maps iterate in sorted order.
//!
//! # Example
//!
//! ```ignore
//! use repograph::{analyze, build_knowledge_graph, AnalysisRequest};
//!
//! let request = AnalysisRequest::local("./my-project");
//! let result = analyze(&request)?;
//!
//! println!("{}", result.summary);
//!
//! let graph = build_knowledge_graph(&result.structure, &result.dependencies);
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! ```

pub mod acquire;
pub mod analyzer;
pub mod cache;
pub mod cli;
pub mod collect;
pub mod commands;
pub mod config;
pub mod deps;
pub mod error;
pub mod extract;
pub mod fs_utils;
pub mod graph;
pub mod lang;
pub mod pattern;
pub mod schema;
pub mod summary;

// Re-export commonly used types
pub use analyzer::analyze;
pub use cli::{Cli, Commands, OutputFormat};
pub use deps::build_dependency_graph;
pub use error::{AnalyzerError, Result};
pub use extract::extract;
pub use graph::build_knowledge_graph;
pub use lang::{Lang, LangFamily};
pub use pattern::Pattern;
pub use schema::{
    AnalysisRequest, AnalysisResult, ClassRecord, DependencyGraph, Edge, FileRecord,
    FileStructure, FunctionRecord, ImportRef, KnowledgeGraph, Node, NodeType, Relationship,
    StructureIndex,
};
pub use summary::compose as compose_summary;
